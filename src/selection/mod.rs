//! Transform handles and the controller that binds them to render nodes.

mod controller;
mod handles;

pub use controller::{AttachPhase, AttachState, HandleController, RedrawRequest};
pub use handles::{Handle, HandleKind, HandleSet, HandleStyle, ResizeAnchor};

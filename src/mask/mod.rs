//! Frame-derived clip mask and overlays.

mod clip;
mod provider;

pub use clip::ClipMask;
pub use provider::{FrameLayers, FrameStyle, MaskProvider};

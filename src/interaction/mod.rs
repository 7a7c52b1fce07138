//! Tools, hit testing and pointer-event routing.

mod hit;
mod router;
mod tools;

pub use hit::{HIT_SLOP_PX, Hit, HitPart, element_contains, hit_test};
pub use router::{Gesture, MIN_RESIZE, Routed, Router};
pub use tools::{Tool, ToolSettings, ToolSettingsPatch};

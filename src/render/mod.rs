//! Frame buffers, premultiplied pixel compositing and the CPU rasterizer.

mod backend;
mod composite;
mod cpu;

pub use backend::{FrameRGBA, RenderBackend};
pub use composite::{PremulRgba8, dest_out, dest_out_in_place, fill, over, over_in_place};
pub use cpu::CpuRenderer;

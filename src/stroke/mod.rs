//! Stroke geometry generation and in-progress stroke capture.

mod capture;
mod geometry;

pub use capture::{ActiveStroke, StrokeCapture};
pub use geometry::{
    AIRBRUSH_GLOW_OPACITY, AIRBRUSH_GLOW_SCALE, Primitive, SprayDensity, StrokeStyle,
    paint_primitives, scatter_offsets,
};

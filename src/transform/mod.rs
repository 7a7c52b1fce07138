//! Canvas space / render space conversion.
//!
//! Element coordinates are always stored in canvas space. Render space is the pixel grid of
//! the output surface: `render = canvas * zoom + (0, offset_y)`. Everything that places pixels
//! (live stroke preview, committed strokes, drag write-back, hit testing) goes through
//! [`Viewport`] so the mapping cannot drift between call sites.

mod layout;
mod viewport;

pub use layout::RenderLayout;
pub use viewport::{MAX_ZOOM, MIN_ZOOM, Viewport, clamp_zoom, to_canvas, to_render};

use crate::foundation::core::{Affine, Point, Vec2};

/// Smallest accepted zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Largest accepted zoom factor.
pub const MAX_ZOOM: f64 = 3.0;

/// Clamp a caller-supplied zoom into `[MIN_ZOOM, MAX_ZOOM]`.
///
/// NaN maps to `1.0`; infinities clamp to the nearest bound.
pub fn clamp_zoom(zoom: f64) -> f64 {
    if zoom.is_nan() {
        return 1.0;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Zoom factor plus vertical plate offset.
///
/// The zoom is clamped on construction, so a `Viewport` never divides by a near-zero scale.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    zoom: f64,
    offset_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            offset_y: 0.0,
        }
    }
}

impl Viewport {
    /// Build a viewport, clamping `zoom`. A non-finite offset is treated as `0`.
    pub fn new(zoom: f64, offset_y: f64) -> Self {
        Self {
            zoom: clamp_zoom(zoom),
            offset_y: if offset_y.is_finite() { offset_y } else { 0.0 },
        }
    }

    /// Current (clamped) zoom.
    pub fn zoom(self) -> f64 {
        self.zoom
    }

    /// Vertical offset in render pixels.
    pub fn offset_y(self) -> f64 {
        self.offset_y
    }

    /// Same offset, new (clamped) zoom.
    pub fn with_zoom(self, zoom: f64) -> Self {
        Self::new(zoom, self.offset_y)
    }

    /// Canvas space -> render space.
    pub fn to_render(self, p: Point) -> Point {
        Point::new(p.x * self.zoom, p.y * self.zoom + self.offset_y)
    }

    /// Render space -> canvas space; exact inverse of [`Viewport::to_render`].
    pub fn to_canvas(self, p: Point) -> Point {
        Point::new(p.x / self.zoom, (p.y - self.offset_y) / self.zoom)
    }

    /// Scale a canvas-space length (stroke width, radius) into render pixels.
    pub fn render_len(self, canvas_len: f64) -> f64 {
        canvas_len * self.zoom
    }

    /// Scale a render-space length back into canvas units.
    pub fn canvas_len(self, render_len: f64) -> f64 {
        render_len / self.zoom
    }

    /// Convert a render-space pointer delta into a canvas-space delta.
    pub fn canvas_delta(self, render_delta: Vec2) -> Vec2 {
        render_delta / self.zoom
    }

    /// The canvas -> render mapping as an affine transform.
    pub fn affine(self) -> Affine {
        Affine::translate(Vec2::new(0.0, self.offset_y)) * Affine::scale(self.zoom)
    }
}

/// Free-function form of [`Viewport::to_render`].
pub fn to_render(p: Point, zoom: f64, offset_y: f64) -> Point {
    Viewport::new(zoom, offset_y).to_render(p)
}

/// Free-function form of [`Viewport::to_canvas`].
pub fn to_canvas(p: Point, zoom: f64, offset_y: f64) -> Point {
    Viewport::new(zoom, offset_y).to_canvas(p)
}

#[cfg(test)]
#[path = "../../tests/unit/transform/viewport.rs"]
mod tests;

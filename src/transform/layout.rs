use crate::foundation::core::{Canvas, Rect, Size};
use crate::foundation::error::{PlateError, PlateResult};
use crate::transform::Viewport;

/// Render-space geometry for one frame: surface size and where the plate sits in it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderLayout {
    /// Active viewport.
    pub viewport: Viewport,
    /// Plate size in canvas units.
    pub canvas_size: Size,
    /// Output surface in pixels (plate plus vertical padding on both sides).
    pub surface: Canvas,
    /// Plate rectangle in render space.
    pub plate_rect: Rect,
}

impl RenderLayout {
    /// Compute the layout of a `canvas_size` plate under `viewport`.
    pub fn new(canvas_size: Size, viewport: Viewport) -> PlateResult<Self> {
        if !(canvas_size.width.is_finite() && canvas_size.height.is_finite())
            || canvas_size.width <= 0.0
            || canvas_size.height <= 0.0
        {
            return Err(PlateError::validation("canvas size must be finite and > 0"));
        }
        let plate_w = viewport.render_len(canvas_size.width);
        let plate_h = viewport.render_len(canvas_size.height);
        let pad = viewport.offset_y().max(0.0);
        let surface = Canvas::new(
            plate_w.ceil().max(1.0) as u32,
            (plate_h + 2.0 * pad).ceil().max(1.0) as u32,
        )?;
        Ok(Self {
            viewport,
            canvas_size,
            surface,
            plate_rect: Rect::new(0.0, viewport.offset_y(), plate_w, viewport.offset_y() + plate_h),
        })
    }

    /// Plate rectangle snapped outward to whole pixels, as `(x, y, w, h)`.
    pub(crate) fn plate_pixels(&self) -> (u32, u32, u32, u32) {
        let r = self.plate_rect;
        let x0 = r.x0.floor().max(0.0) as u32;
        let y0 = r.y0.floor().max(0.0) as u32;
        let x1 = (r.x1.ceil() as u32).min(self.surface.width);
        let y1 = (r.y1.ceil() as u32).min(self.surface.height);
        (x0, y0, x1.saturating_sub(x0), y1.saturating_sub(y0))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/layout.rs"]
mod tests;

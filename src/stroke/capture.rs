use crate::foundation::core::{Point, is_finite_point};
use crate::model::{BrushKind, Element, ElementKind, Mode, PaintProps};
use crate::stroke::geometry::{Primitive, StrokeStyle, paint_primitives, scatter_offsets};
use crate::transform::Viewport;

/// A stroke being recorded between pointer-down and pointer-up.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveStroke {
    style: StrokeStyle,
    points: Vec<Point>,
    seed: u64,
}

impl ActiveStroke {
    /// Brush settings captured at stroke start.
    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Canvas-space samples recorded so far.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Scatter seed of this stroke.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    fn props(&self) -> PaintProps {
        let scatter = match self.style.brush {
            BrushKind::Spray => scatter_offsets(self.points.len(), self.style.width, self.seed),
            _ => Vec::new(),
        };
        PaintProps {
            brush: self.style.brush,
            color: self.style.color,
            stroke_width: self.style.width,
            points: self.points.clone(),
            scatter,
            scatter_seed: self.seed,
        }
    }
}

/// Records pointer samples into at most one in-progress stroke.
#[derive(Clone, Debug, Default)]
pub struct StrokeCapture {
    active: Option<ActiveStroke>,
}

impl StrokeCapture {
    /// `true` while a stroke is being recorded.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// The in-progress stroke, if any.
    pub fn active(&self) -> Option<&ActiveStroke> {
        self.active.as_ref()
    }

    /// Start a new, empty stroke. Returns `false` if one is already in progress.
    pub fn begin(&mut self, style: StrokeStyle, seed: u64) -> bool {
        if self.active.is_some() {
            return false;
        }
        self.active = Some(ActiveStroke {
            style,
            points: Vec::new(),
            seed,
        });
        true
    }

    /// Append a canvas-space sample. Non-finite samples and samples without an active
    /// stroke are ignored; returns whether the sample was recorded.
    pub fn append(&mut self, point: Point) -> bool {
        let Some(stroke) = self.active.as_mut() else {
            return false;
        };
        if !is_finite_point(point) {
            tracing::debug!(?point, "dropping non-finite stroke sample");
            return false;
        }
        stroke.points.push(point);
        true
    }

    /// Live preview primitives for the in-progress stroke.
    pub fn preview(&self, viewport: Viewport) -> Vec<Primitive> {
        self.active
            .as_ref()
            .map(|s| paint_primitives(&s.props(), viewport.affine(), viewport.zoom()))
            .unwrap_or_default()
    }

    /// Finish the stroke. A stroke with no samples is discarded and yields `None`.
    ///
    /// Spray offsets are frozen into the element with the same seed the preview used.
    pub fn commit(&mut self, affinity: Mode) -> Option<Element> {
        let stroke = self.active.take()?;
        if stroke.points.is_empty() {
            tracing::debug!(brush = ?stroke.style.brush, "discarding empty stroke");
            return None;
        }
        let el = Element::new(ElementKind::Paint(stroke.props()), affinity);
        tracing::debug!(
            id = %el.id,
            brush = ?stroke.style.brush,
            points = stroke.points.len(),
            "stroke committed"
        );
        Some(el)
    }

    /// Drop the in-progress stroke without committing it.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/capture.rs"]
mod tests;

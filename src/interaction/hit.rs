use crate::foundation::core::Point;
use crate::model::{BrushKind, Element, ElementId, ElementKind, ElementList};
use crate::selection::{HandleKind, HandleSet};
use crate::stroke::SprayDensity;
use crate::transform::Viewport;

/// Extra pick radius around thin geometry, in render pixels.
pub const HIT_SLOP_PX: f64 = 4.0;

/// Which part of an element was hit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitPart {
    /// The element body.
    Body,
    /// One of the attached transform handles.
    Handle(HandleKind),
}

/// Result of a hit test.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Element under the pointer.
    pub id: ElementId,
    /// Part of it.
    pub part: HitPart,
}

/// Element (or handle) under render-space point `p`.
///
/// Attached handles are checked first, then elements from the top of the stack down.
/// Eraser strokes carry no visible pigment and are never hit.
pub fn hit_test(
    p: Point,
    elements: &ElementList,
    viewport: Viewport,
    handles: Option<&HandleSet>,
) -> Option<Hit> {
    if let Some(set) = handles
        && let Some(kind) = set.hit(p)
        && elements.contains(set.target)
    {
        return Some(Hit {
            id: set.target,
            part: HitPart::Handle(kind),
        });
    }

    let canvas = viewport.to_canvas(p);
    let slop = viewport.canvas_len(HIT_SLOP_PX);
    elements
        .iter()
        .rev()
        .find(|el| element_contains(el, canvas, slop))
        .map(|el| Hit {
            id: el.id,
            part: HitPart::Body,
        })
}

/// `true` when canvas-space `p` lies on `el`, allowing `slop` canvas units around strokes.
pub fn element_contains(el: &Element, p: Point, slop: f64) -> bool {
    let local = el.transform().inverse() * p;
    match &el.kind {
        ElementKind::Image(_) | ElementKind::Text(_) | ElementKind::Shape(_) => {
            el.local_bounds().contains(local)
        }
        ElementKind::Paint(paint) => {
            let reach = match paint.brush {
                BrushKind::Eraser => return false,
                BrushKind::Brush => paint.stroke_width * 0.5,
                BrushKind::Airbrush => paint.stroke_width * 0.5 * crate::stroke::AIRBRUSH_GLOW_SCALE,
                BrushKind::Spray => SprayDensity::for_width(paint.stroke_width).scatter_radius,
            };
            polyline_distance(&paint.points, local) <= reach + slop
        }
        ElementKind::Centerline(line) => {
            segment_distance(line.start, line.end, local) <= line.stroke_width * 0.5 + slop
        }
    }
}

fn polyline_distance(points: &[Point], p: Point) -> f64 {
    match points {
        [] => f64::INFINITY,
        [only] => only.distance(p),
        _ => points
            .windows(2)
            .map(|w| segment_distance(w[0], w[1], p))
            .fold(f64::INFINITY, f64::min),
    }
}

fn segment_distance(a: Point, b: Point, p: Point) -> f64 {
    let ab = b - a;
    let len2 = ab.hypot2();
    if len2 <= f64::EPSILON {
        return a.distance(p);
    }
    let t = ((p - a).dot(ab) / len2).clamp(0.0, 1.0);
    (a + ab * t).distance(p)
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/hit.rs"]
mod tests;

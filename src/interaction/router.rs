use crate::editor::EditorState;
use crate::foundation::core::Point;
use crate::foundation::error::PlateResult;
use crate::interaction::hit::{HitPart, hit_test};
use crate::model::{Element, ElementId, ElementPatch};
use crate::selection::{HandleKind, HandleSet, ResizeAnchor};

/// Smallest width or height a resize may produce, in canvas units.
pub const MIN_RESIZE: f64 = 1.0;

/// Gesture tracked between pointer-down and pointer-up.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Gesture {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pointer-down started stroke capture.
    Painting,
    /// Moving an element.
    Dragging {
        /// Element being moved.
        id: ElementId,
        /// Render-space pointer position at the previous event.
        last: Point,
    },
    /// Resizing from a handle.
    Resizing {
        /// Anchor being dragged.
        anchor: ResizeAnchor,
        /// Canvas-space pointer position at gesture start.
        start: Point,
        /// Element as it was at gesture start.
        orig: Box<Element>,
    },
    /// Rotating around the bounds center.
    Rotating {
        /// Element being rotated.
        id: ElementId,
        /// Canvas-space pivot.
        center: Point,
        /// Pointer angle at gesture start, in degrees.
        start_angle: f64,
        /// Element rotation at gesture start, in degrees.
        orig_rotation: f64,
    },
}

/// What a routed pointer event did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Routed {
    /// Nothing changed.
    Ignored,
    /// Fed stroke capture.
    Stroke,
    /// Changed the selection.
    Selected(Option<ElementId>),
    /// Moved, resized or rotated an element.
    Manipulated(ElementId),
    /// Pointer-up finished a stroke; `None` when the stroke was empty.
    Committed(Option<ElementId>),
}

/// Decides per pointer event between stroke capture and element manipulation.
///
/// The active tool is read from the state on every event, so a tool switch takes effect on the
/// next event of the current gesture.
#[derive(Clone, Debug, Default)]
pub struct Router {
    gesture: Gesture,
}

impl Router {
    /// Router with no gesture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current gesture.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Pointer pressed at render-space `p`.
    pub fn pointer_down(
        &mut self,
        state: &mut EditorState,
        p: Point,
        handles: Option<&HandleSet>,
    ) -> PlateResult<Routed> {
        let canvas = state.viewport.to_canvas(p);
        if state.tool.is_paint() {
            if !state.stroke.is_active() && !state.begin_stroke() {
                return Ok(Routed::Ignored);
            }
            state.stroke.append(canvas);
            self.gesture = Gesture::Painting;
            return Ok(Routed::Stroke);
        }

        let Some(hit) = hit_test(p, &state.elements, state.viewport, handles) else {
            self.gesture = Gesture::Idle;
            if state.selection.is_none() {
                return Ok(Routed::Ignored);
            }
            state.select(None)?;
            return Ok(Routed::Selected(None));
        };

        let el = state.elements.get(hit.id).cloned();
        let Some(el) = el else {
            return Ok(Routed::Ignored);
        };
        self.gesture = match hit.part {
            HitPart::Body => Gesture::Dragging { id: hit.id, last: p },
            HitPart::Handle(HandleKind::Resize(anchor)) => Gesture::Resizing {
                anchor,
                start: canvas,
                orig: Box::new(el.clone()),
            },
            HitPart::Handle(HandleKind::Rotate) => {
                let center = el.transform() * el.local_bounds().center();
                Gesture::Rotating {
                    id: hit.id,
                    center,
                    start_angle: angle_deg(center, canvas),
                    orig_rotation: el.rotation,
                }
            }
        };

        if state.selection != Some(hit.id) {
            state.select(Some(hit.id))?;
            return Ok(Routed::Selected(Some(hit.id)));
        }
        Ok(Routed::Ignored)
    }

    /// Pointer moved to render-space `p`.
    pub fn pointer_move(&mut self, state: &mut EditorState, p: Point) -> PlateResult<Routed> {
        let canvas = state.viewport.to_canvas(p);
        if state.tool.is_paint() {
            if state.stroke.append(canvas) {
                return Ok(Routed::Stroke);
            }
            return Ok(Routed::Ignored);
        }

        match &mut self.gesture {
            Gesture::Idle | Gesture::Painting => Ok(Routed::Ignored),
            Gesture::Dragging { id, last } => {
                let id = *id;
                let delta = state.viewport.canvas_delta(p - *last);
                *last = p;
                let Some(el) = state.elements.get(id) else {
                    return Ok(Routed::Ignored);
                };
                let patch = ElementPatch {
                    x: Some(el.x + delta.x),
                    y: Some(el.y + delta.y),
                    ..ElementPatch::default()
                };
                state.elements.update(id, &patch)?;
                Ok(Routed::Manipulated(id))
            }
            Gesture::Resizing {
                anchor,
                start,
                orig,
            } => {
                let id = orig.id;
                let resized = resize(orig, *anchor, *start, canvas)?;
                *state.elements.get_mut(id)? = resized;
                Ok(Routed::Manipulated(id))
            }
            Gesture::Rotating {
                id,
                center,
                start_angle,
                orig_rotation,
            } => {
                let id = *id;
                let rotation = normalize_deg(*orig_rotation + angle_deg(*center, canvas) - *start_angle);
                let patch = ElementPatch {
                    rotation: Some(rotation),
                    ..ElementPatch::default()
                };
                state.elements.update(id, &patch)?;
                Ok(Routed::Manipulated(id))
            }
        }
    }

    /// Pointer released. A stroke in progress is committed whichever tool is now active.
    pub fn pointer_up(&mut self, state: &mut EditorState, _p: Point) -> PlateResult<Routed> {
        self.gesture = Gesture::Idle;
        if state.stroke.is_active() {
            return Ok(Routed::Committed(state.commit_stroke()?));
        }
        Ok(Routed::Ignored)
    }
}

fn angle_deg(center: Point, p: Point) -> f64 {
    let v = p - center;
    v.y.atan2(v.x).to_degrees()
}

fn normalize_deg(deg: f64) -> f64 {
    let d = deg.rem_euclid(360.0);
    if d > 180.0 { d - 360.0 } else { d }
}

/// Resize `orig` by dragging `anchor` from canvas `start` to canvas `now`, in the element's
/// unrotated frame.
fn resize(orig: &Element, anchor: ResizeAnchor, start: Point, now: Point) -> PlateResult<Element> {
    let inv = orig.transform().inverse();
    let delta = inv * now - inv * start;
    let from = orig.geometry_bounds();
    let (ex, ey) = anchor.edges();

    let mut r = from;
    match ex {
        -1 => r.x0 = (from.x0 + delta.x).min(from.x1 - MIN_RESIZE),
        1 => r.x1 = (from.x1 + delta.x).max(from.x0 + MIN_RESIZE),
        _ => {}
    }
    match ey {
        -1 => r.y0 = (from.y0 + delta.y).min(from.y1 - MIN_RESIZE),
        1 => r.y1 = (from.y1 + delta.y).max(from.y0 + MIN_RESIZE),
        _ => {}
    }

    // The edge or corner opposite the handle stays put on the canvas.
    let pin_axis = |edge: i8, lo: f64, hi: f64| match edge {
        -1 => hi,
        1 => lo,
        _ => (lo + hi) * 0.5,
    };
    let pin = Point::new(pin_axis(ex, from.x0, from.x1), pin_axis(ey, from.y0, from.y1));

    let mut out = orig.clone();
    out.reshape_pinned(r, pin)?;
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/router.rs"]
mod tests;

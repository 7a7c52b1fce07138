use crate::foundation::core::{Point, Vec2};
use crate::model::ElementId;

/// Anchor of a resize handle, named by compass direction on the unrotated bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResizeAnchor {
    /// Top edge midpoint.
    N,
    /// Top-right corner.
    Ne,
    /// Right edge midpoint.
    E,
    /// Bottom-right corner.
    Se,
    /// Bottom edge midpoint.
    S,
    /// Bottom-left corner.
    Sw,
    /// Left edge midpoint.
    W,
    /// Top-left corner.
    Nw,
}

impl ResizeAnchor {
    /// All anchors, clockwise from the top.
    pub const ALL: [Self; 8] = [
        Self::N,
        Self::Ne,
        Self::E,
        Self::Se,
        Self::S,
        Self::Sw,
        Self::W,
        Self::Nw,
    ];

    /// Which bounds edges this anchor moves, as `(dx, dy)` in `{-1, 0, 1}`:
    /// `-1` moves the min edge, `1` the max edge, `0` neither.
    pub fn edges(self) -> (i8, i8) {
        match self {
            Self::N => (0, -1),
            Self::Ne => (1, -1),
            Self::E => (1, 0),
            Self::Se => (1, 1),
            Self::S => (0, 1),
            Self::Sw => (-1, 1),
            Self::W => (-1, 0),
            Self::Nw => (-1, -1),
        }
    }
}

/// What a handle does when dragged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HandleKind {
    /// Resize from an anchor.
    Resize(ResizeAnchor),
    /// Rotate around the bounds center.
    Rotate,
}

/// One square handle in render space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Handle {
    /// Behaviour.
    pub kind: HandleKind,
    /// Center in render space.
    pub center: Point,
}

/// Handle sizing at zoom 1.0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleStyle {
    /// Handle edge length.
    pub base_size: f64,
    /// Distance of the rotate handle above the top edge.
    pub rotate_offset: f64,
}

/// Handles bound to one element's render node.
#[derive(Clone, Debug, PartialEq)]
pub struct HandleSet {
    /// Element the handles manipulate.
    pub target: ElementId,
    /// Rotated bounds corners in render space (top-left, top-right, bottom-right, bottom-left).
    pub outline: [Point; 4],
    /// Eight resize handles followed by the rotate handle.
    pub handles: Vec<Handle>,
    /// Handle edge length in render pixels (`base_size * zoom`).
    pub size: f64,
}

impl HandleSet {
    /// Lay out handles around a node's render-space corners.
    pub fn around(target: ElementId, outline: [Point; 4], zoom: f64, style: HandleStyle) -> Self {
        let [tl, tr, br, bl] = outline;
        let size = style.base_size * zoom;
        let mut handles: Vec<Handle> = ResizeAnchor::ALL
            .iter()
            .map(|&anchor| {
                let center = match anchor {
                    ResizeAnchor::N => tl.midpoint(tr),
                    ResizeAnchor::Ne => tr,
                    ResizeAnchor::E => tr.midpoint(br),
                    ResizeAnchor::Se => br,
                    ResizeAnchor::S => br.midpoint(bl),
                    ResizeAnchor::Sw => bl,
                    ResizeAnchor::W => bl.midpoint(tl),
                    ResizeAnchor::Nw => tl,
                };
                Handle {
                    kind: HandleKind::Resize(anchor),
                    center,
                }
            })
            .collect();

        // Outward normal of the top edge, so the rotate handle follows the element's rotation.
        let top = tl.midpoint(tr);
        let up = top - bl.midpoint(br);
        let dir = if up.hypot() > f64::EPSILON {
            up.normalize()
        } else {
            Vec2::new(0.0, -1.0)
        };
        handles.push(Handle {
            kind: HandleKind::Rotate,
            center: top + dir * (style.rotate_offset * zoom),
        });

        Self {
            target,
            outline,
            handles,
            size,
        }
    }

    /// Handle under render-space point `p`; later handles win ties.
    pub fn hit(&self, p: Point) -> Option<HandleKind> {
        let half = self.size * 0.5;
        self.handles
            .iter()
            .rev()
            .find(|h| (p.x - h.center.x).abs() <= half && (p.y - h.center.y).abs() <= half)
            .map(|h| h.kind)
    }

    /// Center of the rotate handle.
    pub fn rotate_handle(&self) -> Option<Point> {
        self.handles
            .iter()
            .find(|h| h.kind == HandleKind::Rotate)
            .map(|h| h.center)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/selection/handles.rs"]
mod tests;

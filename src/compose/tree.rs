use std::sync::Arc;

use crate::assets::PreparedImage;
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Size};
use crate::mask::ClipMask;
use crate::model::ElementId;
use crate::selection::HandleSet;
use crate::stroke::Primitive;

/// Drawable payload of a [`RenderNode`].
#[derive(Clone, Debug)]
pub enum NodeContent {
    /// Flat stroke primitives, already in render space.
    Primitives(Vec<Primitive>),
    /// Raster image drawn into `(0, 0, size)` under `transform`.
    Image {
        /// Decoded pixels.
        image: PreparedImage,
        /// Display size in local units.
        size: Size,
        /// Local -> render transform.
        transform: Affine,
    },
    /// Text laid out at render time inside a `width`-wide box.
    Text {
        /// Content.
        text: String,
        /// Font size in local units.
        font_size: f64,
        /// Fill color.
        color: Color,
        /// Wrap width in local units.
        width: f64,
        /// Local -> render transform.
        transform: Affine,
    },
    /// Filled (and optionally outlined) vector path in local units.
    Shape {
        /// Outline.
        path: BezPath,
        /// Fill color.
        fill: Color,
        /// Optional `(color, width)` outline.
        stroke: Option<(Color, f64)>,
        /// Local -> render transform.
        transform: Affine,
    },
    /// Nested children.
    Group(Vec<RenderNode>),
}

/// A derived, disposable view of one element (or the live stroke preview).
#[derive(Clone, Debug)]
pub struct RenderNode {
    /// Source element; `None` for the stroke preview and group children.
    pub element: Option<ElementId>,
    /// Whether pointer events may start manipulation on this node.
    pub interactive: bool,
    /// Rotated bounds corners in render space.
    pub corners: [Point; 4],
    /// Axis-aligned bounds in render space.
    pub bounds: Rect,
    /// Payload.
    pub content: NodeContent,
}

impl RenderNode {
    /// Depth-first search for the node of `id`.
    pub fn find(&self, id: ElementId) -> Option<&RenderNode> {
        if self.element == Some(id) {
            return Some(self);
        }
        match &self.content {
            NodeContent::Group(children) => children.iter().find_map(|c| c.find(id)),
            _ => None,
        }
    }

    /// Nesting depth (`1` for a leaf).
    pub fn depth(&self) -> usize {
        match &self.content {
            NodeContent::Group(children) => {
                1 + children.iter().map(RenderNode::depth).max().unwrap_or(0)
            }
            _ => 1,
        }
    }
}

/// Fill behind everything.
#[derive(Clone, Debug)]
pub struct BackgroundFill {
    /// Surface fill color.
    pub color: Color,
    /// Optional image stretched over the plate rectangle.
    pub image: Option<(PreparedImage, Rect)>,
}

/// Content group: every element plus the live preview, clipped at its root.
#[derive(Clone, Debug, Default)]
pub struct ContentGroup {
    /// Mask applied once to the whole group, so it reaches every descendant.
    pub clip: Option<Arc<ClipMask>>,
    /// Element nodes back to front, preview last.
    pub children: Vec<RenderNode>,
}

/// One layer of the render tree.
#[derive(Clone, Debug)]
pub enum Layer {
    /// Background color or image.
    Background(BackgroundFill),
    /// Opaque white plate rectangle (plate mode).
    WhiteBacking(Rect),
    /// Reduced-opacity frame silhouette (base mode).
    GhostFrame(Arc<PreparedImage>),
    /// Elements and the live preview.
    Content(ContentGroup),
    /// Full-opacity frame outline above content (plate mode).
    FrameOverlay(Arc<PreparedImage>),
    /// Transform handles. Never clipped.
    Handles(Option<HandleSet>),
}

/// Discriminant of a [`Layer`], for ordering checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    /// [`Layer::Background`].
    Background,
    /// [`Layer::WhiteBacking`].
    WhiteBacking,
    /// [`Layer::GhostFrame`].
    GhostFrame,
    /// [`Layer::Content`].
    Content,
    /// [`Layer::FrameOverlay`].
    FrameOverlay,
    /// [`Layer::Handles`].
    Handles,
}

impl Layer {
    /// Discriminant.
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Background(_) => LayerKind::Background,
            Self::WhiteBacking(_) => LayerKind::WhiteBacking,
            Self::GhostFrame(_) => LayerKind::GhostFrame,
            Self::Content(_) => LayerKind::Content,
            Self::FrameOverlay(_) => LayerKind::FrameOverlay,
            Self::Handles(_) => LayerKind::Handles,
        }
    }
}

/// Ordered layers, back to front.
#[derive(Clone, Debug)]
pub struct RenderTree {
    /// Output surface size.
    pub surface: Canvas,
    /// Layers, back to front.
    pub layers: Vec<Layer>,
}

impl RenderTree {
    /// Layer discriminants in draw order.
    pub fn layer_kinds(&self) -> Vec<LayerKind> {
        self.layers.iter().map(Layer::kind).collect()
    }

    /// The content group.
    pub fn content(&self) -> Option<&ContentGroup> {
        self.layers.iter().find_map(|l| match l {
            Layer::Content(g) => Some(g),
            _ => None,
        })
    }

    /// Handles currently drawn, if any.
    pub fn handles(&self) -> Option<&HandleSet> {
        self.layers.iter().find_map(|l| match l {
            Layer::Handles(h) => h.as_ref(),
            _ => None,
        })
    }

    /// Node of element `id` in the content group.
    pub fn find_node(&self, id: ElementId) -> Option<&RenderNode> {
        self.content()?.children.iter().find_map(|n| n.find(id))
    }
}

/// Scene-graph query used to bind handles to a node.
pub trait NodeLookup {
    /// Node of element `id`, if the scene graph has indexed it.
    fn lookup(&self, id: ElementId) -> Option<&RenderNode>;
}

impl NodeLookup for RenderTree {
    fn lookup(&self, id: ElementId) -> Option<&RenderNode> {
        self.find_node(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/tree.rs"]
mod tests;

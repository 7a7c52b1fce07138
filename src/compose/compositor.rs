use crate::assets::AssetStore;
use crate::compose::shapes::{dash_segments, shape_path};
use crate::compose::tree::{
    BackgroundFill, ContentGroup, Layer, NodeContent, RenderNode, RenderTree,
};
use crate::foundation::color::Color;
use crate::foundation::core::{Point, Rect, Size};
use crate::foundation::error::{PlateError, PlateResult};
use crate::mask::FrameLayers;
use crate::model::{Element, ElementId, ElementKind, ElementList, Mode};
use crate::selection::{HandleSet, HandleStyle};
use crate::stroke::{Primitive, paint_primitives};
use crate::transform::RenderLayout;

/// Background requested by the caller.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Background {
    /// Overrides the configured background color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Asset key of an image stretched over the plate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Everything one compose pass reads. Nothing here is mutated.
#[derive(Clone, Copy, Debug)]
pub struct ComposeInput<'a> {
    /// Element list, back to front.
    pub elements: &'a ElementList,
    /// Render geometry.
    pub layout: &'a RenderLayout,
    /// Active mode.
    pub mode: Mode,
    /// Frame layers for `mode`.
    pub frame: &'a FrameLayers,
    /// Background request.
    pub background: &'a Background,
    /// Fallback background color.
    pub background_color: Color,
    /// Live stroke preview primitives.
    pub preview: &'a [Primitive],
    /// `false` while a paint-family tool is active.
    pub interactive: bool,
    /// Element whose handles are attached.
    pub attached: Option<ElementId>,
    /// Handle sizing.
    pub handle_style: HandleStyle,
    /// Decoded assets.
    pub assets: &'a AssetStore,
}

/// Build the ordered render tree:
/// background, white backing, ghost frame, content group, crisp frame, handles.
///
/// An element whose node cannot be built is logged and left out; the rest of the tree is
/// unaffected.
#[tracing::instrument(skip_all, fields(mode = ?input.mode, elements = input.elements.len()))]
pub fn compose(input: ComposeInput<'_>) -> RenderTree {
    let layout = input.layout;
    let mut layers = Vec::with_capacity(6);

    layers.push(Layer::Background(background(&input)));

    if input.mode == Mode::Plate {
        layers.push(Layer::WhiteBacking(layout.plate_rect));
    }
    if input.mode == Mode::Base
        && let Some(ghost) = &input.frame.ghost
    {
        layers.push(Layer::GhostFrame(ghost.clone()));
    }

    let mut children = Vec::with_capacity(input.elements.len() + 1);
    for el in input.elements.iter() {
        match element_node(el, &input) {
            Ok(node) => children.push(node),
            Err(err) => tracing::warn!(id = %el.id, error = %err, "skipping element node"),
        }
    }
    if !input.preview.is_empty() {
        children.push(preview_node(input.preview));
    }
    layers.push(Layer::Content(ContentGroup {
        clip: match input.mode {
            Mode::Plate => input.frame.clip.clone(),
            Mode::Base => None,
        },
        children,
    }));

    if input.mode == Mode::Plate
        && let Some(crisp) = &input.frame.crisp
    {
        layers.push(Layer::FrameOverlay(crisp.clone()));
    }

    let handles = input.attached.and_then(|id| {
        let el = input.elements.get(id)?;
        let corners = render_corners(el, layout);
        Some(HandleSet::around(
            id,
            corners,
            layout.viewport.zoom(),
            input.handle_style,
        ))
    });
    layers.push(Layer::Handles(handles));

    RenderTree {
        surface: layout.surface,
        layers,
    }
}

fn background(input: &ComposeInput<'_>) -> BackgroundFill {
    let color = input.background.color.unwrap_or(input.background_color);
    let image = input.background.image.as_deref().and_then(|key| {
        let found = input.assets.image(key);
        if found.is_none() {
            tracing::warn!(key, "background image not registered");
        }
        found.map(|img| (img.clone(), input.layout.plate_rect))
    });
    BackgroundFill { color, image }
}

fn render_corners(el: &Element, layout: &RenderLayout) -> [Point; 4] {
    let vp = layout.viewport.affine();
    el.canvas_corners().map(|p| vp * p)
}

fn element_node(el: &Element, input: &ComposeInput<'_>) -> PlateResult<RenderNode> {
    let layout = input.layout;
    let to_render = layout.viewport.affine() * el.transform();
    let corners = render_corners(el, layout);
    let bounds = layout
        .viewport
        .affine()
        .transform_rect_bbox(el.canvas_bounds());

    let content = match &el.kind {
        ElementKind::Paint(p) => {
            NodeContent::Primitives(paint_primitives(p, to_render, layout.viewport.zoom()))
        }
        ElementKind::Image(p) => {
            let image = input
                .assets
                .image(&p.src)
                .ok_or_else(|| PlateError::asset(format!("image '{}' not registered", p.src)))?;
            NodeContent::Image {
                image: image.clone(),
                size: Size::new(p.width, p.height),
                transform: to_render,
            }
        }
        ElementKind::Text(p) => NodeContent::Text {
            text: p.text.clone(),
            font_size: p.font_size,
            color: p.color,
            width: p.width,
            transform: to_render,
        },
        ElementKind::Shape(p) => NodeContent::Shape {
            path: shape_path(p.shape, Rect::new(0.0, 0.0, p.width, p.height)),
            fill: p.fill,
            stroke: p
                .stroke
                .filter(|_| p.stroke_width > 0.0)
                .map(|c| (c, p.stroke_width)),
            transform: to_render,
        },
        ElementKind::Centerline(p) => {
            let width = p.stroke_width * layout.viewport.zoom();
            NodeContent::Group(
                dash_segments(p.start, p.end, p.dash)
                    .into_iter()
                    .map(|(a, b)| {
                        let (a, b) = (to_render * a, to_render * b);
                        RenderNode {
                            element: None,
                            interactive: false,
                            corners: [a, b, b, a],
                            bounds: Rect::from_points(a, b).inflate(width * 0.5, width * 0.5),
                            content: NodeContent::Primitives(vec![Primitive::Polyline {
                                points: vec![a, b],
                                width,
                                color: p.color,
                                opacity: 1.0,
                            }]),
                        }
                    })
                    .collect(),
            )
        }
    };

    Ok(RenderNode {
        element: Some(el.id),
        interactive: input.interactive,
        corners,
        bounds,
        content,
    })
}

fn preview_node(preview: &[Primitive]) -> RenderNode {
    let bounds = preview
        .iter()
        .map(primitive_bounds)
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO);
    RenderNode {
        element: None,
        interactive: false,
        corners: [
            Point::new(bounds.x0, bounds.y0),
            Point::new(bounds.x1, bounds.y0),
            Point::new(bounds.x1, bounds.y1),
            Point::new(bounds.x0, bounds.y1),
        ],
        bounds,
        content: NodeContent::Primitives(preview.to_vec()),
    }
}

fn primitive_bounds(p: &Primitive) -> Rect {
    let (points, pad): (&[Point], f64) = match p {
        Primitive::Polyline { points, width, .. } | Primitive::Clear { points, width } => {
            (points.as_slice(), width * 0.5)
        }
        Primitive::Dot { center, radius, .. } => {
            return Rect::from_center_size(*center, (radius * 2.0, radius * 2.0));
        }
    };
    points
        .iter()
        .map(|&pt| Rect::from_points(pt, pt))
        .reduce(|a, b| a.union(b))
        .unwrap_or(Rect::ZERO)
        .inflate(pad, pad)
}

#[cfg(test)]
#[path = "../../tests/unit/compose/compositor.rs"]
mod tests;

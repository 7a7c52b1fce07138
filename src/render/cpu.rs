use std::collections::HashMap;
use std::sync::Arc;

use kurbo::{Cap, Join, Shape, Stroke, StrokeOpts};

use crate::assets::{AssetStore, PreparedImage};
use crate::compose::{ContentGroup, Layer, NodeContent, RenderNode, RenderTree};
use crate::foundation::color::Color;
use crate::foundation::core::{Affine, BezPath, Canvas, Point, Rect, Vec2};
use crate::foundation::error::{PlateError, PlateResult};
use crate::model::ElementId;
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::render::composite::{dest_out_in_place, fill, over_in_place};
use crate::selection::{HandleKind, HandleSet};
use crate::stroke::Primitive;

const TOLERANCE: f64 = 0.1;
const IMAGE_CACHE_LIMIT: usize = 64;
const HANDLE_FILL: Color = Color::WHITE;
const HANDLE_EDGE: Color = Color::rgb(0x1E, 0x6F, 0xD9);

/// Software rasterizer built on `vello_cpu`.
///
/// Each draw batch renders into a fresh pixmap that is then composited onto the layer buffer in
/// premultiplied space; the content group is masked once at its root before landing on the frame.
#[derive(Default)]
pub struct CpuRenderer {
    ctx: Option<vello_cpu::RenderContext>,
    images: HashMap<usize, (Arc<Vec<u8>>, vello_cpu::Image)>,
    font: Option<(Arc<Vec<u8>>, vello_cpu::peniko::FontData)>,
}

impl std::fmt::Debug for CpuRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuRenderer")
            .field("cached_images", &self.images.len())
            .field("font", &self.font.is_some())
            .finish_non_exhaustive()
    }
}

enum Item<'a> {
    Node(&'a RenderNode),
    Prim {
        owner: Option<ElementId>,
        prim: &'a Primitive,
    },
}

impl Item<'_> {
    fn is_clear(&self) -> bool {
        matches!(
            self,
            Item::Prim {
                prim: Primitive::Clear { .. },
                ..
            }
        )
    }

    fn owner(&self) -> Option<ElementId> {
        match self {
            Item::Node(n) => n.element,
            Item::Prim { owner, .. } => *owner,
        }
    }
}

fn flatten<'a>(node: &'a RenderNode, owner: Option<ElementId>, out: &mut Vec<Item<'a>>) {
    let owner = node.element.or(owner);
    match &node.content {
        NodeContent::Primitives(prims) => {
            out.extend(prims.iter().map(|prim| Item::Prim { owner, prim }));
        }
        NodeContent::Group(children) => {
            for child in children {
                flatten(child, owner, out);
            }
        }
        _ => out.push(Item::Node(node)),
    }
}

impl CpuRenderer {
    /// Renderer with no cached state.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PlateResult<R>,
    ) -> PlateResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(self, &mut ctx);
        self.ctx = Some(ctx);
        out
    }

    /// Run `draw` into a fresh pixmap and return its premultiplied bytes.
    fn raster(
        &mut self,
        surface: Canvas,
        draw: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PlateResult<()>,
    ) -> PlateResult<vello_cpu::Pixmap> {
        let (w, h) = surface.as_u16()?;
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        self.with_ctx_mut(w, h, |this, ctx| {
            draw(this, ctx)?;
            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;
        Ok(pixmap)
    }

    /// Draw a batch and composite it over `dst`.
    fn pass_over(
        &mut self,
        surface: Canvas,
        dst: &mut [u8],
        draw: impl FnOnce(&mut Self, &mut vello_cpu::RenderContext) -> PlateResult<()>,
    ) -> PlateResult<()> {
        let pixmap = self.raster(surface, draw)?;
        over_in_place(dst, pixmap.data_as_u8_slice(), 1.0)
    }

    #[tracing::instrument(skip_all, fields(children = group.children.len(), clipped = group.clip.is_some()))]
    fn render_content(
        &mut self,
        group: &ContentGroup,
        surface: Canvas,
        assets: &mut AssetStore,
    ) -> PlateResult<Vec<u8>> {
        let mut items = Vec::new();
        for node in &group.children {
            flatten(node, None, &mut items);
        }

        let mut buf = vec![0u8; surface.rgba_len()];
        let mut start = 0;
        while start < items.len() {
            let end = items[start..]
                .iter()
                .position(Item::is_clear)
                .map_or(items.len(), |i| start + i);

            let batch = &items[start..end];
            if !batch.is_empty() {
                self.pass_over(surface, &mut buf, |this, ctx| {
                    for item in batch {
                        if let Err(err) = this.draw_item(ctx, item, assets) {
                            tracing::warn!(owner = ?item.owner(), error = %err, "skipping node at render");
                        }
                    }
                    Ok(())
                })?;
            }

            if let Some(Item::Prim {
                prim: Primitive::Clear { points, width },
                ..
            }) = items.get(end)
            {
                let eraser = self.raster(surface, |_, ctx| {
                    fill_polyline(ctx, points, *width, Color::WHITE, 1.0);
                    Ok(())
                })?;
                dest_out_in_place(&mut buf, eraser.data_as_u8_slice())?;
            }
            start = end + 1;
        }

        if let Some(clip) = &group.clip {
            clip.apply(&mut buf)?;
        }
        Ok(buf)
    }

    fn draw_item(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        item: &Item<'_>,
        assets: &mut AssetStore,
    ) -> PlateResult<()> {
        match item {
            Item::Prim { prim, .. } => {
                ctx.set_transform(affine_to_cpu(Affine::IDENTITY));
                match prim {
                    Primitive::Polyline {
                        points,
                        width,
                        color,
                        opacity,
                    } => fill_polyline(ctx, points, *width, *color, *opacity),
                    Primitive::Dot {
                        center,
                        radius,
                        color,
                        opacity,
                    } => fill_bezpath(
                        ctx,
                        &kurbo::Circle::new(*center, *radius).to_path(TOLERANCE),
                        *color,
                        *opacity,
                    ),
                    Primitive::Clear { .. } => {}
                }
                Ok(())
            }
            Item::Node(node) => self.draw_node(ctx, node, assets),
        }
    }

    fn draw_node(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        node: &RenderNode,
        assets: &mut AssetStore,
    ) -> PlateResult<()> {
        match &node.content {
            NodeContent::Image {
                image,
                size,
                transform,
            } => {
                let sx = size.width / f64::from(image.width);
                let sy = size.height / f64::from(image.height);
                self.draw_image(ctx, image, *transform * Affine::scale_non_uniform(sx, sy))
            }
            NodeContent::Shape {
                path,
                fill,
                stroke,
                transform,
            } => {
                ctx.set_transform(affine_to_cpu(*transform));
                fill_bezpath(ctx, path, *fill, 1.0);
                if let Some((color, width)) = stroke {
                    let outline = kurbo::stroke(
                        path.iter(),
                        &Stroke::new(*width).with_join(Join::Miter),
                        &StrokeOpts::default(),
                        TOLERANCE,
                    );
                    fill_bezpath(ctx, &outline, *color, 1.0);
                }
                Ok(())
            }
            NodeContent::Text {
                text,
                font_size,
                color,
                width,
                transform,
            } => {
                let font = self.font_for(assets)?;
                let layout = assets
                    .text
                    .layout(text, *font_size as f32, *color, *width as f32)?;
                ctx.set_transform(affine_to_cpu(*transform));
                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };
                        let brush = run.style().brush;
                        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));
                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        ctx.glyph_run(&font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }
                Ok(())
            }
            NodeContent::Primitives(_) | NodeContent::Group(_) => Err(PlateError::render(
                "primitive and group nodes are flattened before drawing",
            )),
        }
    }

    fn draw_image(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        image: &PreparedImage,
        transform: Affine,
    ) -> PlateResult<()> {
        let paint = self.image_paint(image)?;
        ctx.set_transform(affine_to_cpu(transform));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        Ok(())
    }

    fn image_paint(&mut self, image: &PreparedImage) -> PlateResult<vello_cpu::Image> {
        let key = Arc::as_ptr(&image.rgba8_premul) as usize;
        if let Some((_, paint)) = self.images.get(&key) {
            return Ok(paint.clone());
        }
        if self.images.len() >= IMAGE_CACHE_LIMIT {
            self.images.clear();
        }
        let pixmap = pixmap_from_premul_bytes(&image.rgba8_premul, image.width, image.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.images
            .insert(key, (image.rgba8_premul.clone(), paint.clone()));
        Ok(paint)
    }

    fn font_for(&mut self, assets: &AssetStore) -> PlateResult<vello_cpu::peniko::FontData> {
        let bytes = assets
            .font_bytes()
            .ok_or_else(|| PlateError::asset("text element has no registered font"))?;
        if let Some((cached, font)) = &self.font
            && Arc::ptr_eq(cached, bytes)
        {
            return Ok(font.clone());
        }
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(bytes.as_ref().clone()),
            0,
        );
        self.font = Some((bytes.clone(), font.clone()));
        Ok(font)
    }

    fn draw_handles(&mut self, ctx: &mut vello_cpu::RenderContext, set: &HandleSet) {
        ctx.set_transform(affine_to_cpu(Affine::IDENTITY));
        let [tl, tr, br, bl] = set.outline;
        fill_polyline(ctx, &[tl, tr, br, bl, tl], 1.0, HANDLE_EDGE, 1.0);

        if let Some(rot) = set.rotate_handle() {
            fill_polyline(ctx, &[tl.midpoint(tr), rot], 1.0, HANDLE_EDGE, 1.0);
        }
        let half = set.size * 0.5;
        for h in &set.handles {
            match h.kind {
                HandleKind::Resize(_) => {
                    let outer = Rect::from_center_size(h.center, (set.size, set.size));
                    fill_bezpath(ctx, &outer.to_path(TOLERANCE), HANDLE_EDGE, 1.0);
                    let inner = outer.inset(-1.0);
                    if inner.width() > 0.0 {
                        fill_bezpath(ctx, &inner.to_path(TOLERANCE), HANDLE_FILL, 1.0);
                    }
                }
                HandleKind::Rotate => {
                    let circle = kurbo::Circle::new(h.center, half).to_path(TOLERANCE);
                    fill_bezpath(ctx, &circle, HANDLE_EDGE, 1.0);
                    let inner = kurbo::Circle::new(h.center, (half - 1.0).max(0.0));
                    fill_bezpath(ctx, &inner.to_path(TOLERANCE), HANDLE_FILL, 1.0);
                }
            }
        }
    }
}

impl RenderBackend for CpuRenderer {
    #[tracing::instrument(skip_all, fields(w = tree.surface.width, h = tree.surface.height))]
    fn render_tree(&mut self, tree: &RenderTree, assets: &mut AssetStore) -> PlateResult<FrameRGBA> {
        let surface = tree.surface;
        let mut acc = vec![0u8; surface.rgba_len()];

        for layer in &tree.layers {
            match layer {
                Layer::Background(bg) => {
                    fill(&mut acc, bg.color.to_premul().to_array());
                    if let Some((image, rect)) = &bg.image {
                        let transform = Affine::translate(Vec2::new(rect.x0, rect.y0))
                            * Affine::scale_non_uniform(
                                rect.width() / f64::from(image.width),
                                rect.height() / f64::from(image.height),
                            );
                        self.pass_over(surface, &mut acc, |this, ctx| {
                            this.draw_image(ctx, image, transform)
                        })?;
                    }
                }
                Layer::WhiteBacking(rect) => {
                    let rect = *rect;
                    self.pass_over(surface, &mut acc, |_, ctx| {
                        ctx.set_transform(affine_to_cpu(Affine::IDENTITY));
                        ctx.set_paint(Color::WHITE.to_cpu());
                        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                            rect.x0, rect.y0, rect.x1, rect.y1,
                        ));
                        Ok(())
                    })?;
                }
                Layer::GhostFrame(img) | Layer::FrameOverlay(img) => {
                    over_in_place(&mut acc, &img.rgba8_premul, 1.0)?;
                }
                Layer::Content(group) => {
                    let content = self.render_content(group, surface, assets)?;
                    over_in_place(&mut acc, &content, 1.0)?;
                }
                Layer::Handles(Some(set)) => {
                    self.pass_over(surface, &mut acc, |this, ctx| {
                        this.draw_handles(ctx, set);
                        Ok(())
                    })?;
                }
                Layer::Handles(None) => {}
            }
        }

        Ok(FrameRGBA {
            width: surface.width,
            height: surface.height,
            data: acc,
            premultiplied: true,
        })
    }
}

fn paint_color(color: Color, opacity: f32) -> vello_cpu::peniko::Color {
    let a = (f32::from(color.a) * opacity.clamp(0.0, 1.0)).round() as u8;
    Color::rgba(color.r, color.g, color.b, a).to_cpu()
}

fn fill_bezpath(ctx: &mut vello_cpu::RenderContext, path: &BezPath, color: Color, opacity: f32) {
    ctx.set_paint(paint_color(color, opacity));
    ctx.fill_path(&bezpath_to_cpu(path));
}

/// Fill the round-capped, round-joined outline of a polyline. One vertex draws a round dab.
fn fill_polyline(
    ctx: &mut vello_cpu::RenderContext,
    points: &[Point],
    width: f64,
    color: Color,
    opacity: f32,
) {
    match points {
        [] => {}
        [p] => {
            let dab = kurbo::Circle::new(*p, width * 0.5).to_path(TOLERANCE);
            fill_bezpath(ctx, &dab, color, opacity);
        }
        [first, rest @ ..] => {
            let mut line = BezPath::new();
            line.move_to(*first);
            for p in rest {
                line.line_to(*p);
            }
            let style = Stroke::new(width)
                .with_caps(Cap::Round)
                .with_join(Join::Round);
            let outline = kurbo::stroke(line.iter(), &style, &StrokeOpts::default(), TOLERANCE);
            fill_bezpath(ctx, &outline, color, opacity);
        }
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(bytes: &[u8], width: u32, height: u32) -> PlateResult<vello_cpu::Pixmap> {
    let (w, h) = Canvas::new(width, height)?.as_u16()?;
    if bytes.len() != (width as usize) * (height as usize) * 4 {
        return Err(PlateError::render("pixmap byte len mismatch"));
    }
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect();
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

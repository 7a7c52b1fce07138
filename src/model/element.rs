use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Point, Rect, Vec2, is_finite_point};
use crate::foundation::error::{PlateError, PlateResult};
use crate::stroke::scatter_offsets;

/// Unique, immutable element identifier.
pub type ElementId = uuid::Uuid;

/// Operating mode of the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full, unclipped content with a ghost outline guide.
    #[default]
    Base,
    /// Content clipped to the frame's alpha silhouette.
    Plate,
}

/// Paint brush behaviour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrushKind {
    /// Solid polyline.
    Brush,
    /// Soft glow pass under a solid core.
    Airbrush,
    /// Scattered dot clusters.
    Spray,
    /// Removes pigment along the path.
    Eraser,
}

/// Shape element outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Ellipse inscribed in the bounds.
    Ellipse,
    /// Isosceles triangle with its apex at the top edge midpoint.
    Triangle,
    /// Five-point star inscribed in the bounds.
    Star,
}

/// Raster image placed on the canvas.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ImageProps {
    /// Asset-store key of the decoded image.
    pub src: String,
    /// Display width in canvas units.
    pub width: f64,
    /// Display height in canvas units.
    pub height: f64,
}

/// Single-style text block.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextProps {
    /// Text content.
    pub text: String,
    /// Font size in canvas units.
    pub font_size: f64,
    /// Fill color.
    pub color: Color,
    /// Layout box width in canvas units (lines wrap at this width).
    pub width: f64,
    /// Layout box height in canvas units (used for selection bounds).
    pub height: f64,
}

/// Vector shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShapeProps {
    /// Outline kind.
    pub shape: ShapeKind,
    /// Width in canvas units.
    pub width: f64,
    /// Height in canvas units.
    pub height: f64,
    /// Fill color.
    pub fill: Color,
    /// Optional outline color.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    /// Outline width in canvas units.
    #[serde(default)]
    pub stroke_width: f64,
}

/// Freehand paint stroke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaintProps {
    /// Brush behaviour.
    pub brush: BrushKind,
    /// Stroke color (ignored by the eraser).
    pub color: Color,
    /// Nominal stroke width in canvas units.
    pub stroke_width: f64,
    /// Recorded pointer samples in canvas space. Never empty once committed.
    pub points: Vec<Point>,
    /// Spray dot offsets frozen at commit, `points.len() * dots_per_point` entries.
    /// Empty for every other brush.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scatter: Vec<Vec2>,
    /// Seed the scatter was drawn from; reused when a width change needs new dots.
    #[serde(default)]
    pub scatter_seed: u64,
}

/// Dashed guide segment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CenterlineProps {
    /// Segment start in canvas space.
    pub start: Point,
    /// Segment end in canvas space.
    pub end: Point,
    /// Line color.
    pub color: Color,
    /// Line width in canvas units.
    pub stroke_width: f64,
    /// Dash length (and gap length) in canvas units.
    pub dash: f64,
}

/// Variant payload of an [`Element`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ElementKind {
    /// Raster image.
    Image(ImageProps),
    /// Text block.
    Text(TextProps),
    /// Vector shape.
    Shape(ShapeProps),
    /// Paint stroke.
    Paint(PaintProps),
    /// Dashed centerline guide.
    Centerline(CenterlineProps),
}

impl ElementKind {
    /// Lowercase variant name, as used in the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Image(_) => "image",
            Self::Text(_) => "text",
            Self::Shape(_) => "shape",
            Self::Paint(_) => "paint",
            Self::Centerline(_) => "centerline",
        }
    }

    /// Reject geometry that cannot be rendered or hit-tested.
    pub fn validate(&self) -> PlateResult<()> {
        fn positive(what: &str, v: f64) -> PlateResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(PlateError::validation(format!("{what} must be finite and > 0")));
            }
            Ok(())
        }

        match self {
            Self::Image(p) => {
                positive("image width", p.width)?;
                positive("image height", p.height)?;
                if p.src.is_empty() {
                    return Err(PlateError::validation("image src must not be empty"));
                }
            }
            Self::Text(p) => {
                positive("font size", p.font_size)?;
                positive("text width", p.width)?;
                positive("text height", p.height)?;
            }
            Self::Shape(p) => {
                positive("shape width", p.width)?;
                positive("shape height", p.height)?;
                if !p.stroke_width.is_finite() || p.stroke_width < 0.0 {
                    return Err(PlateError::validation("shape stroke width must be >= 0"));
                }
            }
            Self::Paint(p) => {
                positive("stroke width", p.stroke_width)?;
                if p.points.is_empty() {
                    return Err(PlateError::validation("paint element needs at least one point"));
                }
                if !p.points.iter().all(|&pt| is_finite_point(pt)) {
                    return Err(PlateError::validation("paint points must be finite"));
                }
            }
            Self::Centerline(p) => {
                positive("centerline width", p.stroke_width)?;
                positive("centerline dash", p.dash)?;
                if !is_finite_point(p.start) || !is_finite_point(p.end) {
                    return Err(PlateError::validation("centerline endpoints must be finite"));
                }
            }
        }
        Ok(())
    }
}

/// A user-placed element. The element list owns these; render nodes are derived views.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Element {
    /// Identifier assigned at creation.
    pub id: ElementId,
    /// Canvas-space x of the local origin.
    pub x: f64,
    /// Canvas-space y of the local origin.
    pub y: f64,
    /// Clockwise rotation in degrees around the local bounds center.
    #[serde(default)]
    pub rotation: f64,
    /// Mode the element was created in. Elements stay present in both modes.
    pub affinity: Mode,
    /// Variant payload.
    #[serde(flatten)]
    pub kind: ElementKind,
}

impl Element {
    /// Create an element with a fresh id at the canvas origin.
    pub fn new(kind: ElementKind, affinity: Mode) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            affinity,
            kind,
        }
    }

    /// Builder-style placement.
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    /// `true` for paint strokes.
    pub fn is_paint(&self) -> bool {
        matches!(self.kind, ElementKind::Paint(_))
    }

    /// `true` for elements whose geometry is a point list rather than a box.
    pub fn is_point_based(&self) -> bool {
        matches!(self.kind, ElementKind::Paint(_) | ElementKind::Centerline(_))
    }

    /// Geometry bounds in local (unrotated, untranslated) coordinates.
    ///
    /// Point-based elements include half their stroke width so thin strokes stay selectable.
    pub fn local_bounds(&self) -> Rect {
        match &self.kind {
            ElementKind::Image(p) => Rect::new(0.0, 0.0, p.width, p.height),
            ElementKind::Text(p) => Rect::new(0.0, 0.0, p.width, p.height),
            ElementKind::Shape(p) => Rect::new(0.0, 0.0, p.width, p.height),
            ElementKind::Paint(p) => {
                let pad = match p.brush {
                    BrushKind::Airbrush => p.stroke_width * 1.25,
                    BrushKind::Spray => p.stroke_width * 1.5,
                    BrushKind::Brush | BrushKind::Eraser => p.stroke_width * 0.5,
                };
                points_bounds(&p.points).inflate(pad, pad)
            }
            ElementKind::Centerline(p) => {
                let pad = p.stroke_width * 0.5;
                Rect::from_points(p.start, p.end).inflate(pad, pad)
            }
        }
    }

    /// Geometry bounds without stroke padding; the rectangle resize maps from and to.
    pub(crate) fn geometry_bounds(&self) -> Rect {
        match &self.kind {
            ElementKind::Paint(p) => points_bounds(&p.points),
            ElementKind::Centerline(p) => Rect::from_points(p.start, p.end),
            _ => self.local_bounds(),
        }
    }

    /// Local -> canvas transform: rotate about the bounds center, then translate by `(x, y)`.
    pub fn transform(&self) -> Affine {
        let translate = Affine::translate(Vec2::new(self.x, self.y));
        if self.rotation == 0.0 {
            return translate;
        }
        translate * Affine::rotate_about(self.rotation.to_radians(), self.local_bounds().center())
    }

    /// Axis-aligned bounding box in canvas space.
    pub fn canvas_bounds(&self) -> Rect {
        self.transform().transform_rect_bbox(self.local_bounds())
    }

    /// Rotated bounds corners in canvas space, clockwise from the top-left.
    pub fn canvas_corners(&self) -> [Point; 4] {
        let r = self.local_bounds();
        let t = self.transform();
        [
            t * Point::new(r.x0, r.y0),
            t * Point::new(r.x1, r.y0),
            t * Point::new(r.x1, r.y1),
            t * Point::new(r.x0, r.y1),
        ]
    }

    /// Map the element's geometry from its current bounds onto `target` (local coordinates).
    ///
    /// Box-like elements take `target`'s size and shift their origin; point-based elements
    /// rescale every point. A point-based axis with zero extent (a horizontal centerline)
    /// accepts any target extent on that axis and keeps its coordinates. Returns the shift
    /// applied to the local origin.
    pub(crate) fn reshape_local(&mut self, target: Rect) -> PlateResult<Vec2> {
        let from = self.geometry_bounds();
        let flat_ok = self.is_point_based();
        let sized = |to: f64, from: f64| to > 0.0 || (flat_ok && from <= 0.0 && to >= 0.0);
        if !(sized(target.width(), from.width()) && sized(target.height(), from.height())) {
            return Err(PlateError::validation("resize target must have positive size"));
        }
        match &mut self.kind {
            ElementKind::Image(p) => {
                p.width = target.width();
                p.height = target.height();
            }
            ElementKind::Text(p) => {
                p.width = target.width();
                p.height = target.height();
            }
            ElementKind::Shape(p) => {
                p.width = target.width();
                p.height = target.height();
            }
            ElementKind::Paint(p) => {
                let (sx, sy) = rect_scale(from, target);
                let map = rect_map(from, target);
                for pt in &mut p.points {
                    *pt = map(*pt);
                }
                for off in &mut p.scatter {
                    *off = Vec2::new(off.x * sx, off.y * sy);
                }
                return Ok(Vec2::ZERO);
            }
            ElementKind::Centerline(p) => {
                let map = rect_map(from, target);
                p.start = map(p.start);
                p.end = map(p.end);
                return Ok(Vec2::ZERO);
            }
        }
        let shift = target.origin().to_vec2();
        self.x += shift.x;
        self.y += shift.y;
        Ok(shift)
    }

    /// [`Self::reshape_local`], then translate so local point `pin` (old bounds) keeps its
    /// canvas position once mapped into `target`.
    pub(crate) fn reshape_pinned(&mut self, target: Rect, pin: Point) -> PlateResult<()> {
        let from = self.geometry_bounds();
        let before = self.transform() * pin;
        let shift = self.reshape_local(target)?;
        let after = self.transform() * (rect_map(from, target)(pin) - shift);
        self.x += before.x - after.x;
        self.y += before.y - after.y;
        Ok(())
    }
}

/// Sparse update. Only present fields are applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementPatch {
    /// New canvas x.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    /// New canvas y.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// New rotation in degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    /// New width (box-like elements) or bounds width (point-based elements).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// New height (box-like elements) or bounds height (point-based elements).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Recolor: text, paint and centerline color, or shape fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// Shape outline color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Color>,
    /// Stroke width of paint, centerline or shape outline.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    /// Text content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Text font size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Image asset key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
}

impl ElementPatch {
    /// Apply to `el`, rejecting fields that do not exist on its variant.
    ///
    /// The element is left untouched when the patch or the patched result is invalid.
    pub fn apply(&self, el: &mut Element) -> PlateResult<()> {
        let mut next = el.clone();
        self.apply_in_place(&mut next)?;
        next.kind.validate()?;
        *el = next;
        Ok(())
    }

    fn apply_in_place(&self, el: &mut Element) -> PlateResult<()> {
        let kind = el.kind.name();
        let reject = |field: &str| {
            Err(PlateError::validation(format!(
                "field '{field}' does not apply to {kind} elements"
            )))
        };

        for (name, v) in [("x", self.x), ("y", self.y), ("rotation", self.rotation)] {
            if let Some(v) = v
                && !v.is_finite()
            {
                return Err(PlateError::validation(format!("{name} must be finite")));
            }
        }
        if let Some(x) = self.x {
            el.x = x;
        }
        if let Some(y) = self.y {
            el.y = y;
        }
        if let Some(r) = self.rotation {
            el.rotation = r;
        }

        match &mut el.kind {
            ElementKind::Image(p) => {
                if self.color.is_some() {
                    return reject("color");
                }
                if self.stroke.is_some() {
                    return reject("stroke");
                }
                if self.stroke_width.is_some() {
                    return reject("stroke_width");
                }
                if self.text.is_some() {
                    return reject("text");
                }
                if self.font_size.is_some() {
                    return reject("font_size");
                }
                if let Some(src) = &self.src {
                    p.src.clone_from(src);
                }
                if let Some(w) = self.width {
                    p.width = w;
                }
                if let Some(h) = self.height {
                    p.height = h;
                }
            }
            ElementKind::Text(p) => {
                if self.stroke.is_some() {
                    return reject("stroke");
                }
                if self.stroke_width.is_some() {
                    return reject("stroke_width");
                }
                if self.src.is_some() {
                    return reject("src");
                }
                if let Some(c) = self.color {
                    p.color = c;
                }
                if let Some(t) = &self.text {
                    p.text.clone_from(t);
                }
                if let Some(s) = self.font_size {
                    p.font_size = s;
                }
                if let Some(w) = self.width {
                    p.width = w;
                }
                if let Some(h) = self.height {
                    p.height = h;
                }
            }
            ElementKind::Shape(p) => {
                if self.text.is_some() {
                    return reject("text");
                }
                if self.font_size.is_some() {
                    return reject("font_size");
                }
                if self.src.is_some() {
                    return reject("src");
                }
                if let Some(c) = self.color {
                    p.fill = c;
                }
                if let Some(c) = self.stroke {
                    p.stroke = Some(c);
                }
                if let Some(w) = self.stroke_width {
                    p.stroke_width = w;
                }
                if let Some(w) = self.width {
                    p.width = w;
                }
                if let Some(h) = self.height {
                    p.height = h;
                }
            }
            ElementKind::Paint(p) => {
                self.reject_for_strokes(kind)?;
                if let Some(c) = self.color {
                    p.color = c;
                }
                if let Some(w) = self.stroke_width {
                    p.stroke_width = w;
                    if p.brush == BrushKind::Spray && w.is_finite() && w > 0.0 {
                        p.scatter = scatter_offsets(p.points.len(), w, p.scatter_seed);
                    }
                }
            }
            ElementKind::Centerline(p) => {
                self.reject_for_strokes(kind)?;
                if let Some(c) = self.color {
                    p.color = c;
                }
                if let Some(w) = self.stroke_width {
                    p.stroke_width = w;
                }
            }
        }

        if el.is_point_based() && (self.width.is_some() || self.height.is_some()) {
            let from = el.geometry_bounds();
            let w = self.width.unwrap_or(from.width());
            let h = self.height.unwrap_or(from.height());
            let target = Rect::new(from.x0, from.y0, from.x0 + w, from.y0 + h);
            el.reshape_pinned(target, from.origin())?;
        }
        Ok(())
    }
}

impl ElementPatch {
    fn reject_for_strokes(&self, kind: &str) -> PlateResult<()> {
        let present = [
            ("stroke", self.stroke.is_some()),
            ("text", self.text.is_some()),
            ("font_size", self.font_size.is_some()),
            ("src", self.src.is_some()),
        ];
        match present.iter().find(|(_, set)| *set) {
            Some((field, _)) => Err(PlateError::validation(format!(
                "field '{field}' does not apply to {kind} elements"
            ))),
            None => Ok(()),
        }
    }
}

fn points_bounds(points: &[Point]) -> Rect {
    let Some((&first, rest)) = points.split_first() else {
        return Rect::ZERO;
    };
    rest.iter()
        .fold(Rect::from_points(first, first), |r, &p| r.union_pt(p))
}

/// Per-axis scale taking `from` onto `to`; degenerate axes scale by 1.
fn rect_scale(from: Rect, to: Rect) -> (f64, f64) {
    let axis = |to: f64, from: f64| if from > 0.0 { to / from } else { 1.0 };
    (axis(to.width(), from.width()), axis(to.height(), from.height()))
}

/// Affine map taking `from` onto `to`; degenerate axes keep their coordinate offset.
fn rect_map(from: Rect, to: Rect) -> impl Fn(Point) -> Point {
    let (sx, sy) = rect_scale(from, to);
    move |p| {
        Point::new(
            to.x0 + (p.x - from.x0) * sx,
            to.y0 + (p.y - from.y0) * sy,
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/model/element.rs"]
mod tests;

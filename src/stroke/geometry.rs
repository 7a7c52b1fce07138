use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::core::{Affine, Point, Vec2};
use crate::foundation::math::hash_unit;
use crate::model::{BrushKind, PaintProps};

/// Outer airbrush pass width relative to the nominal stroke width.
pub const AIRBRUSH_GLOW_SCALE: f64 = 2.5;
/// Opacity of the outer airbrush pass.
pub const AIRBRUSH_GLOW_OPACITY: f32 = 0.3;

/// Brush settings a stroke is generated with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Brush behaviour.
    pub brush: BrushKind,
    /// Pigment color.
    pub color: Color,
    /// Nominal width in canvas units.
    pub width: f64,
}

/// One drawable stroke primitive, in render space.
///
/// A generated primitive list is always flat: primitives never contain other primitives.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    /// Round-capped, round-joined polyline. A single vertex draws a round dab.
    Polyline {
        /// Vertices in render space.
        points: Vec<Point>,
        /// Line width in render pixels.
        width: f64,
        /// Pigment.
        color: Color,
        /// Extra opacity multiplier.
        opacity: f32,
    },
    /// Filled circle.
    Dot {
        /// Center in render space.
        center: Point,
        /// Radius in render pixels.
        radius: f64,
        /// Pigment.
        color: Color,
        /// Extra opacity multiplier.
        opacity: f32,
    },
    /// Removes pigment under a round-capped polyline.
    Clear {
        /// Vertices in render space.
        points: Vec<Point>,
        /// Line width in render pixels.
        width: f64,
    },
}

/// Per-point dot cluster parameters for the spray brush, in canvas units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SprayDensity {
    /// Dots generated around each recorded point.
    pub dots_per_point: usize,
    /// Maximum distance of a dot from its point.
    pub scatter_radius: f64,
    /// Radius of each dot.
    pub dot_radius: f64,
}

impl SprayDensity {
    /// Derive cluster parameters from the nominal stroke width.
    pub fn for_width(width: f64) -> Self {
        let width = if width.is_finite() { width.max(0.0) } else { 0.0 };
        Self {
            dots_per_point: ((width * 2.0).round() as usize).clamp(8, 64),
            scatter_radius: width * 1.5,
            dot_radius: (width / 8.0).max(0.5),
        }
    }
}

/// Deterministic scatter offsets for `n_points` recorded points, `dots_per_point` each.
///
/// Offsets are uniform over the scatter disc; the same `(n_points, width, seed)` always
/// produces the same offsets, and a longer stroke extends a shorter one's prefix.
pub fn scatter_offsets(n_points: usize, width: f64, seed: u64) -> Vec<Vec2> {
    let density = SprayDensity::for_width(width);
    let mut out = Vec::with_capacity(n_points * density.dots_per_point);
    for i in 0..n_points {
        for j in 0..density.dots_per_point {
            let (a, b) = (i as u64, j as u64);
            let angle = hash_unit(seed, a, b * 2) * TAU;
            let r = density.scatter_radius * hash_unit(seed, a, b * 2 + 1).sqrt();
            out.push(Vec2::new(r * angle.cos(), r * angle.sin()));
        }
    }
    out
}

/// Generate the primitives of a paint stroke.
///
/// `to_render` maps the stroke's local points into render space and `scale` is the
/// render-pixels-per-canvas-unit factor applied to widths and radii. The live preview and
/// committed elements both go through this function, so they place vertices identically.
pub fn paint_primitives(props: &PaintProps, to_render: Affine, scale: f64) -> Vec<Primitive> {
    if props.points.is_empty() {
        return Vec::new();
    }
    let width = props.stroke_width * scale;
    let mapped = || props.points.iter().map(|&p| to_render * p).collect::<Vec<_>>();

    match props.brush {
        BrushKind::Brush => vec![Primitive::Polyline {
            points: mapped(),
            width,
            color: props.color,
            opacity: 1.0,
        }],
        BrushKind::Airbrush => {
            let points = mapped();
            vec![
                Primitive::Polyline {
                    points: points.clone(),
                    width: width * AIRBRUSH_GLOW_SCALE,
                    color: props.color,
                    opacity: AIRBRUSH_GLOW_OPACITY,
                },
                Primitive::Polyline {
                    points,
                    width,
                    color: props.color,
                    opacity: 1.0,
                },
            ]
        }
        BrushKind::Spray => spray(props, to_render, scale),
        BrushKind::Eraser => vec![Primitive::Clear {
            points: mapped(),
            width,
        }],
    }
}

fn spray(props: &PaintProps, to_render: Affine, scale: f64) -> Vec<Primitive> {
    let density = SprayDensity::for_width(props.stroke_width);
    let expected = props.points.len() * density.dots_per_point;
    let regenerated;
    let offsets = if props.scatter.len() == expected {
        &props.scatter
    } else {
        regenerated =
            scatter_offsets(props.points.len(), props.stroke_width, props.scatter_seed);
        &regenerated
    };

    let radius = density.dot_radius * scale;
    props
        .points
        .iter()
        .zip(offsets.chunks_exact(density.dots_per_point))
        .flat_map(|(&p, cluster)| {
            cluster.iter().map(move |&off| Primitive::Dot {
                center: to_render * (p + off),
                radius,
                color: props.color,
                opacity: 1.0,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/stroke/geometry.rs"]
mod tests;

use std::f64::consts::{FRAC_PI_2, PI};

use kurbo::Shape;

use crate::foundation::core::{BezPath, Point, Rect};
use crate::model::ShapeKind;

/// Outline of `kind` inscribed in `bounds`.
pub(crate) fn shape_path(kind: ShapeKind, bounds: Rect) -> BezPath {
    match kind {
        ShapeKind::Rect => bounds.to_path(0.1),
        ShapeKind::Ellipse => kurbo::Ellipse::from_rect(bounds).to_path(0.1),
        ShapeKind::Triangle => polygon(&[
            Point::new(bounds.center().x, bounds.y0),
            Point::new(bounds.x1, bounds.y1),
            Point::new(bounds.x0, bounds.y1),
        ]),
        ShapeKind::Star => {
            let c = bounds.center();
            let (rx, ry) = (bounds.width() * 0.5, bounds.height() * 0.5);
            let points: Vec<Point> = (0..10)
                .map(|i| {
                    let r = if i % 2 == 0 { 1.0 } else { 0.4 };
                    let a = -FRAC_PI_2 + f64::from(i) * PI / 5.0;
                    Point::new(c.x + rx * r * a.cos(), c.y + ry * r * a.sin())
                })
                .collect();
            polygon(&points)
        }
    }
}

/// Dash segments of `start -> end`, alternating `dash` on and `dash` off.
pub(crate) fn dash_segments(start: Point, end: Point, dash: f64) -> Vec<(Point, Point)> {
    let len = (end - start).hypot();
    if len <= f64::EPSILON || dash.is_nan() || dash <= 0.0 {
        return vec![(start, end)];
    }
    let dir = (end - start) / len;
    let mut out = Vec::new();
    let mut t = 0.0;
    while t < len {
        let t1 = (t + dash).min(len);
        out.push((start + dir * t, start + dir * t1));
        t += dash * 2.0;
    }
    out
}

fn polygon(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    if let Some((&first, rest)) = points.split_first() {
        path.move_to(first);
        for &p in rest {
            path.line_to(p);
        }
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/compose/shapes.rs"]
mod tests;

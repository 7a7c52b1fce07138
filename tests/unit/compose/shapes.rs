use super::*;

#[test]
fn dashes_alternate_and_clip_to_end() {
    let segs = dash_segments(Point::new(0.0, 0.0), Point::new(25.0, 0.0), 5.0);
    let xs: Vec<(f64, f64)> = segs.iter().map(|(a, b)| (a.x, b.x)).collect();
    assert_eq!(xs, vec![(0.0, 5.0), (10.0, 15.0), (20.0, 25.0)]);
}

#[test]
fn degenerate_centerline_is_one_segment() {
    let p = Point::new(3.0, 3.0);
    assert_eq!(dash_segments(p, p, 4.0), vec![(p, p)]);
}

#[test]
fn shapes_stay_inside_bounds() {
    let r = Rect::new(0.0, 0.0, 40.0, 20.0);
    for kind in [ShapeKind::Rect, ShapeKind::Ellipse, ShapeKind::Triangle, ShapeKind::Star] {
        let bb = shape_path(kind, r).bounding_box();
        assert!(bb.x0 >= -1e-9 && bb.y0 >= -1e-9, "{kind:?}");
        assert!(bb.x1 <= 40.0 + 1e-9 && bb.y1 <= 20.0 + 1e-9, "{kind:?}");
    }
}

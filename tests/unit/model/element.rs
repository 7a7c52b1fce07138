use super::*;

fn paint(points: Vec<Point>) -> Element {
    Element::new(
        ElementKind::Paint(PaintProps {
            brush: BrushKind::Brush,
            color: Color::rgb(255, 0, 0),
            stroke_width: 4.0,
            points,
            scatter: Vec::new(),
            scatter_seed: 0,
        }),
        Mode::Base,
    )
}

fn rect(w: f64, h: f64) -> Element {
    Element::new(
        ElementKind::Shape(ShapeProps {
            shape: ShapeKind::Rect,
            width: w,
            height: h,
            fill: Color::BLACK,
            stroke: None,
            stroke_width: 0.0,
        }),
        Mode::Plate,
    )
}

#[test]
fn serde_uses_type_tag_and_hex_colors() {
    let el = rect(10.0, 5.0).at(3.0, 4.0);
    let v = serde_json::to_value(&el).unwrap();
    assert_eq!(v["type"], "shape");
    assert_eq!(v["shape"], "rect");
    assert_eq!(v["fill"], "#000000");
    assert_eq!(v["affinity"], "plate");
    let back: Element = serde_json::from_value(v).unwrap();
    assert_eq!(back, el);
}

#[test]
fn unrotated_bounds_are_translated_local_bounds() {
    let el = rect(10.0, 5.0).at(3.0, 4.0);
    assert_eq!(el.canvas_bounds(), Rect::new(3.0, 4.0, 13.0, 9.0));
}

#[test]
fn rotation_pivots_on_center() {
    let mut el = rect(10.0, 10.0).at(0.0, 0.0);
    el.rotation = 90.0;
    let b = el.canvas_bounds();
    assert!((b.x0 - 0.0).abs() < 1e-9 && (b.x1 - 10.0).abs() < 1e-9);
    let c = el.canvas_corners();
    // Top-left corner rotates clockwise onto the top-right.
    assert!((c[0].x - 10.0).abs() < 1e-9 && c[0].y.abs() < 1e-9);
}

#[test]
fn paint_bounds_include_half_stroke() {
    let el = paint(vec![Point::new(10.0, 10.0), Point::new(20.0, 10.0)]);
    assert_eq!(el.local_bounds(), Rect::new(8.0, 8.0, 22.0, 12.0));
}

#[test]
fn empty_paint_is_invalid() {
    assert!(paint(Vec::new()).kind.validate().is_err());
    assert!(paint(vec![Point::new(f64::NAN, 0.0)]).kind.validate().is_err());
    assert!(paint(vec![Point::new(1.0, 1.0)]).kind.validate().is_ok());
}

#[test]
fn patch_rejects_foreign_fields_and_leaves_element_untouched() {
    let mut el = rect(10.0, 5.0);
    let before = el.clone();
    let patch = ElementPatch {
        x: Some(50.0),
        text: Some("nope".to_owned()),
        ..ElementPatch::default()
    };
    let err = patch.apply(&mut el).unwrap_err();
    assert!(err.to_string().contains("text"));
    assert_eq!(el, before);
}

#[test]
fn patch_rejects_invalid_result() {
    let mut el = rect(10.0, 5.0);
    let patch = ElementPatch {
        width: Some(-1.0),
        ..ElementPatch::default()
    };
    assert!(patch.apply(&mut el).is_err());
    assert_eq!(el.local_bounds().width(), 10.0);
}

#[test]
fn patch_recolors_shape_fill() {
    let mut el = rect(10.0, 5.0);
    ElementPatch {
        color: Some(Color::WHITE),
        rotation: Some(15.0),
        ..ElementPatch::default()
    }
    .apply(&mut el)
    .unwrap();
    let ElementKind::Shape(p) = &el.kind else {
        panic!("shape expected");
    };
    assert_eq!(p.fill, Color::WHITE);
    assert_eq!(el.rotation, 15.0);
}

#[test]
fn patch_resizes_paint_by_mapping_points() {
    let mut el = paint(vec![Point::new(10.0, 10.0), Point::new(20.0, 20.0)]);
    ElementPatch {
        width: Some(20.0),
        ..ElementPatch::default()
    }
    .apply(&mut el)
    .unwrap();
    let ElementKind::Paint(p) = &el.kind else {
        panic!("paint expected");
    };
    assert_eq!(p.points, vec![Point::new(10.0, 10.0), Point::new(30.0, 20.0)]);
}

#[test]
fn reshape_box_moves_origin() {
    let mut el = rect(10.0, 10.0).at(5.0, 5.0);
    el.reshape_local(Rect::new(-2.0, 0.0, 8.0, 20.0)).unwrap();
    assert_eq!(el.x, 3.0);
    assert_eq!(el.canvas_bounds(), Rect::new(3.0, 5.0, 13.0, 25.0));
}

fn centerline(start: Point, end: Point) -> Element {
    Element::new(
        ElementKind::Centerline(CenterlineProps {
            start,
            end,
            color: Color::BLACK,
            stroke_width: 2.0,
            dash: 8.0,
        }),
        Mode::Plate,
    )
}

fn spray(points: Vec<Point>, width: f64, seed: u64) -> Element {
    let scatter = scatter_offsets(points.len(), width, seed);
    Element::new(
        ElementKind::Paint(PaintProps {
            brush: BrushKind::Spray,
            color: Color::BLACK,
            stroke_width: width,
            points,
            scatter,
            scatter_seed: seed,
        }),
        Mode::Base,
    )
}

#[test]
fn horizontal_centerline_resizes_along_its_length() {
    let mut el = centerline(Point::new(100.0, 110.0), Point::new(900.0, 110.0));
    ElementPatch {
        width: Some(400.0),
        ..ElementPatch::default()
    }
    .apply(&mut el)
    .unwrap();
    let ElementKind::Centerline(p) = &el.kind else {
        panic!("centerline expected");
    };
    assert_eq!(p.start, Point::new(100.0, 110.0));
    assert_eq!(p.end, Point::new(500.0, 110.0));
}

#[test]
fn single_point_stroke_accepts_resize() {
    let mut el = paint(vec![Point::new(7.0, 9.0)]);
    ElementPatch {
        width: Some(10.0),
        height: Some(4.0),
        ..ElementPatch::default()
    }
    .apply(&mut el)
    .unwrap();
    let ElementKind::Paint(p) = &el.kind else {
        panic!("paint expected");
    };
    assert_eq!(p.points, vec![Point::new(7.0, 9.0)]);
}

#[test]
fn flat_box_resize_is_still_rejected() {
    let mut el = rect(10.0, 5.0);
    assert!(el.reshape_local(Rect::new(0.0, 0.0, 10.0, 0.0)).is_err());
}

#[test]
fn spray_width_change_redraws_scatter_from_its_seed() {
    let pts = vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
    let mut el = spray(pts.clone(), 4.0, 7);
    ElementPatch {
        stroke_width: Some(10.0),
        ..ElementPatch::default()
    }
    .apply(&mut el)
    .unwrap();
    let ElementKind::Paint(p) = &el.kind else {
        panic!("paint expected");
    };
    assert_eq!(p.scatter, scatter_offsets(pts.len(), 10.0, 7));
    assert_ne!(p.scatter, scatter_offsets(pts.len(), 10.0, 0));
}

#[test]
fn spray_resize_scales_frozen_scatter() {
    let mut el = spray(vec![Point::new(0.0, 0.0), Point::new(10.0, 10.0)], 4.0, 3);
    let before = match &el.kind {
        ElementKind::Paint(p) => p.scatter.clone(),
        _ => panic!("paint expected"),
    };
    ElementPatch {
        width: Some(20.0),
        ..ElementPatch::default()
    }
    .apply(&mut el)
    .unwrap();
    let ElementKind::Paint(p) = &el.kind else {
        panic!("paint expected");
    };
    assert_eq!(p.scatter.len(), before.len());
    for (after, orig) in p.scatter.iter().zip(&before) {
        assert!((after.x - orig.x * 2.0).abs() < 1e-9);
        assert!((after.y - orig.y).abs() < 1e-9);
    }
}

use super::*;
use crate::foundation::color::Color;

fn style(brush: BrushKind) -> StrokeStyle {
    StrokeStyle {
        brush,
        color: Color::rgb(255, 0, 0),
        width: 4.0,
    }
}

#[test]
fn zero_point_commit_yields_nothing() {
    let mut cap = StrokeCapture::default();
    assert!(cap.commit(Mode::Base).is_none());

    assert!(cap.begin(style(BrushKind::Brush), 1));
    assert!(!cap.append(Point::new(f64::NAN, 1.0)));
    assert!(cap.commit(Mode::Base).is_none());
    assert!(!cap.is_active());
}

#[test]
fn commit_keeps_exact_points() {
    let mut cap = StrokeCapture::default();
    cap.begin(style(BrushKind::Brush), 1);
    let pts = [Point::new(10.0, 10.0), Point::new(20.0, 10.0), Point::new(20.0, 20.0)];
    for p in pts {
        assert!(cap.append(p));
    }
    let el = cap.commit(Mode::Plate).unwrap();
    assert_eq!(el.affinity, Mode::Plate);
    let ElementKind::Paint(p) = &el.kind else {
        panic!("paint expected");
    };
    assert_eq!(p.points, pts.to_vec());
    assert!(p.scatter.is_empty());
}

#[test]
fn second_begin_is_refused() {
    let mut cap = StrokeCapture::default();
    assert!(cap.begin(style(BrushKind::Brush), 1));
    cap.append(Point::new(1.0, 1.0));
    assert!(!cap.begin(style(BrushKind::Spray), 2));
    assert_eq!(cap.active().unwrap().points().len(), 1);
}

#[test]
fn append_without_stroke_is_ignored() {
    let mut cap = StrokeCapture::default();
    assert!(!cap.append(Point::new(1.0, 1.0)));
}

#[test]
fn spray_commit_freezes_preview_positions() {
    let mut cap = StrokeCapture::default();
    cap.begin(style(BrushKind::Spray), 77);
    cap.append(Point::new(10.0, 10.0));
    cap.append(Point::new(12.0, 10.0));
    let vp = Viewport::new(1.0, 0.0);
    let preview = cap.preview(vp);
    assert_eq!(preview, cap.preview(vp));

    let el = cap.commit(Mode::Base).unwrap();
    let ElementKind::Paint(p) = &el.kind else {
        panic!("paint expected");
    };
    assert_eq!(p.scatter.len(), preview.len());
    let committed = paint_primitives(p, vp.affine() * el.transform(), vp.zoom());
    assert_eq!(committed, preview);
}

use super::*;
use crate::foundation::color::Color;
use crate::model::{Mode, PaintProps, ShapeKind, ShapeProps};
use crate::selection::{HandleStyle, ResizeAnchor};

fn rect_at(x: f64, y: f64) -> Element {
    Element::new(
        ElementKind::Shape(ShapeProps {
            shape: ShapeKind::Rect,
            width: 20.0,
            height: 20.0,
            fill: Color::BLACK,
            stroke: None,
            stroke_width: 0.0,
        }),
        Mode::Base,
    )
    .at(x, y)
}

fn stroke(brush: BrushKind) -> Element {
    Element::new(
        ElementKind::Paint(PaintProps {
            brush,
            color: Color::BLACK,
            stroke_width: 4.0,
            points: vec![Point::new(100.0, 10.0), Point::new(140.0, 10.0)],
            scatter: Vec::new(),
            scatter_seed: 0,
        }),
        Mode::Base,
    )
}

#[test]
fn topmost_element_wins() {
    let below = rect_at(0.0, 0.0);
    let above = rect_at(10.0, 10.0);
    let above_id = above.id;
    let list = ElementList::from_elements(vec![below, above]).unwrap();
    let vp = Viewport::new(1.0, 0.0);
    let hit = hit_test(Point::new(15.0, 15.0), &list, vp, None).unwrap();
    assert_eq!(hit, Hit { id: above_id, part: HitPart::Body });
    assert!(hit_test(Point::new(50.0, 50.0), &list, vp, None).is_none());
}

#[test]
fn hit_uses_inverse_viewport() {
    let el = rect_at(0.0, 0.0);
    let id = el.id;
    let list = ElementList::from_elements(vec![el]).unwrap();
    let vp = Viewport::new(2.0, 40.0);
    // Canvas (10, 10) renders at (20, 60).
    assert_eq!(hit_test(Point::new(20.0, 60.0), &list, vp, None).unwrap().id, id);
    assert!(hit_test(Point::new(20.0, 20.0), &list, vp, None).is_none());
}

#[test]
fn handles_take_priority() {
    let el = rect_at(0.0, 0.0);
    let id = el.id;
    let list = ElementList::from_elements(vec![el]).unwrap();
    let corners = [
        Point::new(0.0, 0.0),
        Point::new(20.0, 0.0),
        Point::new(20.0, 20.0),
        Point::new(0.0, 20.0),
    ];
    let set = HandleSet::around(
        id,
        corners,
        1.0,
        HandleStyle {
            base_size: 10.0,
            rotate_offset: 24.0,
        },
    );
    let hit = hit_test(Point::new(20.0, 20.0), &list, Viewport::default(), Some(&set)).unwrap();
    assert_eq!(hit.part, HitPart::Handle(HandleKind::Resize(ResizeAnchor::Se)));
}

#[test]
fn strokes_hit_within_half_width_plus_slop() {
    let el = stroke(BrushKind::Brush);
    assert!(element_contains(&el, Point::new(120.0, 12.0), 0.0));
    assert!(!element_contains(&el, Point::new(120.0, 13.0), 0.0));
    assert!(element_contains(&el, Point::new(120.0, 13.0), 2.0));
    assert!(element_contains(&el, Point::new(99.0, 10.0), 0.0));
}

#[test]
fn eraser_strokes_are_never_hit() {
    assert!(!element_contains(&stroke(BrushKind::Eraser), Point::new(120.0, 10.0), 10.0));
}

#[test]
fn rotated_box_uses_local_frame() {
    let mut el = rect_at(0.0, 0.0);
    el.rotation = 45.0;
    // Corner of the unrotated box falls outside the rotated diamond.
    assert!(!element_contains(&el, Point::new(1.0, 1.0), 0.0));
    assert!(element_contains(&el, Point::new(10.0, 10.0), 0.0));
}

use super::*;

#[test]
fn surface_includes_vertical_padding() {
    let l = RenderLayout::new(Size::new(100.0, 50.0), Viewport::new(2.0, 10.0)).unwrap();
    assert_eq!(l.surface, Canvas::new(200, 120).unwrap());
    assert_eq!(l.plate_rect, Rect::new(0.0, 10.0, 200.0, 110.0));
    assert_eq!(l.plate_pixels(), (0, 10, 200, 100));
}

#[test]
fn rejects_degenerate_canvas() {
    assert!(RenderLayout::new(Size::new(0.0, 50.0), Viewport::default()).is_err());
    assert!(RenderLayout::new(Size::new(f64::NAN, 50.0), Viewport::default()).is_err());
}

use super::*;

#[test]
fn canvas_rejects_zero_and_oversized() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(70_000, 10).is_err());
    let c = Canvas::new(4, 3).unwrap();
    assert_eq!(c.pixel_count(), 12);
    assert_eq!(c.rgba_len(), 48);
    assert_eq!(c.as_u16().unwrap(), (4, 3));
}

#[test]
fn premultiply_rounds_to_nearest() {
    let p = Rgba8Premul::from_straight_rgba(255, 100, 0, 128);
    assert_eq!(p.to_array(), [128, 50, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}

#[test]
fn finite_point_check() {
    assert!(is_finite_point(Point::new(1.0, -2.0)));
    assert!(!is_finite_point(Point::new(f64::NAN, 0.0)));
    assert!(!is_finite_point(Point::new(0.0, f64::INFINITY)));
}

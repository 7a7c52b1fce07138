use super::*;

fn frame() -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data: vec![128, 0, 0, 128, 0, 0, 255, 255],
        premultiplied: true,
    }
}

#[test]
fn pixel_accessor_bounds() {
    let f = frame();
    assert_eq!(f.pixel(1, 0), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn png_round_trips_straight_alpha() {
    let png = frame().to_png().unwrap();
    let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 255]);
}

#[test]
fn png_rejects_short_buffer() {
    let mut f = frame();
    f.data.truncate(4);
    assert!(f.to_png().is_err());
}

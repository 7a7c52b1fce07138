use std::io::Cursor;

use super::*;

fn png_1x1() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(1, 1, image::Rgba([1, 2, 3, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn images_are_keyed_and_replaced() {
    let mut store = AssetStore::new();
    assert!(store.image("logo").is_none());
    store.register_image("logo", &png_1x1()).unwrap();
    assert_eq!(store.image("logo").unwrap().width, 1);
    assert!(store.register_image("", &png_1x1()).is_err());
    assert!(store.register_image("logo", b"nope").is_err());
    // A failed re-registration leaves the previous image in place.
    assert!(store.image("logo").is_some());
}

#[test]
fn bad_font_bytes_are_rejected() {
    let mut store = AssetStore::new();
    assert!(store.set_font(b"not a font").is_err());
    assert!(!store.has_font());
}

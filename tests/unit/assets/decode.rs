use std::io::Cursor;

use super::*;

fn png_bytes(w: u32, h: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_premultiplies() {
    let prepared = decode_image(&png_bytes(2, 1, [100, 50, 200, 128])).unwrap();
    assert_eq!((prepared.width, prepared.height), (2, 1));
    assert_eq!(&prepared.rgba8_premul[..4], &[50, 25, 100, 128]);
    assert_eq!(prepared.alpha_at(1, 0), 128);
    assert_eq!(prepared.alpha_at(2, 0), 0);
}

#[test]
fn garbage_is_an_error() {
    let err = decode_image(b"definitely not a png").unwrap_err();
    assert!(matches!(err, PlateError::Other(_)));
}

#[test]
fn from_premul_checks_length() {
    assert!(PreparedImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul(0, 2, Vec::new()).is_err());
    assert!(PreparedImage::from_premul(1, 1, vec![0; 4]).is_ok());
}

#[test]
fn unpremultiply_inverts_opaque_and_half() {
    let mut px = [50u8, 25, 100, 128, 10, 20, 30, 255, 9, 9, 9, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[..4], &[100, 50, 199, 128]);
    assert_eq!(&px[4..8], &[10, 20, 30, 255]);
    assert_eq!(&px[8..], &[9, 9, 9, 0]);
}

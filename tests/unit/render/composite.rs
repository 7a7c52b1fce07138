use super::*;

#[test]
fn over_opaque_replaces() {
    assert_eq!(over([0, 0, 255, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn over_respects_opacity() {
    assert_eq!(over([0, 0, 0, 0], [255, 0, 0, 255], 0.0), [0, 0, 0, 0]);
    let half = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert_eq!(half, [128, 128, 128, 255]);
}

#[test]
fn dest_out_clears_under_opaque() {
    assert_eq!(dest_out([200, 100, 50, 200], [0, 0, 0, 255]), [0, 0, 0, 0]);
    assert_eq!(dest_out([200, 100, 50, 200], [0, 0, 0, 0]), [200, 100, 50, 200]);
}

#[test]
fn in_place_ops_check_lengths() {
    let mut dst = [0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    assert!(dest_out_in_place(&mut dst, &[0u8; 12]).is_err());

    let mut dst = [10u8, 10, 10, 255, 10, 10, 10, 255];
    dest_out_in_place(&mut dst, &[0, 0, 0, 255, 0, 0, 0, 0]).unwrap();
    assert_eq!(dst, [0, 0, 0, 0, 10, 10, 10, 255]);
}

#[test]
fn fill_sets_every_pixel() {
    let mut buf = [0u8; 12];
    fill(&mut buf, [1, 2, 3, 4]);
    assert_eq!(buf, [1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]);
}

use super::*;
use crate::foundation::core::Size;
use crate::transform::Viewport;

fn style() -> FrameStyle {
    FrameStyle {
        ghost_opacity: 0.5,
        outline_color: Color::BLACK,
        outline_width_px: 1,
        alpha_threshold: 128,
    }
}

/// 8x4 frame: left half opaque white, right half transparent.
fn half_frame() -> PreparedImage {
    let mut px = Vec::new();
    for _y in 0..4 {
        for x in 0..8 {
            if x < 4 {
                px.extend_from_slice(&[255, 255, 255, 255]);
            } else {
                px.extend_from_slice(&[0, 0, 0, 0]);
            }
        }
    }
    PreparedImage::from_premul(8, 4, px).unwrap()
}

fn layout(zoom: f64, offset: f64) -> RenderLayout {
    RenderLayout::new(Size::new(8.0, 4.0), Viewport::new(zoom, offset)).unwrap()
}

#[test]
fn plate_clip_follows_frame_alpha_inside_padding() {
    let mut p = MaskProvider::new();
    p.set_frame(Some(half_frame()));
    let l = layout(1.0, 2.0);
    let layers = p.resolve(Mode::Plate, &l, &style()).unwrap();
    let clip = layers.clip.unwrap();
    assert_eq!((clip.width(), clip.height()), (8, 8));
    // Padding rows are outside the plate.
    assert_eq!(clip.coverage(0, 0), 0);
    assert_eq!(clip.coverage(0, 2), 255);
    assert_eq!(clip.coverage(6, 2), 0);
    assert!(layers.ghost.is_none());
    assert!(layers.crisp.is_some());
}

#[test]
fn base_mode_exposes_ghost_only() {
    let mut p = MaskProvider::new();
    p.set_frame(Some(half_frame()));
    let layers = p.resolve(Mode::Base, &layout(1.0, 0.0), &style()).unwrap();
    assert!(layers.clip.is_none());
    assert!(layers.crisp.is_none());
    let ghost = layers.ghost.unwrap();
    assert_eq!(&ghost.rgba8_premul[..4], &[128, 128, 128, 128]);
}

#[test]
fn crisp_outline_is_an_edge_band() {
    let mut p = MaskProvider::new();
    p.set_frame(Some(half_frame()));
    let layers = p.resolve(Mode::Plate, &layout(1.0, 0.0), &style()).unwrap();
    let crisp = layers.crisp.unwrap();
    // Edge of the opaque half is outlined, the interior is not, the transparent half is not.
    assert_eq!(crisp.alpha_at(0, 0), 255);
    assert_eq!(crisp.alpha_at(3, 1), 255);
    assert_eq!(crisp.alpha_at(2, 1), 0);
    assert_eq!(crisp.alpha_at(5, 1), 0);
}

#[test]
fn cache_reused_until_input_changes() {
    let mut p = MaskProvider::new();
    p.set_frame(Some(half_frame()));
    let s = style();
    p.resolve(Mode::Plate, &layout(1.0, 0.0), &s).unwrap();
    p.resolve(Mode::Base, &layout(1.0, 0.0), &s).unwrap();
    assert_eq!(p.recompute_count(), 1);

    let zoomed = p.resolve(Mode::Plate, &layout(2.0, 0.0), &s).unwrap();
    assert_eq!(p.recompute_count(), 2);
    assert_eq!(zoomed.clip.unwrap().width(), 16);

    p.set_frame(Some(half_frame()));
    p.resolve(Mode::Plate, &layout(2.0, 0.0), &s).unwrap();
    assert_eq!(p.recompute_count(), 3);
}

#[test]
fn no_frame_clips_to_plate_rect() {
    let mut p = MaskProvider::new();
    let layers = p.resolve(Mode::Plate, &layout(1.0, 1.0), &style()).unwrap();
    let clip = layers.clip.unwrap();
    assert_eq!(clip.coverage(7, 0), 0);
    assert_eq!(clip.coverage(7, 1), 255);
    assert_eq!(clip.coverage(7, 4), 255);
    assert_eq!(clip.coverage(7, 5), 0);
    assert!(layers.crisp.is_none());
}

use std::sync::Arc;

use crate::assets::PreparedImage;
use crate::foundation::color::Color;
use crate::foundation::core::Canvas;
use crate::foundation::error::{PlateError, PlateResult};
use crate::foundation::math::mul_div255_u8;
use crate::mask::clip::{ClipMask, erode};
use crate::model::Mode;
use crate::transform::RenderLayout;

/// Styling inputs of the frame layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStyle {
    /// Silhouette opacity in base mode.
    pub ghost_opacity: f32,
    /// Outline color in plate mode.
    pub outline_color: Color,
    /// Outline band width in render pixels.
    pub outline_width_px: u32,
    /// Frame alpha at or above which a pixel is inside the silhouette.
    pub alpha_threshold: u8,
}

/// Frame-derived layers for one mode, all sized to the render surface.
#[derive(Clone, Debug, Default)]
pub struct FrameLayers {
    /// Clip applied to the content group (plate mode).
    pub clip: Option<Arc<ClipMask>>,
    /// Non-interactive reduced-opacity silhouette (base mode).
    pub ghost: Option<Arc<PreparedImage>>,
    /// Opaque outline band drawn above content (plate mode).
    pub crisp: Option<Arc<PreparedImage>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MaskKey {
    generation: u64,
    surface: Canvas,
    zoom_bits: u64,
    offset_bits: u64,
    style: [u32; 4],
}

impl MaskKey {
    fn new(generation: u64, layout: &RenderLayout, style: &FrameStyle) -> Self {
        let c = style.outline_color;
        Self {
            generation,
            surface: layout.surface,
            zoom_bits: layout.viewport.zoom().to_bits(),
            offset_bits: layout.viewport.offset_y().to_bits(),
            style: [
                style.ghost_opacity.to_bits(),
                u32::from_be_bytes([c.r, c.g, c.b, c.a]),
                style.outline_width_px,
                u32::from(style.alpha_threshold),
            ],
        }
    }
}

#[derive(Clone, Debug)]
struct MaskSet {
    key: MaskKey,
    clip: Arc<ClipMask>,
    ghost: Option<Arc<PreparedImage>>,
    crisp: Option<Arc<PreparedImage>>,
}

/// Derives clip and overlay layers from the frame image, cached per frame, size and zoom.
///
/// Any input change invalidates the whole cache; nothing is patched incrementally.
#[derive(Debug, Default)]
pub struct MaskProvider {
    frame: Option<Arc<PreparedImage>>,
    generation: u64,
    cache: Option<MaskSet>,
    recomputed: u64,
}

impl MaskProvider {
    /// Provider without a frame image.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the frame image (or clear it with `None`).
    pub fn set_frame(&mut self, frame: Option<PreparedImage>) {
        self.frame = frame.map(Arc::new);
        self.generation += 1;
        self.cache = None;
    }

    /// Current frame image.
    pub fn frame(&self) -> Option<&PreparedImage> {
        self.frame.as_deref()
    }

    /// How many times masks have been computed; exposed for cache diagnostics.
    pub fn recompute_count(&self) -> u64 {
        self.recomputed
    }

    /// Frame layers for `mode` at `layout`, recomputed when the frame, surface or zoom changed.
    ///
    /// Without a frame image, plate mode clips to the plate rectangle and draws no overlays.
    #[tracing::instrument(skip(self, layout, style), fields(surface = ?layout.surface))]
    pub fn resolve(
        &mut self,
        mode: Mode,
        layout: &RenderLayout,
        style: &FrameStyle,
    ) -> PlateResult<FrameLayers> {
        let key = MaskKey::new(self.generation, layout, style);
        let set = match self.cache.take() {
            Some(set) if set.key == key => set,
            _ => {
                let set = self.compute(key, layout, style)?;
                self.recomputed += 1;
                tracing::debug!(count = self.recomputed, "frame mask recomputed");
                set
            }
        };
        let out = match mode {
            Mode::Base => FrameLayers {
                clip: None,
                ghost: set.ghost.clone(),
                crisp: None,
            },
            Mode::Plate => FrameLayers {
                clip: Some(set.clip.clone()),
                ghost: None,
                crisp: set.crisp.clone(),
            },
        };
        self.cache = Some(set);
        Ok(out)
    }

    fn compute(&self, key: MaskKey, layout: &RenderLayout, style: &FrameStyle) -> PlateResult<MaskSet> {
        let surface = layout.surface;
        let (px, py, pw, ph) = layout.plate_pixels();
        let mut clip = ClipMask::empty(surface);

        let Some(frame) = self.frame.as_deref() else {
            let sw = surface.width as usize;
            let alpha = clip.alpha_mut();
            for y in py..py + ph {
                let row = (y as usize) * sw;
                alpha[row + px as usize..row + (px + pw) as usize].fill(255);
            }
            return Ok(MaskSet {
                key,
                clip: Arc::new(clip),
                ghost: None,
                crisp: None,
            });
        };
        if pw == 0 || ph == 0 {
            return Err(PlateError::render("plate rectangle is empty"));
        }

        let scaled = resize_premul(frame, pw, ph)?;
        let sw = surface.width as usize;
        let (pw_us, ph_us) = (pw as usize, ph as usize);

        let mut ghost = vec![0u8; surface.rgba_len()];
        let mut crisp = vec![0u8; surface.rgba_len()];
        let ghost_a = (style.ghost_opacity.clamp(0.0, 1.0) * 255.0).round() as u16;
        let inside: Vec<bool> = scaled
            .chunks_exact(4)
            .map(|px| px[3] >= style.alpha_threshold.max(1))
            .collect();
        let core = erode(&inside, pw_us, ph_us, style.outline_width_px as usize);
        let outline = style.outline_color.to_premul().to_array();

        let alpha = clip.alpha_mut();
        for y in 0..ph_us {
            for x in 0..pw_us {
                let src = (y * pw_us + x) * 4;
                let dst_px = (py as usize + y) * sw + px as usize + x;
                alpha[dst_px] = scaled[src + 3];

                let g = &mut ghost[dst_px * 4..dst_px * 4 + 4];
                for (d, &s) in g.iter_mut().zip(&scaled[src..src + 4]) {
                    *d = mul_div255_u8(u16::from(s), ghost_a);
                }
                if inside[y * pw_us + x] && !core[y * pw_us + x] {
                    crisp[dst_px * 4..dst_px * 4 + 4].copy_from_slice(&outline);
                }
            }
        }

        Ok(MaskSet {
            key,
            clip: Arc::new(clip),
            ghost: Some(Arc::new(PreparedImage::from_premul(
                surface.width,
                surface.height,
                ghost,
            )?)),
            crisp: Some(Arc::new(PreparedImage::from_premul(
                surface.width,
                surface.height,
                crisp,
            )?)),
        })
    }
}

fn resize_premul(frame: &PreparedImage, w: u32, h: u32) -> PlateResult<Vec<u8>> {
    if frame.width == w && frame.height == h {
        return Ok(frame.rgba8_premul.as_ref().clone());
    }
    let src = image::RgbaImage::from_raw(frame.width, frame.height, frame.rgba8_premul.to_vec())
        .ok_or_else(|| PlateError::render("frame image buffer does not match its size"))?;
    Ok(image::imageops::resize(&src, w, h, image::imageops::FilterType::Triangle).into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/mask/provider.rs"]
mod tests;

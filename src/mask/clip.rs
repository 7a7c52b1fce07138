use crate::foundation::core::Canvas;
use crate::foundation::error::{PlateError, PlateResult};
use crate::foundation::math::mul_div255_u8;

/// Surface-sized 8-bit coverage. Content is multiplied by it at the root of the clipped subtree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl ClipMask {
    /// Mask that hides everything.
    pub fn empty(surface: Canvas) -> Self {
        Self {
            width: surface.width,
            height: surface.height,
            alpha: vec![0; surface.pixel_count()],
        }
    }

    /// Build from row-major coverage bytes.
    pub fn from_alpha(width: u32, height: u32, alpha: Vec<u8>) -> PlateResult<Self> {
        if alpha.len() != (width as usize).saturating_mul(height as usize) {
            return Err(PlateError::validation("clip mask length does not match size"));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Mask width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Mask height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Coverage at `(x, y)`; `0` outside the mask.
    pub fn coverage(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + x as usize]
    }

    pub(crate) fn alpha_mut(&mut self) -> &mut [u8] {
        &mut self.alpha
    }

    /// Multiply a premultiplied RGBA8 buffer of the same size by the mask coverage.
    pub(crate) fn apply(&self, rgba8_premul: &mut [u8]) -> PlateResult<()> {
        if rgba8_premul.len() != self.alpha.len().saturating_mul(4) {
            return Err(PlateError::render("clip mask size does not match surface"));
        }
        for (px, &m) in rgba8_premul.chunks_exact_mut(4).zip(&self.alpha) {
            match m {
                255 => {}
                0 => px.fill(0),
                _ => {
                    for c in px.iter_mut() {
                        *c = mul_div255_u8(u16::from(*c), u16::from(m));
                    }
                }
            }
        }
        Ok(())
    }
}

/// Square erosion of a `w`x`h` inside/outside grid by `radius` pixels; out of bounds counts
/// as outside. Runs as two separable 1-D passes.
pub(crate) fn erode(inside: &[bool], w: usize, h: usize, radius: usize) -> Vec<bool> {
    if radius == 0 {
        return inside.to_vec();
    }
    let pass = |src: &[bool], len: usize, stride: usize, lines: usize, step: usize| {
        let mut out = vec![false; src.len()];
        for line in 0..lines {
            let base = line * step;
            // Distance to the nearest outside cell on either side, as a running count.
            let mut run = 0usize;
            let mut left = vec![0usize; len];
            for i in 0..len {
                run = if src[base + i * stride] { run + 1 } else { 0 };
                left[i] = run;
            }
            run = 0;
            for i in (0..len).rev() {
                run = if src[base + i * stride] { run + 1 } else { 0 };
                // Needs `radius` inside cells beyond i in both directions, and the grid edge
                // beyond the run is outside.
                out[base + i * stride] = left[i] > radius && run > radius;
            }
        }
        out
    };
    let horizontal = pass(inside, w, 1, h, w);
    pass(&horizontal, h, w, w, 1)
}

#[cfg(test)]
#[path = "../../tests/unit/mask/clip.rs"]
mod tests;

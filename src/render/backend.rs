use std::io::Cursor;

use anyhow::Context;

use crate::assets::AssetStore;
use crate::assets::decode::unpremultiply_rgba8_in_place;
use crate::compose::RenderTree;
use crate::foundation::error::{PlateError, PlateResult};

/// A rendered frame as RGBA8 pixels.
///
/// Frames are premultiplied alpha; the flag makes that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        self.data.get(i..i + 4).map(|p| [p[0], p[1], p[2], p[3]])
    }

    /// Encode as PNG (straight alpha).
    pub fn to_png(&self) -> PlateResult<Vec<u8>> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        let img = image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| PlateError::render("frame buffer does not match its size"))?;
        let mut out = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut out), image::ImageFormat::Png)
            .context("encode frame as png")?;
        Ok(out)
    }
}

/// Rasterizes a composed [`RenderTree`].
pub trait RenderBackend {
    /// Draw every layer of `tree` back to front and read back the frame.
    ///
    /// Failures local to one node are logged and skipped; only surface-level failures are
    /// returned.
    fn render_tree(&mut self, tree: &RenderTree, assets: &mut AssetStore) -> PlateResult<FrameRGBA>;
}

#[cfg(test)]
#[path = "../../tests/unit/render/backend.rs"]
mod tests;

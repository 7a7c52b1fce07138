use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::{PreparedImage, decode_image};
use crate::assets::text::TextLayoutEngine;
use crate::foundation::error::{PlateError, PlateResult};

/// Images by key plus the single text font.
///
/// Fetching and versioning assets is the caller's concern; the store only holds decoded data.
#[derive(Debug, Default)]
pub struct AssetStore {
    images: HashMap<String, PreparedImage>,
    font: Option<Arc<Vec<u8>>>,
    pub(crate) text: TextLayoutEngine,
}

impl AssetStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and store the image under `key`, replacing any previous entry.
    pub fn register_image(&mut self, key: &str, bytes: &[u8]) -> PlateResult<&PreparedImage> {
        if key.is_empty() {
            return Err(PlateError::validation("image key must not be empty"));
        }
        let img = decode_image(bytes)?;
        tracing::debug!(key, width = img.width, height = img.height, "image registered");
        self.images.insert(key.to_owned(), img);
        self.images
            .get(key)
            .ok_or_else(|| PlateError::asset(format!("image '{key}' vanished after insert")))
    }

    /// Decoded image for `key`.
    pub fn image(&self, key: &str) -> Option<&PreparedImage> {
        self.images.get(key)
    }

    /// Register the font text elements are set in. Returns its family name.
    pub fn set_font(&mut self, bytes: &[u8]) -> PlateResult<String> {
        let family = self.text.register_font(bytes)?;
        self.font = Some(Arc::new(bytes.to_vec()));
        Ok(family)
    }

    /// Raw bytes of the registered font.
    pub fn font_bytes(&self) -> Option<&Arc<Vec<u8>>> {
        self.font.as_ref()
    }

    /// `true` once a font has been registered.
    pub fn has_font(&self) -> bool {
        self.font.is_some() && self.text.has_font()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;

//! Decoded images, the text font, and text layout.

pub(crate) mod decode;
mod store;
pub(crate) mod text;

pub use decode::{PreparedImage, decode_image};
pub use store::AssetStore;

//! Render tree and the layer compositor.

mod compositor;
mod shapes;
mod tree;

pub use compositor::{Background, ComposeInput, compose};
pub use tree::{
    BackgroundFill, ContentGroup, Layer, LayerKind, NodeContent, NodeLookup, RenderNode,
    RenderTree,
};

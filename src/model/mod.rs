//! Element records and the ordered element list.

mod element;
mod store;

pub use element::{
    BrushKind, CenterlineProps, Element, ElementId, ElementKind, ElementPatch, ImageProps, Mode,
    PaintProps, ShapeKind, ShapeProps, TextProps,
};
pub use store::ElementList;

//! Core of an interactive license-plate canvas editor.
//!
//! The editor keeps an ordered list of elements (images, text, shapes, paint strokes and
//! centerline guides) in canvas space and renders them onto a plate whose silhouette comes
//! from a frame image:
//!
//! - Drive it through [`Editor`] commands and pointer events
//! - Call [`Editor::render`] once per paint to get a premultiplied [`FrameRGBA`]
//! - Persist [`Editor::snapshot`] however the host application likes
//!
//! In plate mode every content element, including nested groups and the live stroke preview,
//! is clipped by the frame's alpha at the content group root. Transform handles live on their
//! own top-most layer and are never clipped.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub mod assets;
pub mod compose;
pub mod editor;
pub mod interaction;
pub mod mask;
pub mod model;
pub mod render;
pub mod selection;
pub mod stroke;
pub mod transform;

pub use crate::foundation::color::Color;
pub use crate::foundation::config::EditorConfig;
pub use crate::foundation::core::{
    Affine, BezPath, Canvas, Point, Rect, Rgba8Premul, Size, Vec2,
};
pub use crate::foundation::error::{PlateError, PlateResult};

pub use crate::editor::{Editor, EditorSnapshot, EditorState};
pub use crate::interaction::{Routed, Tool, ToolSettings, ToolSettingsPatch};
pub use crate::model::{Element, ElementId, ElementKind, ElementPatch, Mode};
pub use crate::render::FrameRGBA;
pub use crate::transform::Viewport;

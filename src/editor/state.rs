use crate::compose::Background;
use crate::foundation::config::EditorConfig;
use crate::foundation::error::{PlateError, PlateResult};
use crate::foundation::math::Fnv1a64;
use crate::interaction::{Tool, ToolSettings};
use crate::model::{Element, ElementId, ElementList, Mode};
use crate::stroke::StrokeCapture;
use crate::transform::Viewport;

/// Explicit editor state container.
///
/// The interaction router and the element-update commands are its only writers; the
/// compositor and the handle controller only read it.
#[derive(Clone, Debug)]
pub struct EditorState {
    pub(crate) elements: ElementList,
    pub(crate) selection: Option<ElementId>,
    pub(crate) viewport: Viewport,
    pub(crate) mode: Mode,
    pub(crate) tool: Tool,
    pub(crate) settings: ToolSettings,
    pub(crate) stroke: StrokeCapture,
    pub(crate) background: Background,
    spray_seed: u64,
    strokes_started: u64,
}

impl EditorState {
    pub(crate) fn new(config: &EditorConfig) -> Self {
        Self {
            elements: ElementList::new(),
            selection: None,
            viewport: Viewport::new(1.0, config.plate_offset_y),
            mode: Mode::Base,
            tool: Tool::Select,
            settings: ToolSettings {
                color: config.default_color,
                brush_radius: config.default_brush_radius,
            },
            stroke: StrokeCapture::default(),
            background: Background::default(),
            spray_seed: config.spray_seed,
            strokes_started: 0,
        }
    }

    /// Ordered element list.
    pub fn elements(&self) -> &ElementList {
        &self.elements
    }

    /// Selected element id.
    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// Active viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Active mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Paint tool settings.
    pub fn settings(&self) -> ToolSettings {
        self.settings
    }

    /// Stroke capture.
    pub fn stroke(&self) -> &StrokeCapture {
        &self.stroke
    }

    /// Select `id` (or clear with `None`); unknown ids are rejected.
    pub(crate) fn select(&mut self, id: Option<ElementId>) -> PlateResult<()> {
        if let Some(id) = id
            && !self.elements.contains(id)
        {
            return Err(PlateError::UnknownElement(id));
        }
        self.selection = id;
        Ok(())
    }

    /// Start a stroke with the active tool's style. Returns `false` for non-paint tools or when
    /// a stroke is already in progress.
    pub(crate) fn begin_stroke(&mut self) -> bool {
        let Some(style) = self.settings.stroke_style(self.tool) else {
            return false;
        };
        let mut h = Fnv1a64::new(self.spray_seed ^ Fnv1a64::OFFSET_BASIS);
        h.write_u64(self.strokes_started);
        let seed = h.finish();
        let started = self.stroke.begin(style, seed);
        if started {
            self.strokes_started += 1;
        }
        started
    }

    /// Commit the in-progress stroke into the element list.
    pub(crate) fn commit_stroke(&mut self) -> PlateResult<Option<ElementId>> {
        let Some(el) = self.stroke.commit(self.mode) else {
            return Ok(None);
        };
        let id = el.id;
        self.elements.push(el)?;
        Ok(Some(id))
    }

    pub(crate) fn push_element(&mut self, el: Element) -> PlateResult<ElementId> {
        let id = el.id;
        self.elements.push(el)?;
        Ok(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/state.rs"]
mod tests;

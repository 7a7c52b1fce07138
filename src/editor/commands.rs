use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::assets::{AssetStore, decode_image};
use crate::compose::{Background, ComposeInput, RenderTree, compose};
use crate::editor::state::EditorState;
use crate::foundation::config::EditorConfig;
use crate::foundation::core::{Point, Size};
use crate::foundation::error::PlateResult;
use crate::interaction::{Routed, Router, Tool, ToolSettingsPatch};
use crate::mask::{FrameStyle, MaskProvider};
use crate::model::{Element, ElementId, ElementKind, ElementList, ElementPatch, Mode};
use crate::render::{CpuRenderer, FrameRGBA, RenderBackend};
use crate::selection::{HandleController, HandleSet, HandleStyle, RedrawRequest};
use crate::transform::RenderLayout;

/// Outbound editor state: everything a caller needs to persist or mirror the editor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorSnapshot {
    /// Element list, back to front.
    pub elements: ElementList,
    /// Selected element.
    pub selected: Option<ElementId>,
    /// Current zoom.
    pub zoom: f64,
    /// Current mode.
    pub mode: Mode,
}

/// Interactive plate editor.
///
/// Owns the explicit [`EditorState`] and every derived resource (frame masks, handle
/// attachment, the rasterizer). Commands mutate state; [`Editor::render`] reads it.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    state: EditorState,
    assets: AssetStore,
    masks: MaskProvider,
    handles: HandleController,
    router: Router,
    renderer: CpuRenderer,
    last_tree: Option<RenderTree>,
    last_redraw: Option<RedrawRequest>,
    needs_redraw: bool,
}

impl Editor {
    /// Create an editor from a validated configuration.
    pub fn new(config: EditorConfig) -> PlateResult<Self> {
        config.validate()?;
        Ok(Self {
            state: EditorState::new(&config),
            handles: HandleController::new(config.attach_retry_delay()),
            config,
            assets: AssetStore::new(),
            masks: MaskProvider::new(),
            router: Router::new(),
            renderer: CpuRenderer::new(),
            last_tree: None,
            last_redraw: None,
            needs_redraw: true,
        })
    }

    /// Active configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Read-only view of the editor state.
    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Registered assets.
    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    /// Frame mask provider.
    pub fn masks(&self) -> &MaskProvider {
        &self.masks
    }

    /// Handle attachment controller.
    pub fn handle_controller(&self) -> &HandleController {
        &self.handles
    }

    /// Interaction router.
    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Tree drawn by the most recent [`Editor::render`].
    pub fn last_tree(&self) -> Option<&RenderTree> {
        self.last_tree.as_ref()
    }

    /// Redraw requested by the last successful handle attachment.
    pub fn last_redraw(&self) -> Option<RedrawRequest> {
        self.last_redraw
    }

    /// `true` when state changed since the last render, or a handle attachment asked for one.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    fn touch(&mut self) {
        self.needs_redraw = true;
    }

    /// Add an element of `kind` at canvas position `at`, tagged with the current mode.
    pub fn add_element(&mut self, kind: ElementKind, at: Point) -> PlateResult<ElementId> {
        let el = Element::new(kind, self.state.mode).at(at.x, at.y);
        self.add(el)
    }

    /// Add a fully built element. Its id must not already be present.
    pub fn add(&mut self, el: Element) -> PlateResult<ElementId> {
        let id = self.state.push_element(el)?;
        tracing::debug!(%id, "element added");
        self.touch();
        Ok(id)
    }

    /// Apply a sparse update to an element.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> PlateResult<()> {
        self.state.elements.update(id, patch)?;
        self.touch();
        Ok(())
    }

    /// Remove an element, deselecting it and detaching its handles.
    pub fn delete_element(&mut self, id: ElementId) -> PlateResult<Element> {
        let el = self.state.elements.remove(id)?;
        if self.state.selection == Some(id) {
            self.state.selection = None;
        }
        self.handles.element_removed(id);
        tracing::debug!(%id, "element deleted");
        self.touch();
        Ok(el)
    }

    /// Select an element, or clear the selection with `None`.
    ///
    /// Selecting while a paint tool is active switches to [`Tool::Select`].
    pub fn select_element(&mut self, id: Option<ElementId>) -> PlateResult<()> {
        self.state.select(id)?;
        if id.is_some() && self.state.tool.is_paint() {
            self.state.tool = Tool::Select;
        }
        self.handles.request(id);
        self.touch();
        Ok(())
    }

    /// Replace the whole element list, e.g. from a saved snapshot. Clears the selection.
    pub fn load_elements(&mut self, elements: Vec<Element>) -> PlateResult<()> {
        let list = ElementList::from_elements(elements)?;
        self.state.elements = list;
        self.state.selection = None;
        self.state.stroke.cancel();
        self.handles.detach();
        self.touch();
        Ok(())
    }

    /// Serializable outbound state.
    pub fn snapshot(&self) -> EditorSnapshot {
        EditorSnapshot {
            elements: self.state.elements.clone(),
            selected: self.state.selection,
            zoom: self.state.viewport.zoom(),
            mode: self.state.mode,
        }
    }

    /// Switch tools. A paint tool clears the selection.
    pub fn set_active_tool(&mut self, tool: Tool) {
        if self.state.tool == tool {
            return;
        }
        tracing::debug!(from = ?self.state.tool, to = ?tool, "tool changed");
        self.state.tool = tool;
        if tool.is_paint() && self.state.selection.is_some() {
            self.state.selection = None;
            self.handles.request(None);
        }
        self.touch();
    }

    /// Update color, radius and optionally the tool.
    pub fn set_tool_settings(&mut self, patch: &ToolSettingsPatch) -> PlateResult<()> {
        patch.apply(&mut self.state.settings)?;
        if let Some(tool) = patch.tool {
            self.set_active_tool(tool);
        }
        Ok(())
    }

    /// Start a stroke at canvas point `p` with the active paint tool.
    ///
    /// Returns `false` when no paint tool is active or a stroke is already in progress.
    pub fn begin_stroke(&mut self, p: Point) -> bool {
        if !self.state.begin_stroke() {
            return false;
        }
        self.state.stroke.append(p);
        self.touch();
        true
    }

    /// Append a canvas point to the stroke in progress.
    pub fn append_stroke_point(&mut self, p: Point) -> bool {
        let appended = self.state.stroke.append(p);
        if appended {
            self.touch();
        }
        appended
    }

    /// Commit the stroke in progress. An empty stroke is dropped and yields `None`.
    pub fn commit_stroke(&mut self) -> PlateResult<Option<ElementId>> {
        let id = self.state.commit_stroke()?;
        self.touch();
        Ok(id)
    }

    /// Set the zoom and return the clamped value that was applied.
    pub fn set_zoom(&mut self, zoom: f64) -> f64 {
        self.state.viewport = self.state.viewport.with_zoom(zoom);
        self.touch();
        self.state.viewport.zoom()
    }

    /// Switch between base and plate mode. Elements are kept in both.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.state.mode != mode {
            tracing::debug!(?mode, "mode changed");
            self.state.mode = mode;
            self.touch();
        }
    }

    /// Decode and install the plate frame image.
    pub fn set_frame_image(&mut self, bytes: &[u8]) -> PlateResult<()> {
        let frame = decode_image(bytes)?;
        self.masks.set_frame(Some(frame));
        self.touch();
        Ok(())
    }

    /// Remove the frame image.
    pub fn clear_frame_image(&mut self) {
        self.masks.set_frame(None);
        self.touch();
    }

    /// Register image bytes under `key` for image elements and backgrounds.
    pub fn register_image(&mut self, key: &str, bytes: &[u8]) -> PlateResult<()> {
        self.assets.register_image(key, bytes)?;
        self.touch();
        Ok(())
    }

    /// Register the text font; returns its family name.
    pub fn set_text_font(&mut self, bytes: &[u8]) -> PlateResult<String> {
        let family = self.assets.set_font(bytes)?;
        self.touch();
        Ok(family)
    }

    /// Replace the background request.
    pub fn set_background(&mut self, background: Background) {
        self.state.background = background;
        self.touch();
    }

    /// Pointer pressed at render-space `p`.
    pub fn pointer_down(&mut self, p: Point) -> PlateResult<Routed> {
        let handles = self.last_tree.as_ref().and_then(RenderTree::handles);
        let routed = self.router.pointer_down(&mut self.state, p, handles)?;
        self.after_route(routed);
        Ok(routed)
    }

    /// Pointer moved to render-space `p`.
    pub fn pointer_move(&mut self, p: Point) -> PlateResult<Routed> {
        let routed = self.router.pointer_move(&mut self.state, p)?;
        self.after_route(routed);
        Ok(routed)
    }

    /// Pointer released at render-space `p`.
    pub fn pointer_up(&mut self, p: Point) -> PlateResult<Routed> {
        let routed = self.router.pointer_up(&mut self.state, p)?;
        self.after_route(routed);
        Ok(routed)
    }

    fn after_route(&mut self, routed: Routed) {
        match routed {
            Routed::Ignored => return,
            Routed::Selected(id) => self.handles.request(id),
            Routed::Stroke | Routed::Manipulated(_) | Routed::Committed(_) => {}
        }
        self.touch();
    }

    /// Render geometry for the current zoom.
    pub fn layout(&self) -> PlateResult<RenderLayout> {
        RenderLayout::new(
            Size::new(self.config.canvas_width, self.config.canvas_height),
            self.state.viewport,
        )
    }

    fn frame_style(&self) -> FrameStyle {
        FrameStyle {
            ghost_opacity: self.config.ghost_opacity,
            outline_color: self.config.outline_color,
            outline_width_px: self.config.outline_width_px,
            alpha_threshold: self.config.mask_alpha_threshold,
        }
    }

    fn handle_style(&self) -> HandleStyle {
        HandleStyle {
            base_size: self.config.handle_base_size,
            rotate_offset: self.config.rotate_handle_offset,
        }
    }

    /// Build the render tree for the current state without rasterizing it.
    pub fn compose_tree(&mut self) -> PlateResult<RenderTree> {
        let layout = self.layout()?;
        let style = self.frame_style();
        let frame = self.masks.resolve(self.state.mode, &layout, &style)?;
        let preview = self.state.stroke.preview(self.state.viewport);
        Ok(compose(ComposeInput {
            elements: &self.state.elements,
            layout: &layout,
            mode: self.state.mode,
            frame: &frame,
            background: &self.state.background,
            background_color: self.config.background,
            preview: &preview,
            interactive: !self.state.tool.is_paint(),
            attached: self.handles.attached(),
            handle_style: self.handle_style(),
            assets: &self.assets,
        }))
    }

    /// Compose and rasterize a frame, then run the handle controller's paint-boundary step.
    ///
    /// `now` drives the attachment retry deadline.
    #[tracing::instrument(skip(self), fields(mode = ?self.state.mode, zoom = self.state.viewport.zoom()))]
    pub fn render(&mut self, now: Instant) -> PlateResult<FrameRGBA> {
        let tree = self.compose_tree()?;
        let frame = self.renderer.render_tree(&tree, &mut self.assets)?;
        let redraw = self
            .handles
            .on_paint_boundary(&tree, self.state.selection, now);
        self.last_tree = Some(tree);
        self.needs_redraw = redraw.is_some();
        if redraw.is_some() {
            self.last_redraw = redraw;
        }
        Ok(frame)
    }

    /// Run a due attachment retry against the last drawn tree. Returns the redraw request when
    /// the retry bound the handles.
    pub fn tick(&mut self, now: Instant) -> Option<RedrawRequest> {
        let tree = self.last_tree.as_ref()?;
        let redraw = self.handles.poll_retry(tree, self.state.selection, now)?;
        self.needs_redraw = true;
        self.last_redraw = Some(redraw);
        Some(redraw)
    }

    /// Handles drawn in the last render, if any.
    pub fn handle_set(&self) -> Option<&HandleSet> {
        self.last_tree.as_ref().and_then(RenderTree::handles)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/commands.rs"]
mod tests;

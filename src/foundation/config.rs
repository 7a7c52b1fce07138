use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{PlateError, PlateResult};
use crate::transform::MAX_ZOOM;

/// Longest accepted handle-attachment retry delay.
pub const MAX_ATTACH_RETRY_DELAY_MS: u64 = 100;

/// Editor configuration.
///
/// Every field has a default, so a partial JSON document such as
/// `{"canvas_width": 520.0}` is a valid configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Plate width in canvas units.
    pub canvas_width: f64,
    /// Plate height in canvas units.
    pub canvas_height: f64,
    /// Vertical offset of the plate in render pixels (padding above and below).
    pub plate_offset_y: f64,
    /// Fill drawn behind everything when no background image is set.
    pub background: Color,
    /// Opacity of the frame silhouette shown in base mode.
    pub ghost_opacity: f32,
    /// Color of the crisp frame outline drawn over clipped content in plate mode.
    pub outline_color: Color,
    /// Width of the crisp frame outline in render pixels.
    pub outline_width_px: u32,
    /// Frame alpha at or above which a pixel counts as inside the silhouette.
    pub mask_alpha_threshold: u8,
    /// Transform handle edge length at zoom 1.0.
    pub handle_base_size: f64,
    /// Distance from the top edge to the rotate handle at zoom 1.0.
    pub rotate_handle_offset: f64,
    /// Delay before the single handle-attachment retry.
    pub attach_retry_delay_ms: u64,
    /// Brush color active before the first settings change.
    pub default_color: Color,
    /// Brush radius active before the first settings change, in canvas units.
    pub default_brush_radius: f64,
    /// Base seed mixed into every spray stroke's scatter pattern.
    pub spray_seed: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_width: 1040.0,
            canvas_height: 220.0,
            plate_offset_y: 40.0,
            background: Color::rgb(0xF2, 0xF2, 0xF2),
            ghost_opacity: 0.3,
            outline_color: Color::rgb(0x1F, 0x1A, 0x17),
            outline_width_px: 2,
            mask_alpha_threshold: 128,
            handle_base_size: 10.0,
            rotate_handle_offset: 24.0,
            attach_retry_delay_ms: 32,
            default_color: Color::BLACK,
            default_brush_radius: 4.0,
            spray_seed: 0x5EED,
        }
    }
}

impl EditorConfig {
    /// Parse a JSON configuration document and validate it.
    pub fn from_json(s: &str) -> PlateResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| PlateError::serde(format!("editor config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject configurations the editor cannot render.
    pub fn validate(&self) -> PlateResult<()> {
        fn positive(name: &str, v: f64) -> PlateResult<()> {
            if !v.is_finite() || v <= 0.0 {
                return Err(PlateError::validation(format!(
                    "{name} must be finite and > 0"
                )));
            }
            Ok(())
        }

        positive("canvas_width", self.canvas_width)?;
        positive("canvas_height", self.canvas_height)?;
        positive("handle_base_size", self.handle_base_size)?;
        positive("default_brush_radius", self.default_brush_radius)?;
        if !self.plate_offset_y.is_finite() || self.plate_offset_y < 0.0 {
            return Err(PlateError::validation(
                "plate_offset_y must be finite and >= 0",
            ));
        }
        if !self.rotate_handle_offset.is_finite() || self.rotate_handle_offset < 0.0 {
            return Err(PlateError::validation(
                "rotate_handle_offset must be finite and >= 0",
            ));
        }
        if !(0.0..=1.0).contains(&self.ghost_opacity) {
            return Err(PlateError::validation("ghost_opacity must be in [0, 1]"));
        }
        if self.attach_retry_delay_ms > MAX_ATTACH_RETRY_DELAY_MS {
            return Err(PlateError::validation(format!(
                "attach_retry_delay_ms must be <= {MAX_ATTACH_RETRY_DELAY_MS}"
            )));
        }

        // The surface must fit the renderer at the largest zoom.
        let max = f64::from(u16::MAX);
        let surface_w = (self.canvas_width * MAX_ZOOM).ceil();
        let surface_h = (self.canvas_height * MAX_ZOOM + 2.0 * self.plate_offset_y).ceil();
        if surface_w > max || surface_h > max {
            return Err(PlateError::validation(format!(
                "canvas does not fit a {max}px surface at zoom {MAX_ZOOM}"
            )));
        }
        Ok(())
    }

    /// Retry delay as a [`Duration`].
    pub fn attach_retry_delay(&self) -> Duration {
        Duration::from_millis(self.attach_retry_delay_ms)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::foundation::color::Color;
use crate::foundation::error::{PlateError, PlateResult};
use crate::model::BrushKind;
use crate::stroke::StrokeStyle;

/// Active editor tool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Select, drag, resize and rotate elements.
    #[default]
    Select,
    /// Solid brush.
    Brush,
    /// Soft-glow brush.
    Airbrush,
    /// Scattered dots.
    Spray,
    /// Pigment remover.
    Eraser,
    /// Text placement (elements stay interactive).
    Text,
    /// Shape placement (elements stay interactive).
    Shape,
}

impl Tool {
    /// Paint-family tools make every element non-interactive.
    pub fn is_paint(self) -> bool {
        self.brush_kind().is_some()
    }

    /// Brush behaviour of a paint-family tool.
    pub fn brush_kind(self) -> Option<BrushKind> {
        match self {
            Self::Brush => Some(BrushKind::Brush),
            Self::Airbrush => Some(BrushKind::Airbrush),
            Self::Spray => Some(BrushKind::Spray),
            Self::Eraser => Some(BrushKind::Eraser),
            Self::Select | Self::Text | Self::Shape => None,
        }
    }
}

/// Color and brush radius shared by the paint tools.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolSettings {
    /// Pigment color.
    pub color: Color,
    /// Brush radius in canvas units.
    pub brush_radius: f64,
}

impl ToolSettings {
    /// Stroke width derived from the radius.
    pub fn stroke_width(&self) -> f64 {
        self.brush_radius * 2.0
    }

    /// Stroke style for `tool`, or `None` for non-paint tools.
    pub fn stroke_style(&self, tool: Tool) -> Option<StrokeStyle> {
        Some(StrokeStyle {
            brush: tool.brush_kind()?,
            color: self.color,
            width: self.stroke_width(),
        })
    }
}

/// Sparse settings update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettingsPatch {
    /// Switch tools as part of the update.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<Tool>,
    /// New pigment color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    /// New brush radius in canvas units.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brush_radius: Option<f64>,
}

impl ToolSettingsPatch {
    /// Apply color and radius to `settings`. The tool field is handled by the caller.
    pub fn apply(&self, settings: &mut ToolSettings) -> PlateResult<()> {
        if let Some(r) = self.brush_radius
            && (!r.is_finite() || r <= 0.0)
        {
            return Err(PlateError::validation("brush radius must be finite and > 0"));
        }
        if let Some(c) = self.color {
            settings.color = c;
        }
        if let Some(r) = self.brush_radius {
            settings.brush_radius = r;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/tools.rs"]
mod tests;

use serde::{Deserialize, Serialize};

use crate::error::{ScatterError, ScatterResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ScatterResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ScatterError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Colors and fonts a raster surface uses for each style tag.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceStyle {
    pub background: Color,
    pub state_circle_fill: Color,
    pub state_circle_stroke: Color,
    pub state_text: Color,
    pub axis_line: Color,
    pub axis_text: Color,
    pub caption_active: Color,
    pub caption_inactive: Color,
    pub tooltip_background: Color,
    pub tooltip_text: Color,
    pub default_font_size_px: f64,
    pub tooltip_font_size_px: f64,
    pub tooltip_padding_px: f64,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            background: Color::rgb(1.0, 1.0, 1.0),
            state_circle_fill: Color::rgb(0.537, 0.741, 0.827),
            state_circle_stroke: Color::rgb(0.878, 0.878, 0.878),
            state_text: Color::rgb(1.0, 1.0, 1.0),
            axis_line: Color::rgb(0.0, 0.0, 0.0),
            axis_text: Color::rgb(0.0, 0.0, 0.0),
            caption_active: Color::rgb(0.0, 0.0, 0.0),
            caption_inactive: Color::rgb(0.675, 0.675, 0.675),
            tooltip_background: Color::rgba(0.0, 0.0, 0.0, 0.8),
            tooltip_text: Color::rgb(1.0, 1.0, 1.0),
            default_font_size_px: 16.0,
            tooltip_font_size_px: 12.0,
            tooltip_padding_px: 8.0,
        }
    }
}

impl SurfaceStyle {
    pub fn validate(self) -> ScatterResult<()> {
        for color in [
            self.background,
            self.state_circle_fill,
            self.state_circle_stroke,
            self.state_text,
            self.axis_line,
            self.axis_text,
            self.caption_active,
            self.caption_inactive,
            self.tooltip_background,
            self.tooltip_text,
        ] {
            color.validate()?;
        }
        for (name, value) in [
            ("default_font_size_px", self.default_font_size_px),
            ("tooltip_font_size_px", self.tooltip_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScatterError::InvalidData(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if !self.tooltip_padding_px.is_finite() || self.tooltip_padding_px < 0.0 {
            return Err(ScatterError::InvalidData(
                "`tooltip_padding_px` must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

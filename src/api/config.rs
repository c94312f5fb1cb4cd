use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, Margins, Viewport};
use crate::error::{ScatterError, ScatterResult};

use super::SelectionState;

/// Data-unit offsets subtracted from a record's Y value before placing its
/// abbreviation, so the text sits inside the circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkLabelOffsets {
    /// Used when the chart is first mounted.
    pub initial: f64,
    /// Used on every Y re-binding afterwards.
    pub update: f64,
}

impl Default for MarkLabelOffsets {
    fn default() -> Self {
        Self {
            initial: 0.22,
            update: 0.2,
        }
    }
}

/// Tooltip panel displacement from the hovered circle's top-centre point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipOffset {
    pub top: f64,
    pub left: f64,
}

impl Default for TooltipOffset {
    fn default() -> Self {
        Self {
            top: 80.0,
            left: -60.0,
        }
    }
}

/// Public chart bootstrap configuration.
///
/// Serializable so hosts can keep chart setup next to their own settings;
/// every field falls back to its default when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterChartConfig {
    #[serde(default)]
    pub canvas: Viewport,
    #[serde(default)]
    pub margins: Margins,
    #[serde(default = "default_transition_duration_ms")]
    pub transition_duration_ms: u32,
    #[serde(default = "default_circle_radius")]
    pub circle_radius: f64,
    #[serde(default = "default_mark_label_font_size_px")]
    pub mark_label_font_size_px: f64,
    #[serde(default)]
    pub mark_label_offsets: MarkLabelOffsets,
    #[serde(default)]
    pub tooltip_offset: TooltipOffset,
    #[serde(default = "default_tick_count")]
    pub tick_count: usize,
    #[serde(default)]
    pub initial_selection: SelectionState,
}

impl Default for ScatterChartConfig {
    fn default() -> Self {
        Self {
            canvas: Viewport::default(),
            margins: Margins::default(),
            transition_duration_ms: default_transition_duration_ms(),
            circle_radius: default_circle_radius(),
            mark_label_font_size_px: default_mark_label_font_size_px(),
            mark_label_offsets: MarkLabelOffsets::default(),
            tooltip_offset: TooltipOffset::default(),
            tick_count: default_tick_count(),
            initial_selection: SelectionState::default(),
        }
    }
}

impl ScatterChartConfig {
    #[must_use]
    pub fn with_canvas(mut self, canvas: Viewport) -> Self {
        self.canvas = canvas;
        self
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn with_transition_duration_ms(mut self, duration_ms: u32) -> Self {
        self.transition_duration_ms = duration_ms;
        self
    }

    #[must_use]
    pub fn with_initial_selection(mut self, selection: SelectionState) -> Self {
        self.initial_selection = selection;
        self
    }

    pub fn layout(&self) -> ScatterResult<ChartLayout> {
        ChartLayout::new(self.canvas, self.margins)
    }

    pub fn validate(&self) -> ScatterResult<()> {
        self.layout()?;
        if self.transition_duration_ms == 0 {
            return Err(ScatterError::Config(
                "transition duration must be > 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("circle_radius", self.circle_radius),
            ("mark_label_font_size_px", self.mark_label_font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ScatterError::Config(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        for (name, value) in [
            ("mark_label_offsets.initial", self.mark_label_offsets.initial),
            ("mark_label_offsets.update", self.mark_label_offsets.update),
            ("tooltip_offset.top", self.tooltip_offset.top),
            ("tooltip_offset.left", self.tooltip_offset.left),
        ] {
            if !value.is_finite() {
                return Err(ScatterError::Config(format!("`{name}` must be finite")));
            }
        }
        if self.tick_count == 0 {
            return Err(ScatterError::Config("tick count must be > 0".to_owned()));
        }
        Ok(())
    }

    pub fn from_json_str(input: &str) -> ScatterResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|e| ScatterError::Config(format!("failed to parse config json: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ScatterResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ScatterError::Config(format!("failed to serialize config json: {e}")))
    }
}

fn default_transition_duration_ms() -> u32 {
    1_000
}

fn default_circle_radius() -> f64 {
    20.0
}

fn default_mark_label_font_size_px() -> f64 {
    14.0
}

fn default_tick_count() -> usize {
    10
}

use serde::{Deserialize, Serialize};

use crate::error::{ScatterError, ScatterResult};

/// Canvas size in whole pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1080, 600)
    }
}

/// Space reserved around the plot area for axes and captions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub fn validate(self) -> ScatterResult<()> {
        for (side, value) in [
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
            ("left", self.left),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ScatterError::Config(format!(
                    "margin `{side}` must be finite and >= 0"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 40.0, 80.0, 100.0)
    }
}

/// Resolved geometry of the chart: canvas, margins and the inner plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub canvas: Viewport,
    pub margins: Margins,
    pub plot_width: f64,
    pub plot_height: f64,
}

impl ChartLayout {
    pub fn new(canvas: Viewport, margins: Margins) -> ScatterResult<Self> {
        if !canvas.is_valid() {
            return Err(ScatterError::InvalidViewport {
                width: canvas.width,
                height: canvas.height,
            });
        }
        margins.validate()?;

        let plot_width = f64::from(canvas.width) - margins.left - margins.right;
        let plot_height = f64::from(canvas.height) - margins.top - margins.bottom;
        if plot_width <= 0.0 || plot_height <= 0.0 {
            return Err(ScatterError::Config(format!(
                "margins leave no plot area: {plot_width}x{plot_height}"
            )));
        }

        Ok(Self {
            canvas,
            margins,
            plot_width,
            plot_height,
        })
    }

    /// Converts a point in plot-area coordinates to canvas coordinates.
    #[must_use]
    pub fn plot_to_canvas(self, x: f64, y: f64) -> (f64, f64) {
        (x + self.margins.left, y + self.margins.top)
    }
}

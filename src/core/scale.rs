use serde::{Deserialize, Serialize};

use crate::core::ticks::{format_tick, nice_ticks, tick_precision, tick_step};
use crate::error::{ScatterError, ScatterResult};

/// Affine mapping from a metric domain to a pixel range.
///
/// The range may be inverted (`range_start > range_end`), which is how the
/// vertical axis places larger values nearer the top of the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    /// Builds a scale. A zero-width domain is accepted and maps every value to
    /// the middle of the range.
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ScatterResult<Self> {
        if !domain.0.is_finite() || !domain.1.is_finite() {
            return Err(ScatterError::InvalidData(
                "scale domain must be finite".to_owned(),
            ));
        }
        if !range.0.is_finite() || !range.1.is_finite() {
            return Err(ScatterError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start: domain.0,
            domain_end: domain.1,
            range_start: range.0,
            range_end: range.1,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.domain_start == self.domain_end
    }

    pub fn domain_to_pixel(self, value: f64) -> ScatterResult<f64> {
        if !value.is_finite() {
            return Err(ScatterError::InvalidData("value must be finite".to_owned()));
        }

        if self.is_degenerate() {
            return Ok((self.range_start + self.range_end) / 2.0);
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }

    pub fn pixel_to_domain(self, pixel: f64) -> ScatterResult<f64> {
        if !pixel.is_finite() {
            return Err(ScatterError::InvalidData("pixel must be finite".to_owned()));
        }

        let range_span = self.range_end - self.range_start;
        if range_span == 0.0 {
            return Ok(self.domain_start);
        }

        let normalized = (pixel - self.range_start) / range_span;
        Ok(self.domain_start + normalized * (self.domain_end - self.domain_start))
    }

    /// Round tick values inside the domain, roughly `count` of them.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        nice_ticks(self.domain_start, self.domain_end, count)
    }

    /// Formats `value` with the precision implied by the tick step for `count`.
    #[must_use]
    pub fn format_tick(self, value: f64, count: usize) -> String {
        let step = tick_step(self.domain_start, self.domain_end, count);
        format_tick(value, tick_precision(step))
    }
}

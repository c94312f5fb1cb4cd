use crate::core::{ChartLayout, LinearScale, Metric, XField, YField};
use crate::data::Dataset;
use crate::error::ScatterResult;

/// Multiplicative padding applied to a metric's extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainPadding {
    pub lower: f64,
    pub upper: f64,
}

pub const X_DOMAIN_PADDING: DomainPadding = DomainPadding {
    lower: 0.9,
    upper: 1.1,
};

/// The vertical axis pads its lower bound harder so circles near the minimum
/// stay clear of the X axis.
pub const Y_DOMAIN_PADDING: DomainPadding = DomainPadding {
    lower: 0.75,
    upper: 1.05,
};

#[must_use]
pub fn padded_domain(dataset: &Dataset, metric: Metric, padding: DomainPadding) -> (f64, f64) {
    let (min, max) = dataset.extent(metric);
    (min * padding.lower, max * padding.upper)
}

/// Horizontal scale for `field`, spanning `[0, plot_width]`.
pub fn compute_x_scale(
    dataset: &Dataset,
    field: XField,
    layout: ChartLayout,
) -> ScatterResult<LinearScale> {
    LinearScale::new(
        padded_domain(dataset, field.metric(), X_DOMAIN_PADDING),
        (0.0, layout.plot_width),
    )
}

/// Vertical scale for `field`, spanning `[plot_height, 0]`.
pub fn compute_y_scale(
    dataset: &Dataset,
    field: YField,
    layout: ChartLayout,
) -> ScatterResult<LinearScale> {
    LinearScale::new(
        padded_domain(dataset, field.metric(), Y_DOMAIN_PADDING),
        (layout.plot_height, 0.0),
    )
}

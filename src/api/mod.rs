mod axis_renderer;
mod caption_controller;
mod chart;
mod config;
mod mark_renderer;
mod scale_factory;
mod selection;
mod selection_controller;
mod snapshot;
mod tooltip_controller;

pub use axis_renderer::{AxisHandle, AxisOrient, AxisTickElements, mount_axis, render_axis};
pub use caption_controller::{CaptionHandles, mount_captions, restyle_captions};
pub use chart::{ScatterChart, SceneHandles};
pub use config::{MarkLabelOffsets, ScatterChartConfig, TooltipOffset};
pub use mark_renderer::{
    MarkHandles, MarkPositions, MarkStyle, mount_marks, project_labels, project_marks,
    render_circles, render_labels,
};
pub use scale_factory::{
    DomainPadding, X_DOMAIN_PADDING, Y_DOMAIN_PADDING, compute_x_scale, compute_y_scale,
    padded_domain,
};
pub use selection::{SelectionChange, SelectionState, reduce};
pub use selection_controller::DispatchOutcome;
pub use snapshot::{
    CHART_SNAPSHOT_JSON_SCHEMA_V1, ChartSnapshot, ChartSnapshotJsonContractV1, MarkSnapshot,
};
pub use tooltip_controller::{TooltipBinding, TooltipContent, TooltipController};

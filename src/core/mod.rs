pub mod metric;
pub mod scale;
pub mod ticks;
pub mod types;

pub use metric::{Axis, AxisField, Metric, XField, YField};
pub use scale::LinearScale;
pub use types::{ChartLayout, Margins, Viewport};

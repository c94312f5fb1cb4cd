//! health-scatter: interactive two-axis scatter chart of U.S. state health
//! and demographic indicators.
//!
//! The crate loads a per-state CSV, builds linear scales for the selected
//! pair of metrics and drives a retained scene (axes, circles, abbreviation
//! labels, clickable captions and a hover panel) through a [`render::Surface`].

pub mod api;
pub mod core;
pub mod data;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ScatterChart, ScatterChartConfig, SelectionChange, SelectionState};
pub use error::{ScatterError, ScatterResult};

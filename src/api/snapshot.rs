use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisField};
use crate::error::{ScatterError, ScatterResult};
use crate::render::Surface;

use super::{ScatterChart, SelectionState, TooltipBinding};

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkSnapshot {
    pub abbr: String,
    pub cx: f64,
    pub cy: f64,
}

/// Serializable view of the chart after the latest update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub selection: SelectionState,
    pub x_domain: (f64, f64),
    pub y_domain: (f64, f64),
    pub x_ticks: Vec<f64>,
    pub y_ticks: Vec<f64>,
    pub active_x_caption: AxisField,
    pub active_y_caption: AxisField,
    pub tooltip: TooltipBinding,
    pub hovered: Option<usize>,
    pub marks: Vec<MarkSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_pretty(&self) -> ScatterResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ScatterError::InvalidData(format!("failed to serialize snapshot json: {e}"))
        })
    }

    pub fn to_json_contract_v1_pretty(&self) -> ScatterResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ScatterError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Accepts either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ScatterResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ScatterError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ScatterError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<S: Surface> ScatterChart<S> {
    #[must_use]
    pub fn snapshot(&self) -> ChartSnapshot {
        let marks = self
            .dataset
            .iter()
            .zip(self.positions.x.iter().zip(&self.positions.y))
            .map(|(record, (cx, cy))| MarkSnapshot {
                abbr: record.abbr.clone(),
                cx: *cx,
                cy: *cy,
            })
            .collect();

        ChartSnapshot {
            selection: self.selection,
            x_domain: self.x_scale.domain(),
            y_domain: self.y_scale.domain(),
            x_ticks: self.scene.x_axis.tick_values(),
            y_ticks: self.scene.y_axis.tick_values(),
            active_x_caption: self.selection.active(Axis::X),
            active_y_caption: self.selection.active(Axis::Y),
            tooltip: self.tooltip.binding(),
            hovered: self.tooltip.hovered(),
            marks,
        }
    }
}

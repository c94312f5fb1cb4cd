use serde::{Deserialize, Serialize};

use crate::core::AxisField;

/// User input routed into the chart after hit-testing on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChartEvent {
    /// One of the six axis captions was clicked.
    LabelClicked(AxisField),
    /// Pointer entered the circle of the record at this index.
    PointerEntered { record: usize },
    PointerLeft { record: usize },
}

/// Which record, if any, the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HoverState {
    record: Option<usize>,
}

impl HoverState {
    #[must_use]
    pub fn record(self) -> Option<usize> {
        self.record
    }

    pub fn on_pointer_enter(&mut self, record: usize) {
        self.record = Some(record);
    }

    pub fn on_pointer_leave(&mut self) {
        self.record = None;
    }
}

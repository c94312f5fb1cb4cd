use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{XField, YField};
use crate::data::Record;
use crate::interaction::HoverState;
use crate::render::{
    Attr, ElementId, ElementIdAllocator, ElementKind, PointerEventKind, SceneBatch, StyleTag,
};

use super::TooltipOffset;

/// Text shown in the hover panel for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub title: String,
    pub x_line: String,
    pub y_line: String,
}

impl TooltipContent {
    #[must_use]
    pub fn for_record(record: &Record, x: XField, y: YField) -> Self {
        Self {
            title: record.state.clone(),
            x_line: format!("{} {}", x.tooltip_label(), record.x_value(x)),
            y_line: format!("{} {}", y.tooltip_label(), record.y_value(y)),
        }
    }

    #[must_use]
    pub fn lines(&self) -> [&str; 3] {
        [self.title.as_str(), self.x_line.as_str(), self.y_line.as_str()]
    }

    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines().join("\n")
    }
}

/// Fields the hover text is currently rendered for. `generation` counts
/// re-bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipBinding {
    pub x: XField,
    pub y: YField,
    pub generation: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipController {
    panel: ElementId,
    binding: TooltipBinding,
    hover: HoverState,
    offset: TooltipOffset,
}

impl TooltipController {
    /// Appends the (hidden) floating panel under `parent`.
    pub fn mount(
        batch: &mut SceneBatch,
        ids: &mut ElementIdAllocator,
        parent: ElementId,
        offset: TooltipOffset,
        (x, y): (XField, YField),
    ) -> Self {
        let panel = ids.next_id();
        batch
            .append(panel, parent, ElementKind::Tooltip)
            .classed(panel, StyleTag::Tooltip, true)
            .set_number(panel, Attr::Opacity, 0.0);

        Self {
            panel,
            binding: TooltipBinding {
                x,
                y,
                generation: 0,
            },
            hover: HoverState::default(),
            offset,
        }
    }

    #[must_use]
    pub fn panel(&self) -> ElementId {
        self.panel
    }

    #[must_use]
    pub fn binding(&self) -> TooltipBinding {
        self.binding
    }

    #[must_use]
    pub fn hovered(&self) -> Option<usize> {
        self.hover.record()
    }

    /// Registers hover listeners on every circle and switches the text to
    /// the given fields.
    pub fn bind_tooltip(
        &mut self,
        batch: &mut SceneBatch,
        circles: &[ElementId],
        x: XField,
        y: YField,
    ) -> TooltipBinding {
        for circle in circles {
            batch
                .listen(*circle, PointerEventKind::PointerEnter)
                .listen(*circle, PointerEventKind::PointerLeave);
        }
        self.binding = TooltipBinding {
            x,
            y,
            generation: self.binding.generation + 1,
        };
        trace!(
            x = %x.metric(),
            y = %y.metric(),
            generation = self.binding.generation,
            "bound tooltips"
        );
        self.binding
    }

    /// Shows the panel for `record`, whose circle top-centre sits at `anchor`
    /// in canvas coordinates.
    pub fn show(
        &mut self,
        batch: &mut SceneBatch,
        index: usize,
        record: &Record,
        anchor: (f64, f64),
    ) -> TooltipContent {
        let content = TooltipContent::for_record(record, self.binding.x, self.binding.y);
        batch
            .set_text(self.panel, content.to_text())
            .set_number(self.panel, Attr::X, anchor.0 + self.offset.left)
            .set_number(self.panel, Attr::Y, anchor.1 + self.offset.top)
            .set_number(self.panel, Attr::Opacity, 1.0);
        self.hover.on_pointer_enter(index);
        content
    }

    pub fn hide(&mut self, batch: &mut SceneBatch) {
        batch.set_number(self.panel, Attr::Opacity, 0.0);
        self.hover.on_pointer_leave();
    }
}

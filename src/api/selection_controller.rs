use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::core::{Axis, AxisField};
use crate::error::{ScatterError, ScatterResult};
use crate::interaction::ChartEvent;
use crate::render::{ElementId, PointerEventKind, SceneBatch, Surface};

use super::axis_renderer::render_axis;
use super::caption_controller::restyle_captions;
use super::mark_renderer::{render_circles, render_labels};
use super::scale_factory::{compute_x_scale, compute_y_scale};
use super::selection::{SelectionChange, reduce};
use super::{ScatterChart, TooltipContent};

/// What a dispatched [`ChartEvent`] did to the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DispatchOutcome {
    SelectionChanged(SelectionChange),
    /// The clicked caption was already active; nothing was redrawn.
    SelectionUnchanged,
    TooltipShown(TooltipContent),
    TooltipHidden,
}

impl<S: Surface> ScatterChart<S> {
    /// Routes one input event to the selection or tooltip controller.
    pub fn dispatch(&mut self, event: ChartEvent) -> ScatterResult<DispatchOutcome> {
        match event {
            ChartEvent::LabelClicked(field) => {
                let change = self.click_label(field)?;
                Ok(if change.is_changed() {
                    DispatchOutcome::SelectionChanged(change)
                } else {
                    DispatchOutcome::SelectionUnchanged
                })
            }
            ChartEvent::PointerEntered { record } => {
                self.show_tooltip(record).map(DispatchOutcome::TooltipShown)
            }
            ChartEvent::PointerLeft { record } => {
                self.hide_tooltip(record)?;
                Ok(DispatchOutcome::TooltipHidden)
            }
        }
    }

    /// Maps a hit-tested surface event back to a chart event.
    ///
    /// Returns `None` for elements that do not react to `kind`.
    #[must_use]
    pub fn resolve_event(&self, id: ElementId, kind: PointerEventKind) -> Option<ChartEvent> {
        match kind {
            PointerEventKind::Click => self
                .scene
                .captions
                .field_for(id)
                .map(ChartEvent::LabelClicked),
            PointerEventKind::PointerEnter => self
                .scene
                .marks
                .record_for_circle(id)
                .map(|record| ChartEvent::PointerEntered { record }),
            PointerEventKind::PointerLeave => self
                .scene
                .marks
                .record_for_circle(id)
                .map(|record| ChartEvent::PointerLeft { record }),
        }
    }

    /// Resolves and dispatches a raw surface event.
    pub fn handle_pointer_event(
        &mut self,
        id: ElementId,
        kind: PointerEventKind,
    ) -> ScatterResult<DispatchOutcome> {
        match self.resolve_event(id, kind) {
            Some(event) => self.dispatch(event),
            None => {
                warn!(element = %id, ?kind, "pointer event on element without handler");
                Err(ScatterError::UnknownElement(id))
            }
        }
    }

    /// Applies a caption click.
    ///
    /// Clicking the caption that is already active returns
    /// [`SelectionChange::Unchanged`] and leaves the surface untouched.
    /// Otherwise the clicked axis' scale is rebuilt and its axis, circles,
    /// labels, hover text and caption styles are updated in one batch.
    pub fn click_label(&mut self, field: AxisField) -> ScatterResult<SelectionChange> {
        let (next, change) = reduce(self.selection, field);
        let Some(axis) = change.axis() else {
            trace!(field = %field, "caption already active");
            return Ok(SelectionChange::Unchanged);
        };

        let duration_ms = self.config.transition_duration_ms;
        let label_offset = self.config.mark_label_offsets.update;
        let field = next.active(axis);
        let mut batch = SceneBatch::new();

        let (scale, handle) = match axis {
            Axis::X => {
                let scale = compute_x_scale(&self.dataset, next.x, self.layout)?;
                (scale, self.scene.x_axis.clone())
            }
            Axis::Y => {
                let scale = compute_y_scale(&self.dataset, next.y, self.layout)?;
                (scale, self.scene.y_axis.clone())
            }
        };
        let handle = render_axis(&mut batch, &mut self.ids, scale, handle, duration_ms)?;
        let positions = render_circles(
            &mut batch,
            &self.scene.marks,
            &self.dataset,
            scale,
            field,
            duration_ms,
        )?;
        render_labels(
            &mut batch,
            &self.scene.marks,
            &self.dataset,
            scale,
            field,
            label_offset,
            duration_ms,
        )?;

        let mut tooltip = self.tooltip.clone();
        tooltip.bind_tooltip(&mut batch, self.scene.marks.circles(), next.x, next.y);
        restyle_captions(&mut batch, &self.scene.captions, axis, next);

        self.surface.apply(&batch)?;

        self.selection = next;
        self.tooltip = tooltip;
        match axis {
            Axis::X => {
                self.x_scale = scale;
                self.scene.x_axis = handle;
                self.positions.x = positions;
            }
            Axis::Y => {
                self.y_scale = scale;
                self.scene.y_axis = handle;
                self.positions.y = positions;
            }
        }

        let (domain_min, domain_max) = scale.domain();
        debug!(
            axis = ?axis,
            field = %field,
            domain_min,
            domain_max,
            commands = batch.len(),
            "selection changed"
        );
        Ok(change)
    }

    fn show_tooltip(&mut self, record: usize) -> ScatterResult<TooltipContent> {
        let dataset = self.dataset.clone();
        let data = dataset.get(record).ok_or_else(|| {
            ScatterError::InvalidData(format!("record index {record} out of range"))
        })?;
        let (cx, cy) = self.positions.get(record).ok_or_else(|| {
            ScatterError::InvalidData(format!("record index {record} has no mark"))
        })?;
        let anchor = self
            .layout
            .plot_to_canvas(cx, cy - self.config.circle_radius);

        let mut batch = SceneBatch::new();
        let mut tooltip = self.tooltip.clone();
        let content = tooltip.show(&mut batch, record, data, anchor);
        self.surface.apply(&batch)?;
        self.tooltip = tooltip;
        trace!(record, state = %data.state, "tooltip shown");
        Ok(content)
    }

    fn hide_tooltip(&mut self, record: usize) -> ScatterResult<()> {
        if record >= self.dataset.len() {
            return Err(ScatterError::InvalidData(format!(
                "record index {record} out of range"
            )));
        }
        let mut batch = SceneBatch::new();
        let mut tooltip = self.tooltip.clone();
        tooltip.hide(&mut batch);
        self.surface.apply(&batch)?;
        self.tooltip = tooltip;
        trace!(record, "tooltip hidden");
        Ok(())
    }
}

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::core::{AxisField, ChartLayout, LinearScale};
use crate::data::{Dataset, load_dataset_from_path};
use crate::error::ScatterResult;
use crate::render::{
    Attr, AttrValue, ElementId, ElementIdAllocator, ElementKind, SceneBatch, StyleTag, Surface,
};

use super::axis_renderer::{AxisHandle, AxisOrient, mount_axis};
use super::caption_controller::{CaptionHandles, mount_captions};
use super::mark_renderer::{MarkHandles, MarkPositions, MarkStyle, mount_marks};
use super::scale_factory::{compute_x_scale, compute_y_scale};
use super::{ScatterChartConfig, SelectionState, TooltipController};

/// Handles to every element the chart updates after mount.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneHandles {
    pub chart_group: ElementId,
    pub x_axis: AxisHandle,
    pub y_axis: AxisHandle,
    pub marks: MarkHandles,
    pub captions: CaptionHandles,
}

/// Interactive scatter chart facade consumed by host applications.
///
/// `ScatterChart` owns the shared dataset, the selection state, both scales
/// and the handles of everything it drew on its surface.
pub struct ScatterChart<S: Surface> {
    pub(super) surface: S,
    pub(super) dataset: Arc<Dataset>,
    pub(super) config: ScatterChartConfig,
    pub(super) layout: ChartLayout,
    pub(super) selection: SelectionState,
    pub(super) x_scale: LinearScale,
    pub(super) y_scale: LinearScale,
    pub(super) scene: SceneHandles,
    pub(super) tooltip: TooltipController,
    pub(super) positions: MarkPositions,
    pub(super) ids: ElementIdAllocator,
}

impl<S: Surface> ScatterChart<S> {
    /// Draws the initial chart for `config.initial_selection` onto `surface`.
    pub fn mount(
        mut surface: S,
        dataset: impl Into<Arc<Dataset>>,
        config: ScatterChartConfig,
    ) -> ScatterResult<Self> {
        config.validate()?;
        let dataset = dataset.into();
        let layout = config.layout()?;
        let selection = config.initial_selection;

        let x_scale = compute_x_scale(&dataset, selection.x, layout)?;
        let y_scale = compute_y_scale(&dataset, selection.y, layout)?;

        let mut ids = ElementIdAllocator::default();
        let mut batch = SceneBatch::new();

        let chart_group = ids.next_id();
        batch.append(chart_group, ElementId::ROOT, ElementKind::Group).set_attr(
            chart_group,
            Attr::Transform,
            AttrValue::Translate {
                x: layout.margins.left,
                y: layout.margins.top,
            },
        );

        let x_axis = mount_axis(
            &mut batch,
            &mut ids,
            chart_group,
            AxisOrient::Bottom,
            x_scale,
            config.tick_count,
        )?;
        batch
            .classed(x_axis.group(), StyleTag::XAxis, true)
            .set_attr(
                x_axis.group(),
                Attr::Transform,
                AttrValue::Translate {
                    x: 0.0,
                    y: layout.plot_height,
                },
            );

        let y_axis = mount_axis(
            &mut batch,
            &mut ids,
            chart_group,
            AxisOrient::Left,
            y_scale,
            config.tick_count,
        )?;
        batch.classed(y_axis.group(), StyleTag::YAxis, true);

        let (marks, positions) = mount_marks(
            &mut batch,
            &mut ids,
            chart_group,
            &dataset,
            (x_scale, AxisField::X(selection.x)),
            (y_scale, AxisField::Y(selection.y)),
            MarkStyle {
                circle_radius: config.circle_radius,
                label_font_size_px: config.mark_label_font_size_px,
                initial_label_offset: config.mark_label_offsets.initial,
            },
        )?;

        let captions = mount_captions(&mut batch, &mut ids, chart_group, layout, selection);

        let mut tooltip = TooltipController::mount(
            &mut batch,
            &mut ids,
            ElementId::ROOT,
            config.tooltip_offset,
            (selection.x, selection.y),
        );
        tooltip.bind_tooltip(&mut batch, marks.circles(), selection.x, selection.y);

        surface.apply(&batch)?;
        debug!(
            records = dataset.len(),
            x = %selection.x.metric(),
            y = %selection.y.metric(),
            commands = batch.len(),
            "mounted scatter chart"
        );

        Ok(Self {
            surface,
            dataset,
            config,
            layout,
            selection,
            x_scale,
            y_scale,
            scene: SceneHandles {
                chart_group,
                x_axis,
                y_axis,
                marks,
                captions,
            },
            tooltip,
            positions,
            ids,
        })
    }

    /// Loads the dataset at `path` and mounts the chart.
    ///
    /// A load failure is returned before anything is drawn on `surface`.
    pub fn from_csv_path(
        surface: S,
        path: impl AsRef<Path>,
        config: ScatterChartConfig,
    ) -> ScatterResult<Self> {
        let dataset = load_dataset_from_path(path)?;
        Self::mount(surface, dataset, config)
    }

    #[must_use]
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    #[must_use]
    pub fn config(&self) -> &ScatterChartConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn selection(&self) -> SelectionState {
        self.selection
    }

    #[must_use]
    pub fn x_scale(&self) -> LinearScale {
        self.x_scale
    }

    #[must_use]
    pub fn y_scale(&self) -> LinearScale {
        self.y_scale
    }

    #[must_use]
    pub fn scene(&self) -> &SceneHandles {
        &self.scene
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipController {
        &self.tooltip
    }

    /// Circle centres in plot coordinates after the latest update.
    #[must_use]
    pub fn mark_positions(&self) -> &MarkPositions {
        &self.positions
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable surface access, e.g. to advance a retained surface's clock.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }
}

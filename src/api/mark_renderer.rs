use crate::core::{Axis, AxisField, LinearScale, Metric};
use crate::data::Dataset;
use crate::error::ScatterResult;
use crate::render::{
    Attr, AttrValue, ElementId, ElementIdAllocator, ElementKind, SceneBatch, StyleTag, TextAnchor,
};

/// Scene elements of the per-record marks, in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkHandles {
    circles: Vec<ElementId>,
    labels: Vec<ElementId>,
}

impl MarkHandles {
    #[must_use]
    pub fn circles(&self) -> &[ElementId] {
        &self.circles
    }

    #[must_use]
    pub fn labels(&self) -> &[ElementId] {
        &self.labels
    }

    /// Dataset index of the record drawn by `circle`.
    #[must_use]
    pub fn record_for_circle(&self, circle: ElementId) -> Option<usize> {
        self.circles.iter().position(|id| *id == circle)
    }
}

/// Circle centres in plot coordinates, in dataset order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkPositions {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl MarkPositions {
    #[must_use]
    pub fn get(&self, record: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(record)?, *self.y.get(record)?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkStyle {
    pub circle_radius: f64,
    pub label_font_size_px: f64,
    pub initial_label_offset: f64,
}

/// Pixel coordinate of every record's `metric` value along one axis.
pub fn project_marks(
    dataset: &Dataset,
    scale: LinearScale,
    metric: Metric,
) -> ScatterResult<Vec<f64>> {
    dataset
        .iter()
        .map(|record| scale.domain_to_pixel(record.value(metric)))
        .collect()
}

/// Like [`project_marks`], but vertical label positions are computed from the
/// value minus `y_offset` so the abbreviation sits inside its circle.
pub fn project_labels(
    dataset: &Dataset,
    scale: LinearScale,
    field: AxisField,
    y_offset: f64,
) -> ScatterResult<Vec<f64>> {
    let metric = field.metric();
    let offset = match field.axis() {
        Axis::X => 0.0,
        Axis::Y => y_offset,
    };
    dataset
        .iter()
        .map(|record| scale.domain_to_pixel(record.value(metric) - offset))
        .collect()
}

/// Appends one circle and one abbreviation label per record.
pub fn mount_marks(
    batch: &mut SceneBatch,
    ids: &mut ElementIdAllocator,
    parent: ElementId,
    dataset: &Dataset,
    (x_scale, x_field): (LinearScale, AxisField),
    (y_scale, y_field): (LinearScale, AxisField),
    style: MarkStyle,
) -> ScatterResult<(MarkHandles, MarkPositions)> {
    let positions = MarkPositions {
        x: project_marks(dataset, x_scale, x_field.metric())?,
        y: project_marks(dataset, y_scale, y_field.metric())?,
    };
    let label_x = project_labels(dataset, x_scale, x_field, style.initial_label_offset)?;
    let label_y = project_labels(dataset, y_scale, y_field, style.initial_label_offset)?;

    let mut handles = MarkHandles {
        circles: Vec::with_capacity(dataset.len()),
        labels: Vec::with_capacity(dataset.len()),
    };

    for (cx, cy) in positions.x.iter().zip(&positions.y) {
        let circle = ids.next_id();
        batch
            .append(circle, parent, ElementKind::Circle)
            .set_number(circle, Attr::Cx, *cx)
            .set_number(circle, Attr::Cy, *cy)
            .set_number(circle, Attr::R, style.circle_radius)
            .classed(circle, StyleTag::StateCircle, true);
        handles.circles.push(circle);
    }

    for (record, (x, y)) in dataset.iter().zip(label_x.iter().zip(&label_y)) {
        let label = ids.next_id();
        batch
            .append(label, parent, ElementKind::Text)
            .set_text(label, record.abbr.clone())
            .set_number(label, Attr::X, *x)
            .set_number(label, Attr::Y, *y)
            .set_number(label, Attr::FontSize, style.label_font_size_px)
            .set_attr(label, Attr::TextAnchor, AttrValue::Anchor(TextAnchor::Middle))
            .classed(label, StyleTag::StateText, true);
        handles.labels.push(label);
    }

    Ok((handles, positions))
}

/// Moves every circle along `field`'s axis to its position under `scale`.
///
/// Returns the new coordinates in dataset order.
pub fn render_circles(
    batch: &mut SceneBatch,
    handles: &MarkHandles,
    dataset: &Dataset,
    scale: LinearScale,
    field: AxisField,
    duration_ms: u32,
) -> ScatterResult<Vec<f64>> {
    let positions = project_marks(dataset, scale, field.metric())?;
    let attr = match field.axis() {
        Axis::X => Attr::Cx,
        Axis::Y => Attr::Cy,
    };
    for (circle, position) in handles.circles.iter().zip(&positions) {
        batch.transition(*circle, duration_ms, [(attr, AttrValue::Number(*position))]);
    }
    Ok(positions)
}

/// Moves every abbreviation label along `field`'s axis.
pub fn render_labels(
    batch: &mut SceneBatch,
    handles: &MarkHandles,
    dataset: &Dataset,
    scale: LinearScale,
    field: AxisField,
    y_offset: f64,
    duration_ms: u32,
) -> ScatterResult<Vec<f64>> {
    let positions = project_labels(dataset, scale, field, y_offset)?;
    let attr = match field.axis() {
        Axis::X => Attr::X,
        Axis::Y => Attr::Y,
    };
    for (label, position) in handles.labels.iter().zip(&positions) {
        batch.transition(*label, duration_ms, [(attr, AttrValue::Number(*position))]);
    }
    Ok(positions)
}

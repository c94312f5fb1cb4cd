use indexmap::IndexMap;
use ordered_float::OrderedFloat;

use crate::core::LinearScale;
use crate::error::ScatterResult;
use crate::render::{
    Attr, AttrValue, ElementId, ElementIdAllocator, ElementKind, SceneBatch, StyleTag, TextAnchor,
};

const TICK_SIZE_PX: f64 = 6.0;
const TICK_PADDING_PX: f64 = 3.0;
const AXIS_FONT_SIZE_PX: f64 = 10.0;
// 0.71em and 0.32em at the axis font size.
const BOTTOM_LABEL_DY_PX: f64 = 7.1;
const LEFT_LABEL_DY_PX: f64 = 3.2;
const HIDDEN_OPACITY: f64 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrient {
    Bottom,
    Left,
}

impl AxisOrient {
    fn tick_transform(self, position: f64) -> AttrValue {
        match self {
            AxisOrient::Bottom => AttrValue::Translate { x: position, y: 0.0 },
            AxisOrient::Left => AttrValue::Translate { x: 0.0, y: position },
        }
    }

    fn text_anchor(self) -> TextAnchor {
        match self {
            AxisOrient::Bottom => TextAnchor::Middle,
            AxisOrient::Left => TextAnchor::End,
        }
    }
}

/// Elements drawn for a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisTickElements {
    pub group: ElementId,
    pub line: ElementId,
    pub text: ElementId,
}

/// Retained state of a drawn axis, fed back into [`render_axis`] so the next
/// redraw can animate from it.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisHandle {
    group: ElementId,
    domain: ElementId,
    orient: AxisOrient,
    scale: LinearScale,
    tick_count: usize,
    ticks: IndexMap<OrderedFloat<f64>, AxisTickElements>,
}

impl AxisHandle {
    #[must_use]
    pub fn group(&self) -> ElementId {
        self.group
    }

    #[must_use]
    pub fn domain_line(&self) -> ElementId {
        self.domain
    }

    #[must_use]
    pub fn orient(&self) -> AxisOrient {
        self.orient
    }

    /// Scale the axis was last drawn with.
    #[must_use]
    pub fn scale(&self) -> LinearScale {
        self.scale
    }

    #[must_use]
    pub fn tick_values(&self) -> Vec<f64> {
        self.ticks.keys().map(|key| key.0).collect()
    }

    #[must_use]
    pub fn tick(&self, value: f64) -> Option<AxisTickElements> {
        self.ticks.get(&OrderedFloat(value)).copied()
    }
}

/// Draws a fresh axis under `parent` without animation.
pub fn mount_axis(
    batch: &mut SceneBatch,
    ids: &mut ElementIdAllocator,
    parent: ElementId,
    orient: AxisOrient,
    scale: LinearScale,
    tick_count: usize,
) -> ScatterResult<AxisHandle> {
    let group = ids.next_id();
    batch
        .append(group, parent, ElementKind::Group)
        .set_number(group, Attr::FontSize, AXIS_FONT_SIZE_PX)
        .set_attr(group, Attr::TextAnchor, AttrValue::Anchor(orient.text_anchor()));

    let domain = ids.next_id();
    batch
        .append(domain, group, ElementKind::Line)
        .classed(domain, StyleTag::Domain, true);
    for (attr, value) in domain_line_attrs(orient, scale) {
        batch.set_attr(domain, attr, value);
    }

    let mut ticks = IndexMap::new();
    for value in scale.ticks(tick_count) {
        let position = scale.domain_to_pixel(value)?;
        let label = scale.format_tick(value, tick_count);
        let elements = append_tick(batch, ids, group, orient, position, 1.0, label);
        ticks.insert(OrderedFloat(value), elements);
    }

    Ok(AxisHandle {
        group,
        domain,
        orient,
        scale,
        tick_count,
        ticks,
    })
}

/// Redraws `handle` for `scale`, animating over `duration_ms`.
///
/// Ticks are keyed by value: surviving ticks slide to their new position,
/// entering ticks fade in from where the previous scale would have put them,
/// and exiting ticks follow the new scale while fading out and are removed
/// when their transition ends.
pub fn render_axis(
    batch: &mut SceneBatch,
    ids: &mut ElementIdAllocator,
    scale: LinearScale,
    mut handle: AxisHandle,
    duration_ms: u32,
) -> ScatterResult<AxisHandle> {
    let previous = handle.scale;
    let orient = handle.orient;
    let tick_values = scale.ticks(handle.tick_count);
    let mut next_ticks = IndexMap::with_capacity(tick_values.len());

    for value in tick_values {
        let key = OrderedFloat(value);
        let position = scale.domain_to_pixel(value)?;
        let label = scale.format_tick(value, handle.tick_count);
        let elements = match handle.ticks.shift_remove(&key) {
            Some(elements) => {
                batch.set_text(elements.text, label);
                elements
            }
            None => {
                let start = previous.domain_to_pixel(value)?;
                append_tick(
                    batch,
                    ids,
                    handle.group,
                    orient,
                    start,
                    HIDDEN_OPACITY,
                    label,
                )
            }
        };
        batch.transition(
            elements.group,
            duration_ms,
            [
                (Attr::Transform, orient.tick_transform(position)),
                (Attr::Opacity, AttrValue::Number(1.0)),
            ],
        );
        next_ticks.insert(key, elements);
    }

    for (key, elements) in handle.ticks.drain(..) {
        let position = scale.domain_to_pixel(key.0)?;
        batch
            .transition(
                elements.group,
                duration_ms,
                [
                    (Attr::Transform, orient.tick_transform(position)),
                    (Attr::Opacity, AttrValue::Number(HIDDEN_OPACITY)),
                ],
            )
            .remove(elements.group, true);
    }

    batch.transition(handle.domain, duration_ms, domain_line_attrs(orient, scale));

    Ok(AxisHandle {
        scale,
        ticks: next_ticks,
        ..handle
    })
}

fn domain_line_attrs(orient: AxisOrient, scale: LinearScale) -> [(Attr, AttrValue); 4] {
    let (start, end) = scale.range();
    match orient {
        AxisOrient::Bottom => [
            (Attr::X1, AttrValue::Number(start)),
            (Attr::X2, AttrValue::Number(end)),
            (Attr::Y1, AttrValue::Number(0.0)),
            (Attr::Y2, AttrValue::Number(0.0)),
        ],
        AxisOrient::Left => [
            (Attr::X1, AttrValue::Number(0.0)),
            (Attr::X2, AttrValue::Number(0.0)),
            (Attr::Y1, AttrValue::Number(start)),
            (Attr::Y2, AttrValue::Number(end)),
        ],
    }
}

fn append_tick(
    batch: &mut SceneBatch,
    ids: &mut ElementIdAllocator,
    parent: ElementId,
    orient: AxisOrient,
    position: f64,
    opacity: f64,
    label: String,
) -> AxisTickElements {
    let group = ids.next_id();
    let line = ids.next_id();
    let text = ids.next_id();

    batch
        .append(group, parent, ElementKind::Group)
        .classed(group, StyleTag::Tick, true)
        .set_attr(group, Attr::Transform, orient.tick_transform(position))
        .set_number(group, Attr::Opacity, opacity)
        .append(line, group, ElementKind::Line)
        .append(text, group, ElementKind::Text)
        .set_text(text, label);

    match orient {
        AxisOrient::Bottom => {
            batch
                .set_number(line, Attr::Y2, TICK_SIZE_PX)
                .set_number(text, Attr::Y, TICK_SIZE_PX + TICK_PADDING_PX)
                .set_number(text, Attr::Dy, BOTTOM_LABEL_DY_PX);
        }
        AxisOrient::Left => {
            batch
                .set_number(line, Attr::X2, -TICK_SIZE_PX)
                .set_number(text, Attr::X, -(TICK_SIZE_PX + TICK_PADDING_PX))
                .set_number(text, Attr::Dy, LEFT_LABEL_DY_PX);
        }
    }

    AxisTickElements { group, line, text }
}

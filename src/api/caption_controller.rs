use crate::core::{Axis, AxisField, ChartLayout, XField, YField};
use crate::render::{
    Attr, AttrValue, ElementId, ElementIdAllocator, ElementKind, PointerEventKind, SceneBatch,
    StyleTag, TextAnchor,
};

use super::SelectionState;

const X_CAPTION_GAP_PX: f64 = 20.0;
const X_CAPTION_SPACING_PX: f64 = 20.0;
// Healthcare sits furthest from the axis, obesity nearest.
const Y_CAPTION_DY_PX: [f64; 3] = [60.0, 40.0, 20.0];

/// The six clickable axis captions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionHandles {
    x_group: ElementId,
    y_group: ElementId,
    x: [(XField, ElementId); 3],
    y: [(YField, ElementId); 3],
}

impl CaptionHandles {
    #[must_use]
    pub fn x_group(&self) -> ElementId {
        self.x_group
    }

    #[must_use]
    pub fn y_group(&self) -> ElementId {
        self.y_group
    }

    #[must_use]
    pub fn element(&self, field: AxisField) -> ElementId {
        match field {
            AxisField::X(field) => self.x[field as usize].1,
            AxisField::Y(field) => self.y[field as usize].1,
        }
    }

    /// Field tagged on the caption element `id`.
    #[must_use]
    pub fn field_for(&self, id: ElementId) -> Option<AxisField> {
        self.x
            .iter()
            .find(|(_, element)| *element == id)
            .map(|(field, _)| AxisField::X(*field))
            .or_else(|| {
                self.y
                    .iter()
                    .find(|(_, element)| *element == id)
                    .map(|(field, _)| AxisField::Y(*field))
            })
    }
}

pub fn mount_captions(
    batch: &mut SceneBatch,
    ids: &mut ElementIdAllocator,
    parent: ElementId,
    layout: ChartLayout,
    selection: SelectionState,
) -> CaptionHandles {
    let x_group = ids.next_id();
    batch
        .append(x_group, parent, ElementKind::Group)
        .set_attr(
            x_group,
            Attr::Transform,
            AttrValue::Translate {
                x: layout.plot_width / 2.0,
                y: layout.plot_height + X_CAPTION_GAP_PX,
            },
        )
        .set_attr(x_group, Attr::TextAnchor, AttrValue::Anchor(TextAnchor::Middle));

    let x = XField::ALL.map(|field| {
        let id = ids.next_id();
        let row = (field as usize + 1) as f64;
        append_caption(batch, id, x_group, AxisField::X(field));
        batch
            .set_number(id, Attr::X, 0.0)
            .set_number(id, Attr::Y, X_CAPTION_SPACING_PX * row);
        (field, id)
    });

    let y_group = ids.next_id();
    batch
        .append(y_group, parent, ElementKind::Group)
        .set_attr(y_group, Attr::Transform, AttrValue::Rotate(-90.0))
        .set_attr(y_group, Attr::TextAnchor, AttrValue::Anchor(TextAnchor::Middle));

    let y = YField::ALL.map(|field| {
        let id = ids.next_id();
        append_caption(batch, id, y_group, AxisField::Y(field));
        batch
            .set_number(id, Attr::Y, -layout.margins.left)
            .set_number(id, Attr::X, -(layout.plot_height / 2.0))
            .set_number(id, Attr::Dy, Y_CAPTION_DY_PX[field as usize]);
        (field, id)
    });

    let handles = CaptionHandles {
        x_group,
        y_group,
        x,
        y,
    };
    restyle_captions(batch, &handles, Axis::X, selection);
    restyle_captions(batch, &handles, Axis::Y, selection);
    handles
}

fn append_caption(batch: &mut SceneBatch, id: ElementId, parent: ElementId, field: AxisField) {
    batch
        .append(id, parent, ElementKind::Text)
        .set_text(id, field.caption())
        .classed(id, StyleTag::AxisCaption, true)
        .listen(id, PointerEventKind::Click);
}

/// Marks the caption of `axis`'s active field active and its two siblings
/// inactive.
pub fn restyle_captions(
    batch: &mut SceneBatch,
    handles: &CaptionHandles,
    axis: Axis,
    selection: SelectionState,
) {
    for (field, active) in selection.label_flags(axis) {
        let id = handles.element(field);
        batch
            .classed(id, StyleTag::Active, active)
            .classed(id, StyleTag::Inactive, !active);
    }
}

use serde::{Deserialize, Serialize};

use crate::core::{Axis, AxisField, XField, YField};

/// The only mutable chart state: which metric drives each axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SelectionState {
    pub x: XField,
    pub y: YField,
}

impl SelectionState {
    #[must_use]
    pub const fn new(x: XField, y: YField) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn active(self, axis: Axis) -> AxisField {
        match axis {
            Axis::X => AxisField::X(self.x),
            Axis::Y => AxisField::Y(self.y),
        }
    }

    #[must_use]
    pub fn is_active(self, field: AxisField) -> bool {
        self.active(field.axis()) == field
    }

    /// The three candidate fields of `axis`, each paired with its active flag.
    #[must_use]
    pub fn label_flags(self, axis: Axis) -> [(AxisField, bool); 3] {
        let fields: [AxisField; 3] = match axis {
            Axis::X => XField::ALL.map(AxisField::X),
            Axis::Y => YField::ALL.map(AxisField::Y),
        };
        fields.map(|field| (field, self.is_active(field)))
    }
}

/// Outcome of feeding one caption click to [`reduce`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionChange {
    /// The clicked field was already active on its axis.
    Unchanged,
    X { from: XField, to: XField },
    Y { from: YField, to: YField },
}

impl SelectionChange {
    #[must_use]
    pub fn is_changed(self) -> bool {
        !matches!(self, SelectionChange::Unchanged)
    }

    #[must_use]
    pub fn axis(self) -> Option<Axis> {
        match self {
            SelectionChange::Unchanged => None,
            SelectionChange::X { .. } => Some(Axis::X),
            SelectionChange::Y { .. } => Some(Axis::Y),
        }
    }
}

/// Pure selection reducer.
///
/// Clicking the field already active on its axis leaves the state untouched;
/// otherwise only that axis' half of the pair changes.
#[must_use]
pub fn reduce(state: SelectionState, clicked: AxisField) -> (SelectionState, SelectionChange) {
    match clicked {
        AxisField::X(to) if to != state.x => (
            SelectionState { x: to, ..state },
            SelectionChange::X { from: state.x, to },
        ),
        AxisField::Y(to) if to != state.y => (
            SelectionState { y: to, ..state },
            SelectionChange::Y { from: state.y, to },
        ),
        AxisField::X(_) | AxisField::Y(_) => (state, SelectionChange::Unchanged),
    }
}

#[cfg(test)]
mod tests {
    use super::{SelectionChange, SelectionState, reduce};
    use crate::core::{Axis, AxisField, XField, YField};

    #[test]
    fn initial_selection_is_poverty_against_healthcare() {
        let state = SelectionState::default();
        assert_eq!(state.x, XField::Poverty);
        assert_eq!(state.y, YField::Healthcare);
    }

    #[test]
    fn clicking_active_field_is_a_no_op() {
        let state = SelectionState::default();
        let (next, change) = reduce(state, AxisField::X(XField::Poverty));
        assert_eq!(next, state);
        assert_eq!(change, SelectionChange::Unchanged);
    }

    #[test]
    fn clicking_other_axis_keeps_this_axis() {
        let state = SelectionState::default();
        let (next, change) = reduce(state, AxisField::Y(YField::Obesity));
        assert_eq!(next.x, XField::Poverty);
        assert_eq!(next.y, YField::Obesity);
        assert_eq!(change.axis(), Some(Axis::Y));
    }

    #[test]
    fn exactly_one_label_flag_is_active_per_axis() {
        let state = SelectionState::new(XField::Income, YField::Smokes);
        for axis in [Axis::X, Axis::Y] {
            let flags = state.label_flags(axis);
            assert_eq!(flags.iter().filter(|(_, active)| *active).count(), 1);
        }
        assert!(state.label_flags(Axis::X)[2].1);
        assert!(state.label_flags(Axis::Y)[1].1);
    }
}

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScatterError;

/// One of the six numeric columns carried by every record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Poverty,
    Age,
    Income,
    Healthcare,
    Smokes,
    Obesity,
}

impl Metric {
    pub const COUNT: usize = 6;

    pub const ALL: [Metric; Metric::COUNT] = [
        Metric::Poverty,
        Metric::Age,
        Metric::Income,
        Metric::Healthcare,
        Metric::Smokes,
        Metric::Obesity,
    ];

    /// Column header (and label tag) for this metric.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Metric::Poverty => "poverty",
            Metric::Age => "age",
            Metric::Income => "income",
            Metric::Healthcare => "healthcare",
            Metric::Smokes => "smokes",
            Metric::Obesity => "obesity",
        }
    }

    #[must_use]
    pub const fn axis_field(self) -> AxisField {
        match self {
            Metric::Poverty => AxisField::X(XField::Poverty),
            Metric::Age => AxisField::X(XField::Age),
            Metric::Income => AxisField::X(XField::Income),
            Metric::Healthcare => AxisField::Y(YField::Healthcare),
            Metric::Smokes => AxisField::Y(YField::Smokes),
            Metric::Obesity => AxisField::Y(YField::Obesity),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Metric {
    type Err = ScatterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Metric::ALL
            .into_iter()
            .find(|metric| metric.column() == value)
            .ok_or_else(|| ScatterError::UnknownField(value.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

/// Demographic metrics selectable on the horizontal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum XField {
    #[default]
    Poverty,
    Age,
    Income,
}

impl XField {
    pub const ALL: [XField; 3] = [XField::Poverty, XField::Age, XField::Income];

    #[must_use]
    pub const fn metric(self) -> Metric {
        match self {
            XField::Poverty => Metric::Poverty,
            XField::Age => Metric::Age,
            XField::Income => Metric::Income,
        }
    }

    /// Clickable axis caption text.
    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            XField::Poverty => "In Poverty (%)",
            XField::Age => "Age (Median)",
            XField::Income => "Household Income (Median)",
        }
    }

    #[must_use]
    pub const fn tooltip_label(self) -> &'static str {
        match self {
            XField::Poverty => "Poverty (%)",
            XField::Age => "Age:",
            XField::Income => "Income ($):",
        }
    }
}

/// Health metrics selectable on the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YField {
    #[default]
    Healthcare,
    Smokes,
    Obesity,
}

impl YField {
    pub const ALL: [YField; 3] = [YField::Healthcare, YField::Smokes, YField::Obesity];

    #[must_use]
    pub const fn metric(self) -> Metric {
        match self {
            YField::Healthcare => Metric::Healthcare,
            YField::Smokes => Metric::Smokes,
            YField::Obesity => Metric::Obesity,
        }
    }

    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            YField::Healthcare => "Lacks Healthcare (%)",
            YField::Smokes => "Smokes (%)",
            YField::Obesity => "Obese (%)",
        }
    }

    #[must_use]
    pub const fn tooltip_label(self) -> &'static str {
        match self {
            YField::Healthcare => "Healthcare (%)",
            YField::Smokes => "Smokes (%)",
            YField::Obesity => "Obesity (%)",
        }
    }
}

/// A field tagged with the axis it drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AxisField {
    X(XField),
    Y(YField),
}

impl AxisField {
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            AxisField::X(_) => Axis::X,
            AxisField::Y(_) => Axis::Y,
        }
    }

    #[must_use]
    pub const fn metric(self) -> Metric {
        match self {
            AxisField::X(field) => field.metric(),
            AxisField::Y(field) => field.metric(),
        }
    }

    #[must_use]
    pub const fn caption(self) -> &'static str {
        match self {
            AxisField::X(field) => field.caption(),
            AxisField::Y(field) => field.caption(),
        }
    }
}

impl From<XField> for AxisField {
    fn from(field: XField) -> Self {
        AxisField::X(field)
    }
}

impl From<YField> for AxisField {
    fn from(field: YField) -> Self {
        AxisField::Y(field)
    }
}

impl fmt::Display for AxisField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.metric(), f)
    }
}

impl FromStr for AxisField {
    type Err = ScatterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value.parse::<Metric>().map(Metric::axis_field)
    }
}

#[cfg(test)]
mod tests {
    use super::{Axis, AxisField, Metric, XField, YField};

    #[test]
    fn label_tags_parse_to_their_axis() {
        assert_eq!("age".parse::<AxisField>().ok(), Some(AxisField::X(XField::Age)));
        assert_eq!(
            "smokes".parse::<AxisField>().ok(),
            Some(AxisField::Y(YField::Smokes))
        );
        assert_eq!(AxisField::Y(YField::Obesity).axis(), Axis::Y);
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!("weight".parse::<Metric>().is_err());
        assert!("Poverty".parse::<AxisField>().is_err());
    }

    #[test]
    fn every_metric_round_trips_through_its_column_name() {
        for metric in Metric::ALL {
            assert_eq!(metric.column().parse::<Metric>().ok(), Some(metric));
            assert_eq!(metric.axis_field().metric(), metric);
        }
    }
}

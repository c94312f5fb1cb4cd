use serde::{Deserialize, Serialize};

use crate::core::{Metric, XField, YField};
use crate::error::{ScatterError, ScatterResult};

/// One U.S. state's demographic and health figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub state: String,
    pub abbr: String,
    pub poverty: f64,
    pub age: f64,
    pub income: f64,
    pub healthcare: f64,
    pub smokes: f64,
    pub obesity: f64,
}

impl Record {
    #[must_use]
    pub fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Poverty => self.poverty,
            Metric::Age => self.age,
            Metric::Income => self.income,
            Metric::Healthcare => self.healthcare,
            Metric::Smokes => self.smokes,
            Metric::Obesity => self.obesity,
        }
    }

    #[must_use]
    pub fn x_value(&self, field: XField) -> f64 {
        self.value(field.metric())
    }

    #[must_use]
    pub fn y_value(&self, field: YField) -> f64 {
        self.value(field.metric())
    }

    fn validate(&self, row: usize) -> ScatterResult<()> {
        for metric in Metric::ALL {
            let value = self.value(metric);
            if !value.is_finite() {
                return Err(ScatterError::InvalidField {
                    row,
                    column: metric.column().to_owned(),
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Ordered, immutable collection of records shared by every chart component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    records: Vec<Record>,
}

impl Dataset {
    /// Wraps `records` after checking the set is non-empty and every metric
    /// is finite.
    pub fn new(records: Vec<Record>) -> ScatterResult<Self> {
        if records.is_empty() {
            return Err(ScatterError::EmptyDataset);
        }
        for (index, record) in records.iter().enumerate() {
            record.validate(index + 1)?;
        }
        Ok(Self { records })
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// `(min, max)` of `metric` over all records.
    #[must_use]
    pub fn extent(&self, metric: Metric) -> (f64, f64) {
        self.records.iter().map(|record| record.value(metric)).fold(
            (f64::INFINITY, f64::NEG_INFINITY),
            |(min, max), value| (min.min(value), max.max(value)),
        )
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

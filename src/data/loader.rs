use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::core::Metric;
use crate::data::{Dataset, Record};
use crate::error::{ScatterError, ScatterResult};

/// Header positions of the columns a record is built from.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    state: usize,
    abbr: usize,
    metrics: [usize; Metric::COUNT],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> ScatterResult<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| ScatterError::MissingColumn(name.to_owned()))
        };

        let mut metrics = [0; Metric::COUNT];
        for (slot, metric) in metrics.iter_mut().zip(Metric::ALL) {
            *slot = find(metric.column())?;
        }

        Ok(Self {
            state: find("state")?,
            abbr: find("abbr")?,
            metrics,
        })
    }

    fn parse_row(&self, row: &StringRecord, row_number: usize) -> ScatterResult<Record> {
        let text = |index: usize| row.get(index).unwrap_or_default();
        let mut values = [0.0; Metric::COUNT];
        for ((value, metric), index) in values.iter_mut().zip(Metric::ALL).zip(self.metrics) {
            *value = parse_metric(text(index), metric, row_number)?;
        }
        let [poverty, age, income, healthcare, smokes, obesity] = values;

        Ok(Record {
            state: text(self.state).to_owned(),
            abbr: text(self.abbr).to_owned(),
            poverty,
            age,
            income,
            healthcare,
            smokes,
            obesity,
        })
    }
}

fn parse_metric(raw: &str, metric: Metric, row_number: usize) -> ScatterResult<f64> {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(ScatterError::InvalidField {
            row: row_number,
            column: metric.column().to_owned(),
            value: raw.to_owned(),
        }),
    }
}

/// Reads a dataset file from disk.
pub fn load_dataset_from_path(path: impl AsRef<Path>) -> ScatterResult<Dataset> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ScatterError::Load {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = load_dataset_from_reader(file)?;
    debug!(path = %path.display(), records = dataset.len(), "loaded dataset");
    Ok(dataset)
}

/// Parses comma-separated records with a header row.
///
/// Columns other than `state`, `abbr` and the six metrics are ignored. A
/// metric cell that does not parse to a finite number rejects the whole
/// dataset.
pub fn load_dataset_from_reader<R: Read>(reader: R) -> ScatterResult<Dataset> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let columns = ColumnIndex::from_headers(csv_reader.headers()?)?;

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row = row?;
        records.push(columns.parse_row(&row, index + 1)?);
    }

    Dataset::new(records)
}

pub fn parse_dataset_str(input: &str) -> ScatterResult<Dataset> {
    load_dataset_from_reader(input.as_bytes())
}

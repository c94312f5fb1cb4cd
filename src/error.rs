use std::path::PathBuf;

use thiserror::Error;

use crate::render::ElementId;

pub type ScatterResult<T> = Result<T, ScatterError>;

#[derive(Debug, Error)]
pub enum ScatterError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to read dataset `{path}`: {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("dataset is missing required column `{0}`")]
    MissingColumn(String),

    #[error("row {row}: column `{column}` has non-numeric value `{value}`")]
    InvalidField {
        row: usize,
        column: String,
        value: String,
    },

    #[error("dataset contains no records")]
    EmptyDataset,

    #[error("unknown metric field `{0}`")]
    UnknownField(String),

    #[error("unknown scene element {0}")]
    UnknownElement(ElementId),

    #[error("invalid chart config: {0}")]
    Config(String),

    #[error("surface backend failure: {0}")]
    Backend(String),
}

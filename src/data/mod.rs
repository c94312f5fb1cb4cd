//! Dataset model and CSV loading.

mod loader;
mod record;

pub use loader::{load_dataset_from_path, load_dataset_from_reader, parse_dataset_str};
pub use record::{Dataset, Record};

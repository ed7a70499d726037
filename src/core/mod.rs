pub mod csv_format;
pub mod engine;
pub mod pipeline;
pub mod scheduler;

pub use crate::domain::model::{BatchReport, InputRow, LookupResult, RowOutcome, RowReport};
pub use crate::domain::ports::{ConfigProvider, Pipeline, PlaceLookup, Storage};
pub use crate::utils::error::Result;

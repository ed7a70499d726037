pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod interactive;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{GooglePlacesClient, YelpClient};
pub use config::{cli::LocalStorage, env::ProviderKeys, EnrichSettings};
pub use crate::core::{engine::EnrichEngine, pipeline::CsvPipeline, scheduler::BatchScheduler};
pub use domain::model::{LookupResult, RunSummary};
pub use utils::error::{EnrichError, Result};

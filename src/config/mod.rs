pub mod cli;
pub mod env;
pub mod toml_config;

use crate::adapters::google_places::{DEFAULT_LOCATION, DEFAULT_PAGE_DELAY};
use crate::core::scheduler::{DEFAULT_BATCH_DELAY, DEFAULT_BATCH_SIZE};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_at_least, validate_input_path, validate_location, validate_output_name, Validate,
};
use std::time::Duration;
use toml_config::FileConfig;

pub const DEFAULT_OUTPUT_FILE: &str = "google_places_results.csv";

/// 合併預設值、設定檔與命令列參數後的最終設定
#[derive(Debug, Clone)]
pub struct EnrichSettings {
    pub input_file: String,
    pub output_file_name: String,
    pub location: Option<String>,
    pub batch_size: usize,
    pub batch_delay: Duration,
    pub page_delay: Duration,
}

impl Default for EnrichSettings {
    fn default() -> Self {
        Self {
            input_file: String::new(),
            output_file_name: DEFAULT_OUTPUT_FILE.to_string(),
            location: Some(DEFAULT_LOCATION.to_string()),
            batch_size: DEFAULT_BATCH_SIZE,
            batch_delay: DEFAULT_BATCH_DELAY,
            page_delay: DEFAULT_PAGE_DELAY,
        }
    }
}

impl EnrichSettings {
    pub fn apply_file(&mut self, file: &FileConfig) {
        if let Some(location) = &file.places.location {
            self.location = Some(location.clone());
        }
        if let Some(ms) = file.places.page_delay_ms {
            self.page_delay = Duration::from_millis(ms);
        }
        if let Some(size) = file.batch.size {
            self.batch_size = size;
        }
        if let Some(ms) = file.batch.delay_ms {
            self.batch_delay = Duration::from_millis(ms);
        }
        if let Some(file_name) = &file.output.file_name {
            self.output_file_name = file_name.clone();
        }
    }

    pub fn with_input_file(mut self, input_file: impl Into<String>) -> Self {
        self.input_file = input_file.into();
        self
    }

    pub fn location_or_default(&self) -> &str {
        self.location.as_deref().unwrap_or(DEFAULT_LOCATION)
    }
}

impl Validate for EnrichSettings {
    fn validate(&self) -> Result<()> {
        validate_at_least("batch_size", self.batch_size, 1)?;
        validate_output_name("output_file_name", &self.output_file_name)?;
        if let Some(location) = &self.location {
            validate_location("location", location)?;
        }
        if !self.input_file.is_empty() {
            validate_input_path("input_file", &self.input_file)?;
        }
        Ok(())
    }
}

impl ConfigProvider for EnrichSettings {
    fn input_file(&self) -> &str {
        &self.input_file
    }

    fn output_file_name(&self) -> &str {
        &self.output_file_name
    }

    fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn batch_delay(&self) -> Duration {
        self.batch_delay
    }
}

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::FileConfig;
    use super::EnrichSettings;
    use crate::utils::error::Result;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use std::time::Duration;

    #[derive(Debug, Clone, Default, Parser)]
    #[command(name = "places-enricher")]
    #[command(about = "Enrich business names with address and phone data from Google Places")]
    pub struct CliConfig {
        /// CSV file with company,email,phone columns; omit for interactive mode
        #[arg(long)]
        pub file: Option<String>,

        /// City or region appended to every search
        #[arg(long)]
        pub location: Option<String>,

        /// Rows looked up concurrently per batch [default: 5]
        #[arg(long)]
        pub batch_size: Option<usize>,

        /// Pause between batches in milliseconds [default: 1000]
        #[arg(long)]
        pub batch_delay_ms: Option<u64>,

        /// Pause between result pages in milliseconds [default: 100]
        #[arg(long)]
        pub page_delay_ms: Option<u64>,

        /// Output file name, written beside the input file
        #[arg(long)]
        pub output_name: Option<String>,

        /// Path to a TOML configuration file
        #[arg(long)]
        pub config: Option<String>,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, help = "Emit logs as JSON")]
        pub json_logs: bool,
    }

    impl CliConfig {
        /// 預設值 < 設定檔 < 命令列
        pub fn resolve(&self) -> Result<EnrichSettings> {
            let mut settings = EnrichSettings::default();

            if let Some(path) = &self.config {
                let file = FileConfig::from_file(path)?;
                file.validate()?;
                settings.apply_file(&file);
            }

            self.apply_to(&mut settings);
            if let Some(file) = &self.file {
                settings.input_file = file.clone();
            }
            settings.validate()?;
            Ok(settings)
        }

        pub fn apply_to(&self, settings: &mut EnrichSettings) {
            if let Some(location) = &self.location {
                settings.location = Some(location.clone());
            }
            if let Some(size) = self.batch_size {
                settings.batch_size = size;
            }
            if let Some(ms) = self.batch_delay_ms {
                settings.batch_delay = Duration::from_millis(ms);
            }
            if let Some(ms) = self.page_delay_ms {
                settings.page_delay = Duration::from_millis(ms);
            }
            if let Some(name) = &self.output_name {
                settings.output_file_name = name.clone();
            }
        }
    }

}

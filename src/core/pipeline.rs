use crate::core::csv_format::{parse_input, render_results};
use crate::core::scheduler::{lookup_worker, BatchScheduler};
use crate::core::{BatchReport, ConfigProvider, InputRow, Pipeline, PlaceLookup, Storage};
use crate::utils::error::{EnrichError, Result};
use std::sync::Arc;

/// CSV 批次查詢：讀檔 → 分批查詢 → 寫出結果檔
pub struct CsvPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    lookup: Arc<dyn PlaceLookup>,
}

impl<S: Storage, C: ConfigProvider> CsvPipeline<S, C> {
    pub fn new(storage: S, config: C, lookup: Arc<dyn PlaceLookup>) -> Self {
        Self {
            storage,
            config,
            lookup,
        }
    }

    fn scheduler(&self) -> BatchScheduler {
        BatchScheduler::new(self.config.batch_size(), self.config.batch_delay())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<InputRow>> {
        let input = self.config.input_file();
        let display_path = self.storage.display_path(input);

        if !self.storage.exists(input).await {
            return Err(EnrichError::FileNotFound { path: display_path });
        }

        tracing::info!("Processing CSV file: {}", display_path);
        let data = self.storage.read_file(input).await?;
        let rows = parse_input(&data, &display_path)?;

        tracing::info!("Found {} business names to process", rows.len());
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<InputRow>) -> Result<BatchReport> {
        let total = rows.len();
        let lookup = self.lookup.as_ref();

        tracing::debug!(
            "Using {} with batch size {} and {}ms between batches",
            lookup.provider_name(),
            self.config.batch_size(),
            self.config.batch_delay().as_millis()
        );

        let report = self
            .scheduler()
            .run(&rows, |row| lookup_worker(lookup, row, total))
            .await;

        Ok(report)
    }

    async fn load(&self, report: &BatchReport) -> Result<String> {
        let output_name = self.config.output_file_name();
        let data = render_results(&report.results)?;

        tracing::debug!(
            "Writing {} result(s) ({} bytes) to {}",
            report.results.len(),
            data.len(),
            output_name
        );
        self.storage.write_file(output_name, &data).await?;

        Ok(self.storage.display_path(output_name))
    }
}

use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;

pub struct EnrichEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EnrichEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        // Extract：讀檔與標頭驗證失敗時不會發出任何請求
        let rows = self.pipeline.extract().await?;
        let row_count = rows.len();

        // Transform
        let report = self.pipeline.transform(rows).await?;
        let outcomes = report.summary();
        tracing::info!(
            "Lookups finished: {} found, {} not found, {} skipped, {} failed",
            outcomes.found,
            outcomes.not_found,
            outcomes.skipped,
            outcomes.failed
        );

        // Load
        let output_path = self.pipeline.load(&report).await?;
        tracing::info!("✅ Results saved to: {}", output_path);
        tracing::info!("Total results: {}", report.results.len());

        Ok(RunSummary {
            output_path,
            rows: row_count,
            batches: report.batches,
            total_results: report.results.len(),
            outcomes,
        })
    }
}

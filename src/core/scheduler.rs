use crate::domain::model::{BatchReport, InputRow, RowOutcome, RowReport};
use crate::domain::ports::PlaceLookup;
use futures::future::join_all;
use std::future::Future;
use std::time::Duration;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_millis(1000);

/// 固定大小分批執行查詢：批次內並行，批次間依序並暫停
#[derive(Debug, Clone)]
pub struct BatchScheduler {
    batch_size: usize,
    delay: Duration,
}

impl Default for BatchScheduler {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE, DEFAULT_BATCH_DELAY)
    }
}

impl BatchScheduler {
    pub fn new(batch_size: usize, delay: Duration) -> Self {
        Self {
            batch_size: batch_size.max(1),
            delay,
        }
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batch_count(&self, rows: usize) -> usize {
        rows.div_ceil(self.batch_size)
    }

    pub async fn run<'a, F, Fut>(&self, rows: &'a [InputRow], worker: F) -> BatchReport
    where
        F: Fn(&'a InputRow) -> Fut,
        Fut: Future<Output = RowOutcome> + 'a,
    {
        let total_batches = self.batch_count(rows.len());
        let mut report = BatchReport::default();

        for (batch_index, batch) in rows.chunks(self.batch_size).enumerate() {
            tracing::info!(
                "📦 Processing batch {}/{} ({} businesses)",
                batch_index + 1,
                total_batches,
                batch.len()
            );

            // 同一批次內的 worker 同時進行，全部完成後才進入下一批
            let outcomes = join_all(batch.iter().map(&worker)).await;

            for (row, outcome) in batch.iter().zip(outcomes) {
                if let RowOutcome::Found(results) = &outcome {
                    report.results.extend(results.iter().cloned());
                }
                report.outcomes.push(RowReport {
                    index: row.index,
                    company: row.company.clone(),
                    outcome,
                });
            }
            report.batches += 1;

            if batch_index + 1 < total_batches {
                tracing::info!(
                    "⏳ Waiting {}ms before next batch...",
                    self.delay.as_millis()
                );
                tokio::time::sleep(self.delay).await;
            }
        }

        report
    }
}

/// 單列查詢：公司名稱為空時不呼叫 API，錯誤轉為 `RowOutcome` 不往外拋
pub async fn lookup_worker(lookup: &dyn PlaceLookup, row: &InputRow, total: usize) -> RowOutcome {
    if !row.has_company() {
        tracing::debug!("Skipping row {}: empty company", row.index);
        return RowOutcome::Skipped;
    }

    tracing::info!("🔍 Processing {}/{}: \"{}\"", row.index, total, row.company);

    match lookup.lookup(&row.company).await {
        Ok(results) => {
            tracing::info!("✅ \"{}\": found {} result(s)", row.company, results.len());
            RowOutcome::Found(results)
        }
        Err(e) if e.is_not_found() => {
            tracing::info!("❌ \"{}\": no results found", row.company);
            RowOutcome::NotFound
        }
        Err(e) => {
            tracing::error!("❌ Error processing \"{}\": {}", row.company, e);
            RowOutcome::Failed(e.to_string())
        }
    }
}

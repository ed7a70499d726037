use serde::{Deserialize, Serialize};

/// 一行 CSV 資料，依標頭位置對應欄位
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    /// 1-based 資料列序號（不含標頭）
    pub index: usize,
    pub company: String,
    pub email: String,
    pub phone: String,
}

impl InputRow {
    pub fn has_company(&self) -> bool {
        !self.company.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LookupResult {
    pub business_name: String,
    pub address: String,
    pub phone_number: String,
}

/// 單一列查詢的結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Skipped,
    Found(Vec<LookupResult>),
    NotFound,
    Failed(String),
}

impl RowOutcome {
    pub fn result_count(&self) -> usize {
        match self {
            RowOutcome::Found(results) => results.len(),
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowReport {
    pub index: usize,
    pub company: String,
    pub outcome: RowOutcome,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub results: Vec<LookupResult>,
    pub outcomes: Vec<RowReport>,
    pub batches: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeSummary {
    pub found: usize,
    pub not_found: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl BatchReport {
    pub fn summary(&self) -> OutcomeSummary {
        let mut summary = OutcomeSummary::default();
        for report in &self.outcomes {
            match report.outcome {
                RowOutcome::Found(_) => summary.found += 1,
                RowOutcome::NotFound => summary.not_found += 1,
                RowOutcome::Skipped => summary.skipped += 1,
                RowOutcome::Failed(_) => summary.failed += 1,
            }
        }
        summary
    }
}

/// 寫出結果後的執行摘要
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub output_path: String,
    pub rows: usize,
    pub batches: usize,
    pub total_results: usize,
    pub outcomes: OutcomeSummary,
}

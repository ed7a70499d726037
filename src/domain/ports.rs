use crate::domain::model::{BatchReport, InputRow, LookupResult};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 給使用者看的完整路徑
    fn display_path(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file(&self) -> &str;
    fn output_file_name(&self) -> &str;
    fn batch_size(&self) -> usize;
    fn batch_delay(&self) -> Duration;
}

/// 地點查詢服務（Google Places、Yelp 等）
#[async_trait]
pub trait PlaceLookup: Send + Sync {
    fn provider_name(&self) -> &'static str;

    /// 回傳所有符合的地點；沒有任何結果時回傳 `EnrichError::NotFound`
    async fn lookup(&self, query: &str) -> Result<Vec<LookupResult>>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<InputRow>>;
    async fn transform(&self, rows: Vec<InputRow>) -> Result<BatchReport>;
    async fn load(&self, report: &BatchReport) -> Result<String>;
}

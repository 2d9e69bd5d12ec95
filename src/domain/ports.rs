use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 資料來源的 I/O 介面，讓測試可以替換檔案系統與網路
#[async_trait]
pub trait SourceReader: Send + Sync {
    async fn read_file(&self, path: &str) -> Result<String>;
    async fn fetch_url(&self, url: &str) -> Result<String>;
}

/// Receives step lifecycle notifications during `execute`.
///
/// Implementations must not influence the result; they only observe.
pub trait StepLogger: Send + Sync {
    fn step_started(&self, name: &str);

    fn step_finished(&self, _name: &str, _elapsed: Duration) {}
}

use crate::domain::model::{ProbeRecord, Query};
use crate::utils::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SearchClient: Send + Sync {
    /// Executes one search and returns the raw response body.
    async fn search(&self, query: &Query) -> Result<serde_json::Value>;
}

pub trait ResultSink: Send {
    fn append(&mut self, record: &ProbeRecord) -> Result<()>;
}

use crate::error::AppResult;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredImage {
    pub file_name: String,
    pub url: String,
}

#[async_trait::async_trait]
pub trait ImageStorePort: Send + Sync {
    /// Writes `data` under `file_name`, replacing any existing file.
    async fn save(&self, file_name: &str, data: &[u8]) -> AppResult<StoredImage>;

    /// Name of the most recently created file, if any.
    async fn latest(&self) -> AppResult<Option<String>>;

    async fn read(&self, file_name: &str) -> AppResult<Option<Vec<u8>>>;
}

pub type DynImageStorePort = Arc<dyn ImageStorePort>;

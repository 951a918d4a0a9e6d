use crate::{error::AppResult, ports::outgoing::image_store::StoredImage};
use domain::matcher::{MatchResult, Query};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectColorCommand {
    pub x: i64,
    pub y: i64,
    /// Explicit upload to sample; the most recent upload when `None`.
    pub image: Option<String>,
}

#[async_trait::async_trait]
pub trait UploadImageUseCase: Send + Sync {
    async fn upload_image(&self, file_name: &str, data: &[u8]) -> AppResult<StoredImage>;
}

#[async_trait::async_trait]
pub trait DetectColorUseCase: Send + Sync {
    async fn detect_color(&self, command: DetectColorCommand) -> AppResult<MatchResult>;
}

pub trait MatchColorUseCase: Send + Sync {
    fn match_color(&self, query: Query) -> AppResult<MatchResult>;
}

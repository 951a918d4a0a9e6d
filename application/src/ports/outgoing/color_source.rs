use crate::error::AppResult;
use domain::palette::NamedColorSource;
use std::path::Path;
use std::sync::Arc;

#[async_trait::async_trait]
pub trait ColorSourcePort: Send + Sync {
    async fn load_source(&self, path: &Path) -> AppResult<NamedColorSource>;
}

pub type DynColorSourcePort = Arc<dyn ColorSourcePort>;

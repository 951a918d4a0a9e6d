use crate::error::AppResult;
use domain::palette::Palette;
use std::sync::Arc;

/// Persisted flat palette table (`color_name,r,g,b`) together with the list
/// of sources it was built from.
#[async_trait::async_trait]
pub trait PaletteStorePort: Send + Sync {
    async fn exists(&self) -> AppResult<bool>;
    async fn load(&self) -> AppResult<Palette>;
    /// `None` when the table was written without a source list, e.g. by hand.
    async fn saved_sources(&self) -> AppResult<Option<Vec<String>>>;
    async fn save(&self, palette: &Palette, sources: &[String]) -> AppResult<()>;
}

pub type DynPaletteStorePort = Arc<dyn PaletteStorePort>;

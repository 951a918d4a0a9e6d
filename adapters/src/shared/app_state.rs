use std::sync::Arc;

use color_namer_application::{
    infrastructure_config::Config,
    ports::incoming::{
        color_detection::{DetectColorUseCase, MatchColorUseCase, UploadImageUseCase},
        palette::PaletteQueryUseCase,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub upload_use_case: Arc<dyn UploadImageUseCase + Send + Sync>,
    pub detect_color_use_case: Arc<dyn DetectColorUseCase + Send + Sync>,
    pub match_color_use_case: Arc<dyn MatchColorUseCase + Send + Sync>,
    pub palette_query_use_case: Arc<dyn PaletteQueryUseCase + Send + Sync>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        upload_use_case: Arc<dyn UploadImageUseCase + Send + Sync>,
        detect_color_use_case: Arc<dyn DetectColorUseCase + Send + Sync>,
        match_color_use_case: Arc<dyn MatchColorUseCase + Send + Sync>,
        palette_query_use_case: Arc<dyn PaletteQueryUseCase + Send + Sync>,
    ) -> Self {
        Self {
            config,
            upload_use_case,
            detect_color_use_case,
            match_color_use_case,
            palette_query_use_case,
        }
    }
}

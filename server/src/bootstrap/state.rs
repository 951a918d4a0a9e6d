use std::sync::Arc;
use tracing::info;

use color_namer_adapters::outgoing::{
    csv_table::palette_table_csv::CsvPaletteTableAdapter,
    fs_tokio::image_store_fs::FsImageStoreAdapter,
    image_rs::pixel_codec_image::ImagePixelAdapter,
    json_file::color_source_json::JsonColorSourceAdapter,
    tokio_spawn::decode_timeout_tokio::TokioDecodeTimeoutAdapter,
};
use color_namer_adapters::shared::app_state::AppState as AdaptersAppState;
use color_namer_application::{
    config::DetectionSettings,
    detection::service::ColorDetectionService,
    error::AppError,
    infrastructure_config::{Config, PaletteConfig},
    palette::service::PaletteService,
    ports::incoming::{
        color_detection::{DetectColorUseCase, MatchColorUseCase, UploadImageUseCase},
        palette::PaletteQueryUseCase,
    },
};
use domain::palette::Palette;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub detection_service: Arc<ColorDetectionService>,
}

impl AppState {
    pub async fn new(config: Config) -> Result<Self, AppError> {
        let config = Arc::new(config);

        let palette = Self::load_palette(&config.palette).await?;
        let detection_service = Self::create_detection_service(&config, palette).await?;

        Ok(Self {
            config,
            detection_service,
        })
    }

    #[must_use]
    pub fn create_palette_service(config: &PaletteConfig) -> PaletteService {
        PaletteService::new(
            config.clone(),
            Arc::new(CsvPaletteTableAdapter::new(config.table_path.clone())),
            Arc::new(JsonColorSourceAdapter::new()),
        )
    }

    async fn load_palette(config: &PaletteConfig) -> Result<Palette, AppError> {
        let palette = Self::create_palette_service(config).load_or_build().await?;
        info!("Palette ready with {} colors", palette.len());
        Ok(palette)
    }

    async fn create_detection_service(
        config: &Config,
        palette: Palette,
    ) -> Result<Arc<ColorDetectionService>, AppError> {
        let image_store = Arc::new(FsImageStoreAdapter::new(config.uploads.dir.clone()).await?);
        let decode_timeout = Arc::new(TokioDecodeTimeoutAdapter::new(Arc::new(
            ImagePixelAdapter::new(),
        )));

        Ok(Arc::new(ColorDetectionService::new(
            palette,
            DetectionSettings::from(&config.uploads),
            image_store,
            decode_timeout,
        )))
    }

    pub fn to_adapters_state(self) -> AdaptersAppState {
        AdaptersAppState::new(
            self.config,
            Arc::clone(&self.detection_service) as Arc<dyn UploadImageUseCase + Send + Sync>,
            Arc::clone(&self.detection_service) as Arc<dyn DetectColorUseCase + Send + Sync>,
            Arc::clone(&self.detection_service) as Arc<dyn MatchColorUseCase + Send + Sync>,
            self.detection_service as Arc<dyn PaletteQueryUseCase + Send + Sync>,
        )
    }
}

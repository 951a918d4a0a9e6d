use tracing::{debug, instrument};

use domain::{
    matcher::{MatchResult, Query},
    palette::Palette,
};

use crate::{
    config::DetectionSettings,
    error::{AppError, AppResult},
    ports::{
        incoming::{
            color_detection::{
                DetectColorCommand, DetectColorUseCase, MatchColorUseCase, UploadImageUseCase,
            },
            palette::PaletteQueryUseCase,
        },
        outgoing::{
            image_store::{DynImageStorePort, StoredImage},
            timeout::DynDecodeTimeoutPort,
        },
    },
};

use super::file_name::{extension_of, sanitize_file_name};

pub struct ColorDetectionService {
    palette: Palette,
    settings: DetectionSettings,
    image_store: DynImageStorePort,
    decode_timeout_port: DynDecodeTimeoutPort,
}

impl ColorDetectionService {
    pub fn new(
        palette: Palette,
        settings: DetectionSettings,
        image_store: DynImageStorePort,
        decode_timeout_port: DynDecodeTimeoutPort,
    ) -> Self {
        Self {
            palette,
            settings,
            image_store,
            decode_timeout_port,
        }
    }

    #[instrument(skip(self, data), fields(bytes = data.len()))]
    pub async fn upload(&self, file_name: &str, data: &[u8]) -> AppResult<StoredImage> {
        let file_name = sanitize_file_name(file_name)?;

        let extension = extension_of(&file_name).ok_or_else(|| AppError::ValidationError {
            message: format!("File '{file_name}' has no extension"),
        })?;
        if !self.settings.is_allowed_extension(extension) {
            return Err(AppError::ValidationError {
                message: format!("File type '.{extension}' is not allowed"),
            });
        }

        if data.is_empty() {
            return Err(AppError::ValidationError {
                message: "Uploaded file is empty".to_string(),
            });
        }

        let stored = self.image_store.save(&file_name, data).await?;
        debug!("Stored upload {}", stored.file_name);
        Ok(stored)
    }

    #[instrument(skip(self))]
    pub async fn detect(&self, command: DetectColorCommand) -> AppResult<MatchResult> {
        let (x, y) = pixel_coordinates(command.x, command.y)?;

        let file_name = match command.image {
            Some(name) => sanitize_file_name(&name)?,
            None => self
                .image_store
                .latest()
                .await?
                .ok_or(AppError::NoImageUploaded)?,
        };

        let image_data =
            self.image_store
                .read(&file_name)
                .await?
                .ok_or_else(|| AppError::NotFound {
                    message: format!("Image '{file_name}' not found"),
                })?;

        let color = self
            .decode_timeout_port
            .sample_rgb_with_timeout(image_data, x, y, self.settings.decode_timeout)
            .await
            .map_err(|_| AppError::CodecError {
                message: "Image decoding timeout".to_string(),
            })??;

        debug!("Pixel ({x}, {y}) of {file_name} is {color}");
        self.match_rgb(Query::from(color))
    }

    pub fn match_rgb(&self, query: Query) -> AppResult<MatchResult> {
        Ok(self.palette.nearest(query)?)
    }

    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

fn pixel_coordinates(x: i64, y: i64) -> AppResult<(u32, u32)> {
    match (u32::try_from(x), u32::try_from(y)) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(AppError::InvalidPixelCoordinates {
            message: format!("({x}, {y}) is outside the image"),
        }),
    }
}

#[async_trait::async_trait]
impl UploadImageUseCase for ColorDetectionService {
    async fn upload_image(&self, file_name: &str, data: &[u8]) -> AppResult<StoredImage> {
        self.upload(file_name, data).await
    }
}

#[async_trait::async_trait]
impl DetectColorUseCase for ColorDetectionService {
    async fn detect_color(&self, command: DetectColorCommand) -> AppResult<MatchResult> {
        self.detect(command).await
    }
}

impl MatchColorUseCase for ColorDetectionService {
    fn match_color(&self, query: Query) -> AppResult<MatchResult> {
        self.match_rgb(query)
    }
}

impl PaletteQueryUseCase for ColorDetectionService {
    fn palette(&self) -> Palette {
        self.palette.clone()
    }
}

use serde::Serialize;
#[cfg(feature = "docs")]
use utoipa::ToSchema;

use color_namer_application::ports::outgoing::image_store::StoredImage;
use domain::{matcher::MatchResult, palette::PaletteEntry};

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Standard API response wrapper with success indicator, optional error message, and optional data payload",
    example = json!({
        "ok": true,
        "data": {
            "size": 148
        }
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success_with_data(data: Option<T>) -> Self {
        Self {
            ok: true,
            error: None,
            data,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Nearest palette color with the palette's own channel values",
    example = json!({
        "color_name": "coral",
        "r": 255,
        "g": 127,
        "b": 80
    })
))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColorNameResponse {
    pub color_name: String,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<MatchResult> for ColorNameResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            color_name: result.name,
            r: result.r,
            g: result.g,
            b: result.b,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[cfg_attr(feature = "docs", schema(
    description = "Stored upload",
    example = json!({
        "message": "Image uploaded",
        "url": "/uploads/sunset.png",
        "file_name": "sunset.png"
    })
))]
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub message: String,
    pub url: String,
    pub file_name: String,
}

impl From<StoredImage> for UploadResponse {
    fn from(stored: StoredImage) -> Self {
        Self {
            message: "Image uploaded".to_string(),
            url: stored.url,
            file_name: stored.file_name,
        }
    }
}

#[cfg_attr(feature = "docs", derive(ToSchema))]
#[derive(Debug, Clone, Serialize)]
pub struct PaletteResponse {
    pub size: usize,
    pub colors: Vec<PaletteEntry>,
}

#[cfg(feature = "docs")]
#[derive(serde::Serialize, utoipa::ToSchema)]
#[schema(title = "ApiResponseValue")]
pub struct ApiResponseValue {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

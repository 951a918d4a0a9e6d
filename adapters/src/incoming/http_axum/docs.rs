use crate::incoming::http_axum::{dto, handlers};
use domain::{color::RgbColor, palette::PaletteEntry};
use dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse, PayloadTooLargeResponse,
    ValidationErrorResponse,
};
use dto::requests::{DetectColorRequest, MatchColorRequest};
use dto::responses::{ApiResponseValue, ColorNameResponse, PaletteResponse, UploadResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::upload::upload_image,
        handlers::colors::detect_color,
        handlers::colors::match_color,
        handlers::palette::get_palette,
        handlers::health::health_check,
    ),
    components(
        schemas(
            DetectColorRequest,
            MatchColorRequest,
            ColorNameResponse,
            UploadResponse,
            PaletteResponse,
            PaletteEntry,
            RgbColor,
            ApiResponseValue
        ),
        responses(
            BadRequestResponse,
            NotFoundResponse,
            PayloadTooLargeResponse,
            ValidationErrorResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "images", description = "Image uploads - store images for pixel sampling, served back under /uploads"),
        (name = "colors", description = "Color naming - sample a pixel of an upload or name an RGB triple directly"),
        (name = "palette", description = "Reference palette the matcher searches, in match order"),
        (name = "system", description = "System health and status monitoring")
    ),
    info(
        title = "Color Namer API",
        description = "Upload an image, pick a pixel, and get the name of the nearest color from a reference palette built from CSS4 and custom named-color tables.",
        contact(
            name = "Color Namer",
        ),
    ),
    servers(
        (url = "http://localhost:5000", description = "Development server"),
    )
)]
pub struct ApiDoc;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
};
use tracing::debug;

use color_namer_application::ports::incoming::color_detection::UploadImageUseCase;

use crate::incoming::http_axum::{dto::responses::UploadResponse, error_mapper::HttpError};
use crate::shared::app_state::AppState;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, PayloadTooLargeResponse,
    ValidationErrorResponse,
};

pub const IMAGE_FIELD: &str = "image";

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/upload",
    request_body(content_type = "multipart/form-data", description = "Form with a single `image` file field"),
    responses(
        (status = 200, body = UploadResponse, description = "Image stored", example = json!({"message": "Image uploaded", "url": "/uploads/sunset.png", "file_name": "sunset.png"})),
        (status = 400, response = BadRequestResponse),
        (status = 413, response = PayloadTooLargeResponse),
        (status = 422, response = ValidationErrorResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "images",
    summary = "Upload an image",
    description = "Store an image in the upload directory under its sanitized file name, replacing any file with the same name.",
    operation_id = "upload_image"
))]
pub async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpError> {
    let mut multipart = multipart.map_err(|e| {
        debug!("Upload without multipart body: {}", e);
        HttpError::bad_request("No image part")
    })?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_string();
        if file_name.is_empty() {
            return Err(HttpError::bad_request("No selected file"));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(e.body_text()))?;

        let upload_uc: &dyn UploadImageUseCase = &*state.upload_use_case;
        let stored = upload_uc
            .upload_image(&file_name, &data)
            .await
            .map_err(HttpError)?;

        return Ok(Json(UploadResponse::from(stored)));
    }

    Err(HttpError::bad_request("No image part"))
}

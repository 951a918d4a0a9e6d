use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{debug, error};

use color_namer_application::error::AppError;
use domain::error::DomainError;

pub struct HttpError(pub AppError);

impl HttpError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self(AppError::BadRequest {
            message: message.into(),
        })
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let (status_code, message) = match app_error {
            AppError::Domain(DomainError::EmptyPalette) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                app_error.to_string(),
            ),

            AppError::Domain(_)
            | AppError::InvalidPixelCoordinates { .. }
            | AppError::BadRequest { .. }
            | AppError::NoImageUploaded => (StatusCode::BAD_REQUEST, app_error.to_string()),

            AppError::ValidationError { .. } => {
                (StatusCode::UNPROCESSABLE_ENTITY, app_error.to_string())
            }

            AppError::JsonError(_) => (StatusCode::BAD_REQUEST, "Invalid JSON format".to_string()),

            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),

            AppError::ConfigError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Configuration error".to_string(),
            ),

            AppError::CodecError { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to load image".to_string())
            }

            AppError::StorageError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Storage error".to_string(),
            ),

            AppError::IoError(_) | AppError::TaskError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        if status_code.is_client_error() {
            debug!("Client error response generated: {}", app_error);
        } else {
            error!("Server error response generated: {}", app_error);
        }

        let error_response = json!({
            "ok": false,
            "error": message,
            "status": status_code.as_u16()
        });

        (status_code, Json(error_response)).into_response()
    }
}

impl From<AppError> for HttpError {
    fn from(app_error: AppError) -> Self {
        HttpError(app_error)
    }
}

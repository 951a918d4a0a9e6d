use axum::{Json, extract::State};

use color_namer_application::ports::incoming::palette::PaletteQueryUseCase;

use crate::incoming::http_axum::dto::responses::ApiResponse;
#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::responses::ApiResponseValue;
use crate::shared::app_state::AppState;

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up", body = ApiResponseValue,
         example = json!({
             "ok": true,
             "data": {
                 "palette_size": 148,
                 "upload_dir": "uploads",
                 "environment": "development"
             }
         })
        )
    ),
    tag = "system",
    summary = "System health check",
    operation_id = "health_check"
))]
pub async fn health_check(State(state): State<AppState>) -> Json<ApiResponse<serde_json::Value>> {
    let palette_uc: &dyn PaletteQueryUseCase = &*state.palette_query_use_case;

    Json(ApiResponse::success_with_data(Some(serde_json::json!({
        "palette_size": palette_uc.palette().len(),
        "upload_dir": state.config.uploads.dir.display().to_string(),
        "environment": state.config.environment.env,
    }))))
}

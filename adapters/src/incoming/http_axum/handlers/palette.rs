use axum::{Json, extract::State};

use color_namer_application::ports::incoming::palette::PaletteQueryUseCase;

use crate::incoming::http_axum::dto::responses::{ApiResponse, PaletteResponse};
#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::responses::ApiResponseValue;
use crate::shared::app_state::AppState;

#[cfg_attr(feature = "docs", utoipa::path(
    get,
    path = "/palette",
    responses(
        (status = 200, description = "Reference palette in match order",
         body = ApiResponseValue,
         example = json!({
             "ok": true,
             "data": {
                 "size": 2,
                 "colors": [
                     { "name": "aliceblue", "r": 240, "g": 248, "b": 255 },
                     { "name": "antiquewhite", "r": 250, "g": 235, "b": 215 }
                 ]
             }
         })
        )
    ),
    tag = "palette"
))]
pub async fn get_palette(State(state): State<AppState>) -> Json<ApiResponse<PaletteResponse>> {
    let palette_uc: &dyn PaletteQueryUseCase = &*state.palette_query_use_case;
    let palette = palette_uc.palette();

    Json(ApiResponse::success_with_data(Some(PaletteResponse {
        size: palette.len(),
        colors: palette.entries().to_vec(),
    })))
}

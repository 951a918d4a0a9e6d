use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use color_namer_application::ports::incoming::color_detection::{
    DetectColorUseCase, MatchColorUseCase,
};
use domain::matcher::Query;

use crate::incoming::http_axum::{
    dto::{
        requests::{DetectColorRequest, MatchColorRequest},
        responses::ColorNameResponse,
    },
    error_mapper::HttpError,
};
use crate::shared::app_state::AppState;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::dto::common_responses::{
    BadRequestResponse, InternalServerErrorResponse, NotFoundResponse,
};

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/detect_color",
    request_body = DetectColorRequest,
    responses(
        (status = 200, body = ColorNameResponse, description = "Nearest named color for the pixel", example = json!({"color_name": "coral", "r": 255, "g": 127, "b": 80})),
        (status = 400, response = BadRequestResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "colors",
    summary = "Name the color of a pixel",
    description = "Sample the pixel at (x, y) of an uploaded image and return the closest palette color. Uses the most recent upload unless `image` names one.",
    operation_id = "detect_color"
))]
pub async fn detect_color(
    State(state): State<AppState>,
    payload: Result<Json<DetectColorRequest>, JsonRejection>,
) -> Result<Json<ColorNameResponse>, HttpError> {
    let Json(request) = payload.map_err(|e| HttpError::bad_request(e.body_text()))?;
    let command = request
        .into_command()
        .ok_or_else(|| HttpError::bad_request("Coordinates not provided"))?;

    let detect_uc: &dyn DetectColorUseCase = &*state.detect_color_use_case;
    let result = detect_uc.detect_color(command).await.map_err(HttpError)?;

    Ok(Json(ColorNameResponse::from(result)))
}

#[cfg_attr(feature = "docs", utoipa::path(
    post,
    path = "/match",
    request_body = MatchColorRequest,
    responses(
        (status = 200, body = ColorNameResponse, description = "Nearest named color", example = json!({"color_name": "red", "r": 255, "g": 0, "b": 0})),
        (status = 400, response = BadRequestResponse),
        (status = 500, response = InternalServerErrorResponse)
    ),
    tag = "colors",
    summary = "Name an RGB triple",
    operation_id = "match_color"
))]
pub async fn match_color(
    State(state): State<AppState>,
    payload: Result<Json<MatchColorRequest>, JsonRejection>,
) -> Result<Json<ColorNameResponse>, HttpError> {
    let Json(request) = payload.map_err(|e| HttpError::bad_request(e.body_text()))?;

    let match_uc: &dyn MatchColorUseCase = &*state.match_color_use_case;
    let result = match_uc
        .match_color(Query::from(request))
        .map_err(HttpError)?;

    Ok(Json(ColorNameResponse::from(result)))
}

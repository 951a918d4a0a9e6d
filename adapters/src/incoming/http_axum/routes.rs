use axum::{
    Router,
    routing::{get, post},
};
use tower_http::services::ServeDir;
#[cfg(feature = "docs")]
use utoipa::OpenApi;
#[cfg(feature = "docs")]
use utoipa_swagger_ui::SwaggerUi;

use crate::incoming::http_axum::{
    handlers::{
        colors::{detect_color, match_color},
        health::health_check,
        index::index,
        palette::get_palette,
        upload::upload_image,
    },
    router_ext::RouterExt,
};
use crate::outgoing::fs_tokio::image_store_fs::UPLOADS_URL_PREFIX;
use crate::shared::app_state::AppState;

#[cfg(feature = "docs")]
use crate::incoming::http_axum::docs::ApiDoc;

pub fn build_application_router(state: &AppState) -> Router<AppState> {
    let upload_routes = Router::new()
        .route("/upload", post(upload_image))
        .with_body_limit(state.config.uploads.max_upload_bytes);

    build_core_routes()
        .merge(upload_routes)
        .nest_service(
            UPLOADS_URL_PREFIX,
            ServeDir::new(&state.config.uploads.dir),
        )
        .with_request_id()
}

fn build_core_routes() -> Router<AppState> {
    let router = Router::new()
        .route("/", get(index))
        .route("/detect_color", post(detect_color))
        .route("/match", post(match_color))
        .route("/palette", get(get_palette))
        .route("/health", get(health_check));

    #[cfg(feature = "docs")]
    {
        router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    #[cfg(not(feature = "docs"))]
    {
        router
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incoming::http_axum::middleware::request_id::REQUEST_ID_HEADER;
    use crate::outgoing::{
        fs_tokio::image_store_fs::FsImageStoreAdapter, image_rs::pixel_codec_image::ImagePixelAdapter,
        tokio_spawn::decode_timeout_tokio::TokioDecodeTimeoutAdapter,
    };
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode, header::CONTENT_TYPE},
    };
    use color_namer_application::{
        config::DetectionSettings,
        detection::service::ColorDetectionService,
        infrastructure_config::Config,
        ports::incoming::{
            color_detection::{DetectColorUseCase, MatchColorUseCase, UploadImageUseCase},
            palette::PaletteQueryUseCase,
        },
    };
    use domain::{named_colors::css4_source, palette::Palette};
    use image::{ImageFormat, Rgb, RgbImage};
    use serde_json::{Value, json};
    use std::{io::Cursor, sync::Arc};
    use tempfile::TempDir;
    use tower::ServiceExt;

    const BOUNDARY: &str = "color-namer-test-boundary";

    async fn test_app() -> (Router, TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.uploads.dir = dir.path().to_path_buf();
        let config = Arc::new(config);

        let image_store = Arc::new(FsImageStoreAdapter::new(dir.path()).await.unwrap());
        let decoder = Arc::new(TokioDecodeTimeoutAdapter::new(Arc::new(ImagePixelAdapter::new())));
        let service = Arc::new(ColorDetectionService::new(
            Palette::build(&[css4_source()]).unwrap(),
            DetectionSettings::from(&config.uploads),
            image_store,
            decoder,
        ));

        let state = AppState::new(
            config,
            Arc::clone(&service) as Arc<dyn UploadImageUseCase + Send + Sync>,
            Arc::clone(&service) as Arc<dyn DetectColorUseCase + Send + Sync>,
            Arc::clone(&service) as Arc<dyn MatchColorUseCase + Send + Sync>,
            service as Arc<dyn PaletteQueryUseCase + Send + Sync>,
        );
        let router = build_application_router(&state).with_state(state);
        (router, dir)
    }

    fn png(color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(4, 3, Rgb(color));
        let mut bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn multipart_request(field: &str, file_name: &str, data: &[u8]) -> Request<Body> {
        let mut body = format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/upload")
            .header(CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(body))
            .unwrap()
    }

    fn json_request(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    #[tokio::test]
    async fn upload_then_detect_names_the_pixel() {
        let (router, dir) = test_app().await;

        let (status, body) = send(&router, multipart_request("image", "my coral.png", &png([250, 128, 82]))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Image uploaded", "url": "/uploads/my_coral.png", "file_name": "my_coral.png"})
        );
        assert!(dir.path().join("my_coral.png").exists());

        let (status, body) = send(&router, json_request("/detect_color", &json!({"x": 3, "y": 2}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"color_name": "coral", "r": 255, "g": 127, "b": 80}));
    }

    #[tokio::test]
    async fn detect_reports_missing_coordinates_and_uploads() {
        let (router, _dir) = test_app().await;

        let (status, body) = send(&router, json_request("/detect_color", &json!({"x": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Coordinates not provided");

        let (status, body) = send(&router, json_request("/detect_color", &json!({"x": 1, "y": 1}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image uploaded");
        assert_eq!(body["ok"], false);
    }

    #[tokio::test]
    async fn detect_rejects_out_of_bounds_pixel() {
        let (router, _dir) = test_app().await;
        send(&router, multipart_request("image", "a.png", &png([0, 0, 0]))).await;

        let (status, _) = send(&router, json_request("/detect_color", &json!({"x": 4, "y": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(&router, json_request("/detect_color", &json!({"x": -1, "y": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &router,
            json_request("/detect_color", &json!({"x": 0, "y": 0, "image": "other.png"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_requires_image_field_and_file_name() {
        let (router, _dir) = test_app().await;

        let (status, body) = send(&router, multipart_request("file", "a.png", b"x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image part");

        let (status, body) = send(&router, multipart_request("image", "", b"x")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No selected file");

        let (status, _) = send(&router, multipart_request("image", "run.sh", b"x")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let (status, body) = send(&router, json_request("/upload", &json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No image part");
    }

    #[tokio::test]
    async fn uploaded_files_are_served() {
        let (router, _dir) = test_app().await;
        let data = png([1, 2, 3]);
        send(&router, multipart_request("image", "served.png", &data)).await;

        let response = router
            .clone()
            .oneshot(Request::get("/uploads/served.png").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(bytes.as_ref(), data.as_slice());
    }

    #[tokio::test]
    async fn match_and_palette_endpoints() {
        let (router, _dir) = test_app().await;

        let (status, body) = send(&router, json_request("/match", &json!({"r": 0, "g": 255, "b": 255}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["color_name"], "aqua");

        let (status, _) = send(&router, json_request("/match", &json!({"r": 256, "g": 0, "b": 0}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(&router, Request::get("/palette").body(Body::empty()).unwrap()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["data"]["size"], 148);
        assert_eq!(body["data"]["colors"][0], json!({"name": "aliceblue", "r": 240, "g": 248, "b": 255}));
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let (router, _dir) = test_app().await;

        let response = router
            .clone()
            .oneshot(
                Request::get("/health")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[REQUEST_ID_HEADER], "abc-123");
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let (router, _dir) = test_app().await;
        let response = router
            .clone()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("/detect_color"));
    }
}

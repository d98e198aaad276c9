use asl_camera::{CameraConfig, SyntheticCamera};
use asl_infer::{FeatureVector, InferError, NoLandmarks, SignClassifier};
use asl_server::{AppState, Mode, router};
use asl_stream::{LoopConfig, Pipeline, RecognizerConfig, Settings, SignStage};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tower::ServiceExt;

struct AlwaysHello;

impl SignClassifier for AlwaysHello {
    fn classify(&mut self, _window: &[FeatureVector]) -> Result<Vec<f32>, InferError> {
        Ok(vec![0.9, 0.05, 0.05])
    }

    fn labels(&self) -> &[String] {
        static LABELS: std::sync::OnceLock<Vec<String>> = std::sync::OnceLock::new();
        LABELS.get_or_init(asl_infer::default_sign_labels)
    }
}

fn app() -> (Router, Arc<Pipeline>) {
    let camera = SyntheticCamera::new(
        CameraConfig::default()
            .with_width(64)
            .with_height(48)
            .with_fps(30),
    )
    .unpaced();
    let stage = SignStage::new(
        Box::new(NoLandmarks),
        Box::new(AlwaysHello),
        RecognizerConfig::default().with_window(3),
    );
    let pipeline = Arc::new(Pipeline::new(
        Box::new(camera),
        Box::new(stage),
        Settings::default(),
        LoopConfig::default(),
    ));
    let state = AppState {
        pipeline: pipeline.clone(),
        camera_index: 0,
        stop_timeout: Duration::from_secs(2),
        mode: Mode::Sign,
    };
    (router(state), pipeline)
}

async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn wait_for(mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "condition not met in time");
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[tokio::test]
async fn test_health() {
    let (app, _pipeline) = app();
    let (status, body) = call(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["streaming"], false);
}

#[tokio::test]
async fn test_threshold_accepted() {
    let (app, pipeline) = app();
    let (status, body) = call(&app, "POST", "/threshold", Some(json!({ "threshold": 0.75 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Threshold set to 0.75");
    assert_eq!(body["current_settings"]["confidence_threshold"], 0.75);
    assert_eq!(pipeline.settings().snapshot().confidence_threshold, 0.75);
}

#[tokio::test]
async fn test_threshold_rejected() {
    let (app, pipeline) = app();
    let (status, body) = call(&app, "POST", "/threshold", Some(json!({ "threshold": 1.5 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Threshold must be between 0 and 1");
    assert_eq!(body["reason"], "threshold_out_of_range");
    assert_eq!(pipeline.settings().snapshot().confidence_threshold, 0.5);
}

#[tokio::test]
async fn test_zoom_rejected() {
    let (app, pipeline) = app();
    let (status, body) = call(&app, "POST", "/zoom", Some(json!({ "zoom_factor": 0.0 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["reason"], "zoom_not_positive");
    assert_eq!(pipeline.settings().snapshot().zoom_factor, 1.0);
}

#[tokio::test]
async fn test_zoom_accepted() {
    let (app, _pipeline) = app();
    let (status, body) = call(&app, "POST", "/zoom", Some(json!({ "zoom_factor": 2.0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["current_settings"]["zoom_factor"], 2.0);
}

#[tokio::test]
async fn test_video_feed_without_frame() {
    let (app, _pipeline) = app();
    let (status, body) = call(&app, "GET", "/video_feed", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "No frame available");
}

#[tokio::test]
async fn test_predictions_before_start() {
    let (app, _pipeline) = app();
    let (status, body) = call(&app, "GET", "/predictions", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "No predictions available");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_stream_lifecycle() {
    let (app, pipeline) = app();

    let (status, body) = call(&app, "POST", "/start_stream", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sign recognition stream started");
    assert_eq!(body["settings"]["confidence_threshold"], 0.5);

    let (_, body) = call(&app, "POST", "/start_stream", None).await;
    assert_eq!(body["message"], "Stream already running");

    wait_for(|| pipeline.recognition().best().is_some() && pipeline.latest_frame().is_some()).await;

    let request = Request::builder().uri("/video_feed").body(Body::empty()).unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    let jpeg = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8]);

    let (_, body) = call(&app, "GET", "/predictions", None).await;
    assert_eq!(body["sign"], "hello");
    assert_eq!(body["all_detections"], json!([]));

    let (_, body) = call(&app, "GET", "/status", None).await;
    assert_eq!(body["streaming"], true);
    assert_eq!(body["state"], "running");
    assert_eq!(body["camera_info"]["width"], 64);
    assert_eq!(body["camera_info"]["has_frame"], true);

    let (status, body) = call(&app, "POST", "/stop_stream", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Sign recognition stream stopped");

    let (_, body) = call(&app, "POST", "/stop_stream", None).await;
    assert_eq!(body["message"], "Stream not running");

    let (_, body) = call(&app, "GET", "/camera/info", None).await;
    assert_eq!(body["running"], false);
    assert_eq!(body["has_frame"], false);
    assert!(body.get("width").is_none());
}

#[tokio::test]
async fn test_mjpeg_content_type() {
    let (app, _pipeline) = app();
    let request = Request::builder().uri("/video").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "multipart/x-mixed-replace; boundary=frame"
    );
}

#[test]
fn test_mjpeg_part_framing() {
    let part = asl_server::mjpeg::part(b"JPEG");
    assert_eq!(
        &part[..],
        b"--frame\r\nContent-Type: image/jpeg\r\n\r\nJPEG\r\n"
    );
}

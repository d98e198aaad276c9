use crate::{AppState, ServerError, mjpeg};
use asl_infer::Detection;
use asl_stream::{Settings, StartOutcome, StopOutcome, StreamState};
use axum::extract::State;
use axum::http::{Method, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::{Any, CorsLayer};

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct SettingsBody {
    pub confidence_threshold: f32,
    pub zoom_factor: f32,
}

impl From<Settings> for SettingsBody {
    fn from(settings: Settings) -> Self {
        Self {
            confidence_threshold: settings.confidence_threshold,
            zoom_factor: settings.zoom_factor,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DetectionBody {
    pub letter: String,
    pub confidence: f32,
    /// `[x1, y1, x2, y2]` in frame pixels.
    pub bbox: [i32; 4],
}

impl From<&Detection> for DetectionBody {
    fn from(detection: &Detection) -> Self {
        let min = detection.bbox.min();
        let max = detection.bbox.max();
        Self {
            letter: detection.label.clone(),
            confidence: detection.confidence,
            bbox: [min.x, min.y, max.x, max.y],
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct ThresholdRequest {
    pub threshold: f32,
}

#[derive(Deserialize, Debug)]
pub struct ZoomRequest {
    pub zoom_factor: f32,
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/start_stream", post(start_stream))
        .route("/stop_stream", post(stop_stream))
        .route("/video_feed", get(video_feed))
        .route("/video", get(video))
        .route("/predictions", get(predictions))
        .route("/threshold", post(set_threshold))
        .route("/zoom", post(set_zoom))
        .route("/status", get(status))
        .route("/camera/info", get(camera_info))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

async fn start_stream(State(state): State<AppState>) -> Result<Json<Value>, ServerError> {
    let pipeline = state.pipeline.clone();
    let index = state.camera_index;
    let outcome = tokio::task::spawn_blocking(move || pipeline.start(index)).await??;

    match outcome {
        StartOutcome::AlreadyRunning => Ok(Json(json!({ "message": "Stream already running" }))),
        StartOutcome::Started => {
            log::info!("Sign recognition stream started");
            let settings = SettingsBody::from(state.pipeline.settings().snapshot());
            Ok(Json(json!({
                "message": "Sign recognition stream started",
                "settings": settings,
            })))
        }
    }
}

async fn stop_stream(State(state): State<AppState>) -> Result<Json<Value>, ServerError> {
    let pipeline = state.pipeline.clone();
    let timeout = state.stop_timeout;
    let outcome = tokio::task::spawn_blocking(move || pipeline.stop(timeout)).await??;

    let message = match outcome {
        StopOutcome::NotRunning => "Stream not running",
        StopOutcome::Stopped | StopOutcome::Stopping => {
            log::info!("Sign recognition stream stopped");
            "Sign recognition stream stopped"
        }
    };
    Ok(Json(json!({ "message": message })))
}

async fn video_feed(State(state): State<AppState>) -> Result<Response, ServerError> {
    let frame = state
        .pipeline
        .latest_frame()
        .ok_or_else(|| ServerError::NotFound("No frame available".to_string()))?;
    Ok(([(header::CONTENT_TYPE, "image/jpeg")], frame).into_response())
}

async fn video(State(state): State<AppState>) -> Response {
    mjpeg::stream_response(state.pipeline.clone())
}

async fn predictions(State(state): State<AppState>) -> Json<Value> {
    let recognition = state.pipeline.recognition();
    match recognition.best() {
        Some((sign, confidence)) => {
            let detections: Vec<DetectionBody> =
                recognition.detections.iter().map(DetectionBody::from).collect();
            Json(json!({
                "sign": sign,
                "confidence": confidence,
                "sentence": recognition.sentence,
                "all_detections": detections,
            }))
        }
        None => Json(json!({ "message": "No predictions available" })),
    }
}

async fn set_threshold(
    State(state): State<AppState>,
    Json(request): Json<ThresholdRequest>,
) -> Result<Json<Value>, ServerError> {
    let settings = state.pipeline.settings().set_threshold(request.threshold)?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Threshold set to {}", request.threshold),
        "current_settings": SettingsBody::from(settings),
    })))
}

async fn set_zoom(
    State(state): State<AppState>,
    Json(request): Json<ZoomRequest>,
) -> Result<Json<Value>, ServerError> {
    let settings = state.pipeline.settings().set_zoom(request.zoom_factor)?;
    Ok(Json(json!({
        "success": true,
        "message": format!("Zoom factor set to {}", request.zoom_factor),
        "current_settings": SettingsBody::from(settings),
    })))
}

fn camera_json(state: &AppState) -> Value {
    let status = state.pipeline.status();
    let mut info = json!({
        "running": status.state == StreamState::Running,
        "has_frame": status.has_frame,
        "thread_alive": status.state != StreamState::Stopped,
    });
    if let (Some(camera), Some(map)) = (status.camera, info.as_object_mut()) {
        map.insert("width".to_string(), json!(camera.width));
        map.insert("height".to_string(), json!(camera.height));
        map.insert("fps".to_string(), json!(camera.fps));
    }
    info
}

async fn status(State(state): State<AppState>) -> Json<Value> {
    let status = state.pipeline.status();
    let recognition = state.pipeline.recognition();
    Json(json!({
        "streaming": status.state == StreamState::Running,
        "state": status.state.as_str(),
        "frames_processed": status.frames_processed,
        "current_detections": recognition.detections.len(),
        "sentence": recognition.sentence,
        "model_type": state.mode.model_type(),
        "settings": SettingsBody::from(state.pipeline.settings().snapshot()),
        "camera_info": camera_json(&state),
    }))
}

async fn camera_info(State(state): State<AppState>) -> Json<Value> {
    Json(camera_json(&state))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "detector_loaded": true,
        "camera_available": true,
        "streaming": state.pipeline.is_running(),
    }))
}

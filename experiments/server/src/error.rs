use asl_stream::{SettingsError, StreamError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum ServerError {
    Stream(StreamError),
    Settings(SettingsError),
    NotFound(String),
    Internal(String),
    Config(String),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Stream(err) => write!(f, "{err}"),
            ServerError::Settings(err) => write!(f, "{err}"),
            ServerError::NotFound(msg) => write!(f, "{msg}"),
            ServerError::Internal(msg) => write!(f, "internal error: {msg}"),
            ServerError::Config(msg) => write!(f, "configuration error: {msg}"),
        }
    }
}

impl std::error::Error for ServerError {}

impl From<StreamError> for ServerError {
    fn from(err: StreamError) -> Self {
        ServerError::Stream(err)
    }
}

impl From<SettingsError> for ServerError {
    fn from(err: SettingsError) -> Self {
        ServerError::Settings(err)
    }
}

impl From<tokio::task::JoinError> for ServerError {
    fn from(err: tokio::task::JoinError) -> Self {
        ServerError::Internal(err.to_string())
    }
}

impl From<asl_infer::InferError> for ServerError {
    fn from(err: asl_infer::InferError) -> Self {
        ServerError::Config(err.to_string())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            ServerError::Settings(err) => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "success": false,
                    "error": err.message,
                    "reason": err.reason.code(),
                })),
            )
                .into_response(),
            ServerError::NotFound(detail) => {
                (StatusCode::NOT_FOUND, Json(json!({ "detail": detail }))).into_response()
            }
            ServerError::Stream(StreamError::Busy) => (
                StatusCode::CONFLICT,
                Json(json!({ "detail": StreamError::Busy.to_string() })),
            )
                .into_response(),
            other => {
                log::error!("{}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "detail": other.to_string() })),
                )
                    .into_response()
            }
        }
    }
}

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::models::review::ErrorEnvelope;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing required environment variables")]
    ConfigurationMissing { missing: Vec<&'static str> },

    #[error("Google API error: {message}")]
    UpstreamError { status: StatusCode, message: String },

    #[error("Invalid response format from Google API")]
    MalformedUpstreamResponse,

    #[error("{0}")]
    UnexpectedFailure(String),

    #[error("Env error: {0}")]
    EnvError(String),
}

impl AppError {
    pub fn to_response(&self) -> (StatusCode, String) {
        match self {
            AppError::ConfigurationMissing { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::UpstreamError { status, .. } => (*status, self.to_string()),
            AppError::MalformedUpstreamResponse => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            AppError::UnexpectedFailure(msg) if msg.is_empty() => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Unknown error occurred".into(),
            ),
            AppError::UnexpectedFailure(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::EnvError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.to_response();
        (status, Json(ErrorEnvelope { error })).into_response()
    }
}

/// Failures seen by the reviews feed when talking to `/api/google-reviews`.
#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Reviews endpoint returned status {0}")]
    Status(u16),

    #[error("Reviews request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid reviews payload: {0}")]
    Payload(String),
}

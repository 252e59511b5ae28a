use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

pub const QUESTION_REQUIRED: &str = "question is required";
pub const NOTHING_TO_EXPORT: &str = "cannot export: request an answer before downloading";
pub const GENERATION_FAILED: &str = "could not generate answer";

/// Custom error type for the application
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    ValidationError(String),
    UpstreamError(String),
    InternalServerError(String),
}

/// Error response structure.
/// `error` is the human-readable message, `kind` is what clients branch on.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::UpstreamError(_) => "UPSTREAM_ERROR",
            AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_) | AppError::InternalServerError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::BadRequest(msg)
            | AppError::ValidationError(msg)
            | AppError::UpstreamError(msg)
            | AppError::InternalServerError(msg) => msg,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind(), self.message())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}", self);
        }

        let body = Json(ErrorResponse {
            error: self.message().to_string(),
            kind: self.kind().to_string(),
        });

        (status, body).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalServerError(format!("server error: {err:#}"))
    }
}

/// Result type for application handlers
pub type AppResult<T> = Result<T, AppError>;

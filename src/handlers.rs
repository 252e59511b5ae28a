use anyhow::Context;
use axum::{
    extract::{Json, State, rejection::JsonRejection},
    http::header,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use tracing::{debug, info};

use crate::app::AppState;
use crate::dispatcher::{AskCommand, Outcome, dispatch};
use crate::error::{AppError, AppResult};
use crate::exporter::{DOCX_CONTENT_TYPE, ExportedDocument};
use crate::models::{AskRequest, AskResponse, HealthResponse};

/// Health check handler
/// Returns the service status and health information
pub async fn health_check() -> AppResult<ResponseJson<HealthResponse>> {
    debug!("Health check endpoint called");

    let response = HealthResponse::ok();

    info!("Health check successful");
    Ok(ResponseJson(response))
}

/// Answers a question, passes a supplied answer back, or exports the pair
/// as a downloadable document depending on the payload.
pub async fn ask_question(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;
    info!(
        "Ask endpoint called with question: {} (download: {})",
        payload.question, payload.download
    );

    let command = AskCommand::try_from(payload)?;

    match dispatch(&state, command).await? {
        Outcome::Answer(answer) => {
            info!("Returning answer ({} chars)", answer.chars().count());
            Ok(ResponseJson(AskResponse::new(answer)).into_response())
        }
        Outcome::Document(document) => attachment(document).await,
    }
}

async fn attachment(document: ExportedDocument) -> AppResult<Response> {
    let bytes = tokio::fs::read(&document.path)
        .await
        .with_context(|| format!("Failed to read {}", document.path.display()))?;

    info!(
        "Sending {} ({} bytes) as attachment",
        document.file_name,
        bytes.len()
    );

    let disposition = format!("attachment; filename=\"{}\"", document.file_name);
    Ok((
        [
            (header::CONTENT_TYPE, DOCX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::tests::FakeGenerator;
    use crate::exporter::DocumentExporter;
    use axum::http::StatusCode;
    use std::sync::Arc;
    use tempfile::TempDir;

    fn state(generator: Arc<FakeGenerator>, dir: &TempDir) -> AppState {
        AppState {
            generator,
            exporter: Arc::new(DocumentExporter::new(dir.path()).unwrap()),
        }
    }

    fn request(question: &str, answer: &str, download: bool) -> AskRequest {
        AskRequest {
            question: question.to_string(),
            answer: answer.to_string(),
            download,
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let result = health_check().await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_ask_question_valid_query() {
        let dir = TempDir::new().unwrap();
        let state = state(FakeGenerator::answering("X is Y."), &dir);

        let result = ask_question(State(state), Ok(Json(request("What is X?", "", false)))).await;
        assert_eq!(result.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ask_question_empty_query() {
        let dir = TempDir::new().unwrap();
        let state = state(FakeGenerator::answering("X is Y."), &dir);

        let result = ask_question(State(state), Ok(Json(request("", "", false)))).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_ask_question_whitespace_query() {
        let dir = TempDir::new().unwrap();
        let state = state(FakeGenerator::answering("X is Y."), &dir);

        let result = ask_question(State(state), Ok(Json(request("   ", "", false)))).await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_attachment_missing_file_is_internal_error() {
        let dir = TempDir::new().unwrap();
        let document = ExportedDocument {
            path: dir.path().join("gone.docx"),
            file_name: "gone.docx".to_string(),
        };

        let result = attachment(document).await;
        assert!(matches!(result, Err(AppError::InternalServerError(_))));
    }
}

use tracing::{debug, info, warn};

use crate::app::AppState;
use crate::error::{AppError, AppResult, GENERATION_FAILED, NOTHING_TO_EXPORT, QUESTION_REQUIRED};
use crate::exporter::ExportedDocument;
use crate::models::AskRequest;

/// Whether the caller already holds an answer for the question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerInput {
    AlreadyAnswered(String),
    NeedsGeneration,
}

/// A validated ask request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AskCommand {
    Answer {
        question: String,
        input: AnswerInput,
    },
    Export { question: String, answer: String },
}

/// What the handler turns into a response
#[derive(Debug)]
pub enum Outcome {
    Answer(String),
    Document(ExportedDocument),
}

impl TryFrom<AskRequest> for AskCommand {
    type Error = AppError;

    fn try_from(request: AskRequest) -> Result<Self, Self::Error> {
        let question = request.question.trim().to_string();
        let answer = request.answer.trim().to_string();

        if question.is_empty() {
            return Err(AppError::ValidationError(QUESTION_REQUIRED.to_string()));
        }

        if request.download {
            if answer.is_empty() {
                return Err(AppError::ValidationError(NOTHING_TO_EXPORT.to_string()));
            }
            return Ok(AskCommand::Export { question, answer });
        }

        let input = if answer.is_empty() {
            AnswerInput::NeedsGeneration
        } else {
            AnswerInput::AlreadyAnswered(answer)
        };
        Ok(AskCommand::Answer { question, input })
    }
}

/// Runs a validated command: export, pass the answer through, or generate one.
pub async fn dispatch(state: &AppState, command: AskCommand) -> AppResult<Outcome> {
    match command {
        AskCommand::Export { question, answer } => {
            info!("Exporting answer for question: {}", question);
            let document = state.exporter.export(question, answer).await?;
            Ok(Outcome::Document(document))
        }
        AskCommand::Answer {
            input: AnswerInput::AlreadyAnswered(answer),
            ..
        } => {
            debug!("Answer supplied by caller, skipping generation");
            Ok(Outcome::Answer(answer))
        }
        AskCommand::Answer {
            question,
            input: AnswerInput::NeedsGeneration,
        } => {
            info!("Generating answer for question: {}", question);
            let answer = state
                .generator
                .generate(&question)
                .await
                .map_err(|e| {
                    warn!("Answer generation failed: {:#}", e);
                    AppError::UpstreamError(GENERATION_FAILED.to_string())
                })?;

            if answer.trim().is_empty() {
                warn!("Answer generation returned blank content");
                return Err(AppError::UpstreamError(GENERATION_FAILED.to_string()));
            }
            Ok(Outcome::Answer(answer))
        }
    }
}

pub mod completion;
pub mod openai;
pub mod prompt;

use async_trait::async_trait;

pub use openai::OpenAiGenerator;

/// Turns a question into generated answer text.
/// An `Err` or a blank answer both mean the generation failed.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, question: &str) -> anyhow::Result<String>;
}

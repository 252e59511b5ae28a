use anyhow::{Context, anyhow};
use async_trait::async_trait;
use tracing::{debug, error, info};

use super::AnswerGenerator;
use super::completion::{ChatCompletionRequest, ChatCompletionResponse};
use crate::config::Config;

/// Answer generator backed by an OpenAI-compatible chat-completion endpoint.
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn request_completion(&self, question: &str) -> anyhow::Result<String> {
        let payload = ChatCompletionRequest::for_question(&self.model, question);

        info!(
            "Sending completion request to {} (model {})",
            self.api_url, self.model
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .context("Completion request failed")?;

        let status = response.status();
        let body = response
            .text()
            .await
            .context("Failed to read completion response body")?;

        info!("Completion API status code: {}", status);

        if !status.is_success() {
            error!("Completion API error {}: {}", status, body);
            return Err(anyhow!("Completion API returned {}", status));
        }
        debug!("Completion API response body: {}", body);

        let completion: ChatCompletionResponse =
            serde_json::from_str(&body).context("Failed to decode completion response")?;

        completion
            .first_content()
            .ok_or_else(|| anyhow!("Completion API returned no content"))
    }
}

#[async_trait]
impl AnswerGenerator for OpenAiGenerator {
    async fn generate(&self, question: &str) -> anyhow::Result<String> {
        self.request_completion(question).await.inspect_err(|e| {
            error!("Answer generation failed: {:#}", e);
        })
    }
}

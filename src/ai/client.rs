use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, error, instrument};

use crate::config::ai::AiConfig;
use crate::utils::errors::AppError;

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat-completions endpoint. One request,
/// one reply; no retries, no streaming.
pub struct GenerationClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl GenerationClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    /// Send the conversation and ask the provider for a JSON-object reply.
    /// Returns the raw reply text; shape validation is the caller's concern.
    #[instrument(skip(self, messages), fields(model = %self.config.model))]
    pub async fn complete_json(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::internal("OpenAI API key is not configured"))?;

        let body = json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": messages,
            "response_format": { "type": "json_object" },
        });

        debug!(messages = messages.len(), "Requesting chat completion");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Generation request failed");
                AppError::internal(format!("AI service error: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            error!(status = %status, "Generation backend returned an error");
            return Err(AppError::internal(format!(
                "AI service error: {}: {}",
                status, detail
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::internal(format!("AI service error: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::internal("Empty response from AI model"))
    }
}

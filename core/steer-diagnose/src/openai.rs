//! OpenAI chat-completions reporter.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::prompt::{user_prompt, SYSTEM_PROMPTS};
use crate::{DiagnoseError, DiagnoseResult, DiagnosticReporter, Failure};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for [`OpenAiReporter`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Asks an OpenAI-compatible chat model to explain failures.
#[derive(Debug, Clone)]
pub struct OpenAiReporter {
    client: reqwest::Client,
    config: OpenAiConfig,
}

impl OpenAiReporter {
    pub fn new(config: OpenAiConfig) -> DiagnoseResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(DiagnoseError::Config("missing API key".into()));
        }
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl DiagnosticReporter for OpenAiReporter {
    async fn diagnose(&self, failure: &Failure) -> DiagnoseResult<Option<String>> {
        let prompt = user_prompt(failure);
        let mut messages: Vec<ChatMessage<'_>> = SYSTEM_PROMPTS
            .into_iter()
            .map(|content| ChatMessage { role: "system", content })
            .collect();
        messages.push(ChatMessage {
            role: "user",
            content: &prompt,
        });
        let request = ChatRequest {
            model: &self.config.model,
            messages,
        };

        debug!(model = %self.config.model, "sending failure to diagnosis model");
        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {e}>"));
            return Err(DiagnoseError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: ChatResponse = serde_json::from_slice(&bytes)?;
        let text = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(DiagnoseError::EmptyResponse)?;
        Ok(Some(text))
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

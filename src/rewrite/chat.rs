use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::TextRewriteProvider;
use crate::config::RewriteConfig;
use crate::error::{ReleaseError, Result};

/// OpenAI-compatible `chat/completions` endpoint
pub struct ChatCompletionProvider {
    name: String,
    endpoint: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    timeout: Duration,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionProvider {
    pub fn new(
        name: impl Into<String>,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        config: &RewriteConfig,
    ) -> Self {
        ChatCompletionProvider {
            name: name.into(),
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    pub fn openrouter(api_key: &str, model: String, config: &RewriteConfig) -> Self {
        ChatCompletionProvider::new("OpenRouter", &config.openrouter_url, api_key, model, config)
    }

    pub fn openai(api_key: &str, config: &RewriteConfig) -> Self {
        ChatCompletionProvider::new(
            "OpenAI",
            &config.openai_url,
            api_key,
            &config.openai_model,
            config,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
        }
    }
}

/// Pull `choices[0].message.content` out of a completion response body
pub(crate) fn extract_content(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ReleaseError::unavailable(format!("malformed response: {}", e)))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| ReleaseError::unavailable("response contained no choices"))
}

fn snippet(body: &str) -> String {
    const LIMIT: usize = 200;
    match body.char_indices().nth(LIMIT) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

impl TextRewriteProvider for ChatCompletionProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn rewrite(&self, prompt: &str) -> Result<String> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ReleaseError::unavailable(format!("cannot build HTTP client: {}", e)))?;

        tracing::debug!(provider = %self.name, model = %self.model, "requesting release notes rewrite");

        let response = client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .map_err(|e| ReleaseError::unavailable(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| ReleaseError::unavailable(format!("cannot read response: {}", e)))?;

        if !status.is_success() {
            return Err(ReleaseError::unavailable(format!(
                "HTTP {}: {}",
                status,
                snippet(&body)
            )));
        }

        extract_content(&body)
    }
}

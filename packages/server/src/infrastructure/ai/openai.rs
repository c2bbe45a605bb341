//! OpenAI 互換 API を使った AiProvider 実装
//!
//! `/v1/chat/completions` を Bearer キーで呼び出します。

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AiError, AiProvider, GenerationOptions};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TEMPERATURE: f32 = 0.7;
const DEFAULT_MAX_TOKENS: u32 = 1000;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
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

/// OpenAI 互換 API を使った AiProvider 実装
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenAiProvider {
    /// 新しい OpenAiProvider を作成
    ///
    /// API キーが `None` の場合、生成リクエストは `NotConfigured` を返す。
    pub fn new(base_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AiError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| AiError::NotConfigured {
            provider: self.name().to_string(),
            reason: "API key not configured".to_string(),
        })?;

        let request = ChatRequest {
            model: options.model.as_deref().unwrap_or(DEFAULT_MODEL),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: options.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: options.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        };

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .timeout(REQUEST_TIMEOUT)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| AiError::RequestFailed {
                provider: self.name().to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiError::RequestFailed {
                provider: self.name().to_string(),
                reason: format!("unexpected status {}", status),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| AiError::BadResponse {
            provider: self.name().to_string(),
            reason: e.to_string(),
        })?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| AiError::BadResponse {
                provider: self.name().to_string(),
                reason: "missing choices[0].message.content".to_string(),
            })
    }
}

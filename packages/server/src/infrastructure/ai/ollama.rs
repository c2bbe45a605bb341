//! Ollama を使った AiProvider 実装
//!
//! ローカルの Ollama インスタンスの `/api/generate` を呼び出します。
//! ローカル推論はレイテンシが大きいため、タイムアウトは長めの 120 秒。

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{AiError, AiProvider, GenerationOptions};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Serialize)]
struct OllamaRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<OllamaOptions>,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaResponse {
    response: Option<String>,
}

/// Ollama を使った AiProvider 実装
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    default_model: String,
}

impl OllamaProvider {
    /// 新しい OllamaProvider を作成
    ///
    /// # Arguments
    ///
    /// * `base_url` - Ollama のベース URL（例: "http://localhost:11434"）
    /// * `default_model` - モデル未指定時に使うモデル名
    pub fn new(base_url: String, default_model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            default_model,
        }
    }
}

#[async_trait]
impl AiProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "ollama"
    }

    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AiError> {
        let model = options.model.as_deref().unwrap_or(&self.default_model);
        let request = OllamaRequest {
            model,
            prompt,
            stream: false,
            options: match (options.temperature, options.max_tokens) {
                (None, None) => None,
                (temperature, max_tokens) => Some(OllamaOptions {
                    temperature,
                    num_predict: max_tokens,
                }),
            },
        };

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .timeout(REQUEST_TIMEOUT)
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

        let body: OllamaResponse =
            response.json().await.map_err(|e| AiError::BadResponse {
                provider: self.name().to_string(),
                reason: e.to_string(),
            })?;

        body.response.ok_or_else(|| AiError::BadResponse {
            provider: self.name().to_string(),
            reason: "missing 'response' field".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        // テスト項目: ベース URL 末尾のスラッシュが正規化される
        // given (前提条件):

        // when (操作):
        let provider =
            OllamaProvider::new("http://localhost:11434/".to_string(), "phi".to_string());

        // then (期待する結果):
        assert_eq!(provider.base_url, "http://localhost:11434");
    }

    #[test]
    fn test_request_payload_shape() {
        // テスト項目: リクエスト JSON の形が Ollama の期待と一致する
        // given (前提条件):
        let request = OllamaRequest {
            model: "phi",
            prompt: "Explain X",
            stream: false,
            options: Some(OllamaOptions {
                temperature: Some(0.7),
                num_predict: Some(256),
            }),
        };

        // when (操作):
        let json = serde_json::to_value(&request).unwrap();

        // then (期待する結果):
        assert_eq!(json["model"], "phi");
        assert_eq!(json["prompt"], "Explain X");
        assert_eq!(json["stream"], false);
        assert_eq!(json["options"]["num_predict"], 256);
    }

    #[test]
    fn test_request_payload_omits_empty_options() {
        // テスト項目: オプション未指定時に options フィールドが省略される
        // given (前提条件):
        let request = OllamaRequest {
            model: "phi",
            prompt: "Explain X",
            stream: false,
            options: None,
        };

        // when (操作):
        let json = serde_json::to_value(&request).unwrap();

        // then (期待する結果):
        assert!(json.get("options").is_none());
    }
}

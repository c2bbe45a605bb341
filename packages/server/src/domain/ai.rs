//! AI Provider trait 定義
//!
//! LLM バックエンドへの生成リクエストのインターフェース。具体的な
//! HTTP アダプタは Infrastructure 層が提供します。

use async_trait::async_trait;
use thiserror::Error;

#[cfg(test)]
use mockall::automock;

/// 生成リクエストのオプション
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    /// プロバイダ既定のモデルを上書きする
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

/// AI プロバイダのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AiError {
    /// プロバイダが設定されていない（API キー未設定など）
    #[error("provider '{provider}' is not configured: {reason}")]
    NotConfigured { provider: String, reason: String },

    /// リクエストの送信に失敗した
    #[error("request to provider '{provider}' failed: {reason}")]
    RequestFailed { provider: String, reason: String },

    /// レスポンスから生成テキストを取り出せなかった
    #[error("provider '{provider}' returned an unusable response: {reason}")]
    BadResponse { provider: String, reason: String },
}

/// AI Provider trait
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// プロバイダ名（"ollama", "openai" など）
    fn name(&self) -> &'static str;

    /// プロンプトから生成テキストを得る
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<String, AiError>;
}

//! UseCase: AI 生成処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - GenerateAiResponseUseCase::execute() メソッド
//! - プライマリプロバイダの失敗時のフォールバック順序
//!
//! ### なぜこのテストが必要か
//! - 「プライマリ失敗 → Ollama へフォールバック」という可用性の
//!   中心ロジックを固定する
//! - 全滅時のエラーに両プロバイダの失敗理由が含まれることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: プライマリ成功（フォールバックは呼ばれない）
//! - フォールバック: プライマリ失敗・フォールバック成功
//! - 異常系: 全プロバイダ失敗、空のプロンプト

use std::sync::Arc;

use crate::domain::{AiProvider, GenerationOptions};

use super::error::GenerateError;

/// AI 生成の結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub text: String,
    /// 実際に応答したプロバイダ名
    pub provider: &'static str,
}

/// AI 生成のユースケース
pub struct GenerateAiResponseUseCase {
    /// プライマリプロバイダ
    primary: Arc<dyn AiProvider>,
    /// プライマリ失敗時のフォールバック（プライマリが Ollama 自身の
    /// 場合は無し）
    fallback: Option<Arc<dyn AiProvider>>,
}

impl GenerateAiResponseUseCase {
    /// 新しい GenerateAiResponseUseCase を作成
    pub fn new(primary: Arc<dyn AiProvider>, fallback: Option<Arc<dyn AiProvider>>) -> Self {
        Self { primary, fallback }
    }

    /// 現在のプライマリプロバイダ名
    pub fn current_provider(&self) -> &'static str {
        self.primary.name()
    }

    /// AI 生成を実行
    ///
    /// # Returns
    ///
    /// * `Ok(GeneratedText)` - 生成テキストと応答したプロバイダ
    /// * `Err(GenerateError)` - 全プロバイダ失敗または空プロンプト
    pub async fn execute(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> Result<GeneratedText, GenerateError> {
        if prompt.trim().is_empty() {
            return Err(GenerateError::EmptyPrompt);
        }

        let primary_err = match self.primary.generate(prompt, options).await {
            Ok(text) => {
                return Ok(GeneratedText {
                    text,
                    provider: self.primary.name(),
                });
            }
            Err(e) => e,
        };

        tracing::warn!(
            "Provider '{}' failed: {}. Falling back...",
            self.primary.name(),
            primary_err
        );

        let Some(fallback) = &self.fallback else {
            return Err(GenerateError::AllProvidersFailed {
                provider: self.primary.name().to_string(),
                details: format!("{}: {}", self.primary.name(), primary_err),
            });
        };

        match fallback.generate(prompt, options).await {
            Ok(text) => Ok(GeneratedText {
                text,
                provider: fallback.name(),
            }),
            Err(fallback_err) => Err(GenerateError::AllProvidersFailed {
                provider: self.primary.name().to_string(),
                details: format!(
                    "{}: {}, {}: {}",
                    self.primary.name(),
                    primary_err,
                    fallback.name(),
                    fallback_err
                ),
            }),
        }
    }
}

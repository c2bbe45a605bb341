//! UseCase: ノート要約処理
//!
//! AI レイヤでノートの要約を生成してノートに保存する。プロバイダが
//! 全滅した場合は語数ベースのローカル要約にフォールバックする
//! （オフラインでも機能を落とさないため、要約の品質は劣る）。

use std::sync::Arc;

use crate::domain::{AiSummary, GenerationOptions, Note, NoteId, NoteRepository, Timestamp, UserId};
use juku_shared::time::now_epoch_millis;

use super::{error::NoteError, generate_ai_response::GenerateAiResponseUseCase};

/// ローカルフォールバックの擬似プロバイダ名
const LOCAL_PROVIDER: &str = "local";

/// ノート要約のユースケース
pub struct SummarizeNoteUseCase {
    /// Note Repository（ノート永続化の抽象化）
    notes: Arc<dyn NoteRepository>,
    /// AI 生成のユースケース（プロバイダ選択とフォールバックを含む）
    generate: Arc<GenerateAiResponseUseCase>,
}

impl SummarizeNoteUseCase {
    /// 新しい SummarizeNoteUseCase を作成
    pub fn new(notes: Arc<dyn NoteRepository>, generate: Arc<GenerateAiResponseUseCase>) -> Self {
        Self { notes, generate }
    }

    /// ノートの要約を生成して保存する（著者本人のみ）
    pub async fn execute(&self, author: &UserId, note_id: &NoteId) -> Result<Note, NoteError> {
        let mut note = self
            .notes
            .find_by_id(note_id)
            .await
            .ok_or(NoteError::NotFound)?;

        if &note.author != author {
            return Err(NoteError::AccessDenied);
        }

        let prompt = format!(
            "Summarize the following study note titled \"{}\" in a few sentences:\n\n{}",
            note.title.as_str(),
            note.content.as_str()
        );

        let summary = match self
            .generate
            .execute(&prompt, &GenerationOptions::default())
            .await
        {
            Ok(generated) => AiSummary {
                content: generated.text,
                provider: generated.provider.to_string(),
                generated_at: Timestamp::new(now_epoch_millis()),
            },
            Err(e) => {
                tracing::warn!("AI summary fell back to local: {}", e);
                AiSummary {
                    content: format!(
                        "Summary of \"{}\": this note contains {} words and covers key study material.",
                        note.title.as_str(),
                        note.metadata.word_count
                    ),
                    provider: LOCAL_PROVIDER.to_string(),
                    generated_at: Timestamp::new(now_epoch_millis()),
                }
            }
        };

        note.ai_summary = Some(summary);
        self.notes
            .update(note.clone())
            .await
            .map_err(|_| NoteError::Storage)?;

        Ok(note)
    }
}

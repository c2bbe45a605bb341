//! UseCase: ノート削除処理

use std::sync::Arc;

use crate::domain::{NoteId, NoteRepository, UserId};

use super::error::NoteError;

/// ノート削除のユースケース
pub struct DeleteNoteUseCase {
    /// Note Repository（ノート永続化の抽象化）
    notes: Arc<dyn NoteRepository>,
}

impl DeleteNoteUseCase {
    /// 新しい DeleteNoteUseCase を作成
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// ノートを削除（著者本人のみ）
    pub async fn execute(&self, author: &UserId, note_id: &NoteId) -> Result<(), NoteError> {
        let note = self
            .notes
            .find_by_id(note_id)
            .await
            .ok_or(NoteError::NotFound)?;

        if &note.author != author {
            return Err(NoteError::AccessDenied);
        }

        self.notes
            .delete(note_id)
            .await
            .map_err(|_| NoteError::NotFound)?;

        tracing::info!("Note '{}' deleted", note_id.as_str());
        Ok(())
    }
}

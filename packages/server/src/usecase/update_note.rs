//! UseCase: ノート更新処理

use std::sync::Arc;

use crate::domain::{Note, NoteContent, NoteId, NoteRepository, NoteTitle, Timestamp, UserId};
use juku_shared::time::now_epoch_millis;

use super::{create_note::parse_tags, error::NoteError};

/// ノート更新の入力（`None` のフィールドは変更しない）
#[derive(Debug, Clone, Default)]
pub struct UpdateNoteInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// ノート更新のユースケース
pub struct UpdateNoteUseCase {
    /// Note Repository（ノート永続化の抽象化）
    notes: Arc<dyn NoteRepository>,
}

impl UpdateNoteUseCase {
    /// 新しい UpdateNoteUseCase を作成
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// ノートを部分更新（著者本人のみ）
    pub async fn execute(
        &self,
        author: &UserId,
        note_id: &NoteId,
        input: UpdateNoteInput,
    ) -> Result<Note, NoteError> {
        let mut note = self
            .notes
            .find_by_id(note_id)
            .await
            .ok_or(NoteError::NotFound)?;

        if &note.author != author {
            return Err(NoteError::AccessDenied);
        }

        let updated_at = Timestamp::new(now_epoch_millis());
        if let Some(title) = input.title {
            note.title = NoteTitle::new(title)?;
        }
        if let Some(content) = input.content {
            // メタデータも再計算される
            note.replace_content(NoteContent::new(content)?, updated_at);
        }
        if let Some(tags) = input.tags {
            note.tags = parse_tags(tags)?;
        }
        if let Some(is_public) = input.is_public {
            note.is_public = is_public;
        }
        note.updated_at = updated_at;

        self.notes
            .update(note.clone())
            .await
            .map_err(|_| NoteError::Storage)?;

        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomKey;
    use crate::infrastructure::repository::InMemoryNoteRepository;

    async fn create_usecase_with_note() -> (UpdateNoteUseCase, Note) {
        let repo = Arc::new(InMemoryNoteRepository::new());
        let note = Note::new(
            NoteTitle::new("Calculus".to_string()).unwrap(),
            NoteContent::new("one two three".to_string()).unwrap(),
            UserId::generate(),
            vec![],
            false,
            RoomKey::default_room(),
            Timestamp::new(1000),
        );
        repo.insert(note.clone()).await.unwrap();
        (UpdateNoteUseCase::new(repo), note)
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        // テスト項目: 指定フィールドだけが更新される
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note().await;

        // when (操作): タイトルのみ更新
        let updated = usecase
            .execute(
                &note.author,
                &note.id,
                UpdateNoteInput {
                    title: Some("Calculus II".to_string()),
                    ..UpdateNoteInput::default()
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(updated.title.as_str(), "Calculus II");
        assert_eq!(updated.content, note.content);
        assert_eq!(updated.metadata.word_count, 3);
    }

    #[tokio::test]
    async fn test_content_update_recomputes_metadata() {
        // テスト項目: 本文更新でメタデータが再計算される
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note().await;

        // when (操作):
        let updated = usecase
            .execute(
                &note.author,
                &note.id,
                UpdateNoteInput {
                    content: Some("one two three four five".to_string()),
                    ..UpdateNoteInput::default()
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(updated.metadata.word_count, 5);
        assert!(updated.updated_at > note.updated_at);
    }

    #[tokio::test]
    async fn test_non_owner_cannot_update() {
        // テスト項目: 著者以外の更新が拒否される
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note().await;
        let stranger = UserId::generate();

        // when (操作):
        let result = usecase
            .execute(
                &stranger,
                &note.id,
                UpdateNoteInput {
                    title: Some("Hijacked".to_string()),
                    ..UpdateNoteInput::default()
                },
            )
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), NoteError::AccessDenied);
    }

    #[tokio::test]
    async fn test_update_unknown_note() {
        // テスト項目: 存在しないノートの更新で NotFound が返される
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note().await;

        // when (操作):
        let result = usecase
            .execute(&note.author, &NoteId::generate(), UpdateNoteInput::default())
            .await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), NoteError::NotFound);
    }
}

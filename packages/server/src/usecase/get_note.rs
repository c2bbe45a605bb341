//! UseCase: ノート取得処理

use std::sync::Arc;

use crate::domain::{Note, NoteId, NoteRepository, UserId};

use super::error::NoteError;

/// ノート取得のユースケース
pub struct GetNoteUseCase {
    /// Note Repository（ノート永続化の抽象化）
    notes: Arc<dyn NoteRepository>,
}

impl GetNoteUseCase {
    /// 新しい GetNoteUseCase を作成
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// ノートを取得
    ///
    /// 公開ノートは誰でも（未認証でも）閲覧できる。非公開ノートは
    /// 著者本人のみ。
    pub async fn execute(
        &self,
        viewer: Option<&UserId>,
        note_id: &NoteId,
    ) -> Result<Note, NoteError> {
        let note = self
            .notes
            .find_by_id(note_id)
            .await
            .ok_or(NoteError::NotFound)?;

        if !note.is_public && viewer != Some(&note.author) {
            return Err(NoteError::AccessDenied);
        }

        Ok(note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NoteContent, NoteTitle, RoomKey, Timestamp};
    use crate::infrastructure::repository::InMemoryNoteRepository;

    async fn create_usecase_with_note(is_public: bool) -> (GetNoteUseCase, Note) {
        let repo = Arc::new(InMemoryNoteRepository::new());
        let note = Note::new(
            NoteTitle::new("Calculus".to_string()).unwrap(),
            NoteContent::new("content".to_string()).unwrap(),
            UserId::generate(),
            vec![],
            is_public,
            RoomKey::default_room(),
            Timestamp::new(1000),
        );
        repo.insert(note.clone()).await.unwrap();
        (GetNoteUseCase::new(repo), note)
    }

    #[tokio::test]
    async fn test_owner_can_read_private_note() {
        // テスト項目: 著者本人は非公開ノートを閲覧できる
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note(false).await;

        // when (操作):
        let found = usecase.execute(Some(&note.author), &note.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(found.id, note.id);
    }

    #[tokio::test]
    async fn test_stranger_cannot_read_private_note() {
        // テスト項目: 他人の非公開ノートの閲覧が拒否される
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note(false).await;
        let stranger = UserId::generate();

        // when (操作):
        let result = usecase.execute(Some(&stranger), &note.id).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), NoteError::AccessDenied);
    }

    #[tokio::test]
    async fn test_anonymous_can_read_public_note() {
        // テスト項目: 公開ノートは未認証でも閲覧できる
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note(true).await;

        // when (操作):
        let found = usecase.execute(None, &note.id).await.unwrap();

        // then (期待する結果):
        assert_eq!(found.id, note.id);
    }

    #[tokio::test]
    async fn test_anonymous_cannot_read_private_note() {
        // テスト項目: 非公開ノートは未認証では閲覧できない
        // given (前提条件):
        let (usecase, note) = create_usecase_with_note(false).await;

        // when (操作):
        let result = usecase.execute(None, &note.id).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), NoteError::AccessDenied);
    }

    #[tokio::test]
    async fn test_unknown_note_is_not_found() {
        // テスト項目: 存在しないノートで NotFound が返される
        // given (前提条件):
        let (usecase, _note) = create_usecase_with_note(true).await;

        // when (操作):
        let result = usecase.execute(None, &NoteId::generate()).await;

        // then (期待する結果):
        assert_eq!(result.unwrap_err(), NoteError::NotFound);
    }
}

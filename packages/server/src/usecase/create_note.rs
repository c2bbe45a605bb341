//! UseCase: ノート作成処理

use std::sync::Arc;

use crate::domain::{
    Note, NoteContent, NoteRepository, NoteTitle, RoomKey, Tag, Timestamp, UserId,
};
use juku_shared::time::now_epoch_millis;

use super::error::NoteError;

/// ノート作成の入力
#[derive(Debug, Clone)]
pub struct CreateNoteInput {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    /// 省略時は "default-room"
    pub study_room: Option<String>,
}

/// ノート作成のユースケース
pub struct CreateNoteUseCase {
    /// Note Repository（ノート永続化の抽象化）
    notes: Arc<dyn NoteRepository>,
}

impl CreateNoteUseCase {
    /// 新しい CreateNoteUseCase を作成
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// ノート作成を実行
    pub async fn execute(&self, author: &UserId, input: CreateNoteInput) -> Result<Note, NoteError> {
        let title = NoteTitle::new(input.title)?;
        let content = NoteContent::new(input.content)?;
        let tags = parse_tags(input.tags)?;
        let study_room = match input.study_room {
            Some(room) => RoomKey::new(room)?,
            None => RoomKey::default_room(),
        };

        let note = Note::new(
            title,
            content,
            author.clone(),
            tags,
            input.is_public,
            study_room,
            Timestamp::new(now_epoch_millis()),
        );

        self.notes
            .insert(note.clone())
            .await
            .map_err(|_| NoteError::Storage)?;

        tracing::info!("Note '{}' created", note.id.as_str());
        Ok(note)
    }
}

/// タグの入力リストを検証する（空白のみのタグは捨てる）
pub(crate) fn parse_tags(raw: Vec<String>) -> Result<Vec<Tag>, NoteError> {
    let mut tags = Vec::new();
    for value in raw {
        if value.trim().is_empty() {
            continue;
        }
        tags.push(Tag::new(value)?);
    }
    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::repository::InMemoryNoteRepository;

    fn create_usecase() -> (CreateNoteUseCase, Arc<InMemoryNoteRepository>) {
        let notes = Arc::new(InMemoryNoteRepository::new());
        (CreateNoteUseCase::new(notes.clone()), notes)
    }

    fn input(title: &str, content: &str) -> CreateNoteInput {
        CreateNoteInput {
            title: title.to_string(),
            content: content.to_string(),
            tags: vec![],
            is_public: false,
            study_room: None,
        }
    }

    #[tokio::test]
    async fn test_create_note_success_with_defaults() {
        // テスト項目: 作成されたノートに既定値とメタデータが設定される
        // given (前提条件):
        let (usecase, notes) = create_usecase();
        let author = UserId::generate();

        // when (操作):
        let note = usecase
            .execute(&author, input("Calculus", "one two three"))
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(note.study_room.as_str(), "default-room");
        assert_eq!(note.metadata.word_count, 3);
        assert!(!note.is_public);
        assert!(notes.find_by_id(&note.id).await.is_some());
    }

    #[tokio::test]
    async fn test_create_note_skips_blank_tags() {
        // テスト項目: 空白のみのタグが捨てられ、他は検証される
        // given (前提条件):
        let (usecase, _notes) = create_usecase();
        let author = UserId::generate();
        let mut note_input = input("Calculus", "content");
        note_input.tags = vec!["math".to_string(), "  ".to_string(), " exam ".to_string()];

        // when (操作):
        let note = usecase.execute(&author, note_input).await.unwrap();

        // then (期待する結果):
        let tags: Vec<&str> = note.tags.iter().map(|tag| tag.as_str()).collect();
        assert_eq!(tags, vec!["math", "exam"]);
    }

    #[tokio::test]
    async fn test_create_note_requires_title_and_content() {
        // テスト項目: タイトル・本文が欠けた作成が拒否される
        // given (前提条件):
        let (usecase, _notes) = create_usecase();
        let author = UserId::generate();

        // when (操作) / then (期待する結果):
        assert!(usecase.execute(&author, input("", "content")).await.is_err());
        assert!(usecase.execute(&author, input("Title", "")).await.is_err());
    }
}

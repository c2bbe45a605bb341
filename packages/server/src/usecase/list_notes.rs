//! UseCase: ノート一覧取得処理

use std::sync::Arc;

use crate::domain::{NotePage, NoteQuery, NoteRepository, RoomKey, Tag, UserId};

use super::error::NoteError;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// ノート一覧取得の入力
#[derive(Debug, Clone, Default)]
pub struct ListNotesInput {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    /// カンマ区切りのタグリスト
    pub tags: Option<String>,
    pub study_room: Option<String>,
}

/// ノート一覧取得のユースケース
pub struct ListNotesUseCase {
    /// Note Repository（ノート永続化の抽象化）
    notes: Arc<dyn NoteRepository>,
}

impl ListNotesUseCase {
    /// 新しい ListNotesUseCase を作成
    pub fn new(notes: Arc<dyn NoteRepository>) -> Self {
        Self { notes }
    }

    /// 著者のノート一覧を取得
    pub async fn execute(
        &self,
        author: &UserId,
        input: ListNotesInput,
    ) -> Result<(NotePage, usize /* limit */, usize /* page */), NoteError> {
        let page = input.page.unwrap_or(DEFAULT_PAGE).max(1);
        let limit = input.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, 100);

        // カンマ区切りタグを検証（空要素は無視）
        let mut tags = Vec::new();
        if let Some(raw) = input.tags {
            for value in raw.split(',') {
                if value.trim().is_empty() {
                    continue;
                }
                tags.push(Tag::new(value.to_string())?);
            }
        }

        let study_room = match input.study_room {
            Some(room) => Some(RoomKey::new(room)?),
            None => None,
        };

        let query = NoteQuery {
            page,
            limit,
            search: input.search,
            tags,
            study_room,
        };
        let result = self.notes.search(author, query).await;

        Ok((result, limit, page))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, NoteContent, NoteTitle, Timestamp};
    use crate::infrastructure::repository::InMemoryNoteRepository;

    async fn seed_notes(repo: &Arc<InMemoryNoteRepository>, author: &UserId, count: usize) {
        for i in 0..count {
            let mut note = Note::new(
                NoteTitle::new(format!("Note {i}")).unwrap(),
                NoteContent::new("content".to_string()).unwrap(),
                author.clone(),
                vec![],
                false,
                RoomKey::default_room(),
                Timestamp::new(1000 + i as i64),
            );
            note.updated_at = Timestamp::new(1000 + i as i64);
            repo.insert(note).await.unwrap();
        }
    }

    #[tokio::test]
    async fn test_list_notes_defaults() {
        // テスト項目: ページ・件数の既定値（1 ページ 10 件）が適用される
        // given (前提条件):
        let repo = Arc::new(InMemoryNoteRepository::new());
        let author = UserId::generate();
        seed_notes(&repo, &author, 15).await;
        let usecase = ListNotesUseCase::new(repo);

        // when (操作):
        let (page, limit, current_page) = usecase
            .execute(&author, ListNotesInput::default())
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(page.total, 15);
        assert_eq!(page.notes.len(), 10);
        assert_eq!(limit, 10);
        assert_eq!(current_page, 1);
    }

    #[tokio::test]
    async fn test_list_notes_comma_separated_tags() {
        // テスト項目: カンマ区切りのタグがパース・トリムされる
        // given (前提条件):
        let repo = Arc::new(InMemoryNoteRepository::new());
        let author = UserId::generate();
        let note = Note::new(
            NoteTitle::new("Tagged".to_string()).unwrap(),
            NoteContent::new("content".to_string()).unwrap(),
            author.clone(),
            vec![crate::domain::Tag::new("math".to_string()).unwrap()],
            false,
            RoomKey::default_room(),
            Timestamp::new(1000),
        );
        repo.insert(note).await.unwrap();
        let usecase = ListNotesUseCase::new(repo);

        // when (操作):
        let (page, _, _) = usecase
            .execute(
                &author,
                ListNotesInput {
                    tags: Some(" math , physics ".to_string()),
                    ..ListNotesInput::default()
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn test_list_notes_clamps_limit() {
        // テスト項目: 過大な limit が上限に丸められる
        // given (前提条件):
        let repo = Arc::new(InMemoryNoteRepository::new());
        let author = UserId::generate();
        let usecase = ListNotesUseCase::new(repo);

        // when (操作):
        let (_, limit, _) = usecase
            .execute(
                &author,
                ListNotesInput {
                    limit: Some(10_000),
                    ..ListNotesInput::default()
                },
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(limit, 100);
    }
}

//! InMemory Note Repository 実装
//!
//! ## 技術的負債
//!
//! 本番相当のドキュメント DB（全文検索インデックス付き）の代わりに、
//! HashMap と部分一致検索で同じインターフェースを提供しています。
//! `search` の絞り込みセマンティクスは trait 側の契約で、DBMS 実装に
//! 置き換える際もテストがそのまま使えます。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Note, NoteId, NotePage, NoteQuery, NoteRepository, RepositoryError, UserId,
};

/// インメモリ Note Repository 実装
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: Mutex<HashMap<NoteId, Note>>,
}

impl InMemoryNoteRepository {
    /// 新しい InMemoryNoteRepository を作成
    pub fn new() -> Self {
        Self::default()
    }
}

/// タイトル・本文・タグのいずれかに検索語が部分一致するか（大文字小文字を無視）
fn matches_search(note: &Note, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    note.title.as_str().to_lowercase().contains(&needle)
        || note.content.as_str().to_lowercase().contains(&needle)
        || note
            .tags
            .iter()
            .any(|tag| tag.as_str().to_lowercase().contains(&needle))
}

#[async_trait]
impl NoteRepository for InMemoryNoteRepository {
    async fn insert(&self, note: Note) -> Result<(), RepositoryError> {
        let mut notes = self.notes.lock().await;
        notes.insert(note.id.clone(), note);
        Ok(())
    }

    async fn find_by_id(&self, id: &NoteId) -> Option<Note> {
        let notes = self.notes.lock().await;
        notes.get(id).cloned()
    }

    async fn update(&self, note: Note) -> Result<(), RepositoryError> {
        let mut notes = self.notes.lock().await;
        if !notes.contains_key(&note.id) {
            return Err(RepositoryError::NoteNotFound);
        }
        notes.insert(note.id.clone(), note);
        Ok(())
    }

    async fn delete(&self, id: &NoteId) -> Result<(), RepositoryError> {
        let mut notes = self.notes.lock().await;
        notes
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NoteNotFound)
    }

    async fn search(&self, author: &UserId, query: NoteQuery) -> NotePage {
        let notes = self.notes.lock().await;

        let mut matched: Vec<Note> = notes
            .values()
            .filter(|note| &note.author == author)
            .filter(|note| match &query.search {
                Some(needle) => matches_search(note, needle),
                None => true,
            })
            .filter(|note| {
                query.tags.is_empty() || note.tags.iter().any(|tag| query.tags.contains(tag))
            })
            .filter(|note| match &query.study_room {
                Some(room) => &note.study_room == room,
                None => true,
            })
            .cloned()
            .collect();

        // Newest first; tie-break on id for a stable order
        matched.sort_by(|a, b| {
            b.updated_at
                .cmp(&a.updated_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });

        let total = matched.len();
        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let notes = matched
            .into_iter()
            .skip((page - 1) * limit)
            .take(limit)
            .collect();

        NotePage { notes, total }
    }
}

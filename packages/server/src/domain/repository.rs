//! Repository trait 定義
//!
//! ドメイン層が必要とする永続化のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//! 本番相当のドキュメント DB は外部コラボレータであり、この trait が
//! その境界になります。

use async_trait::async_trait;

use super::{
    error::RepositoryError,
    entity::{Note, User},
    value_object::{Email, NoteId, RoomKey, Tag, UserId, Username},
};

/// ノート一覧の検索条件
#[derive(Debug, Clone, Default)]
pub struct NoteQuery {
    /// 1 始まりのページ番号
    pub page: usize,
    /// 1 ページあたりの件数
    pub limit: usize,
    /// タイトル・本文・タグに対する部分一致検索（大文字小文字を無視）
    pub search: Option<String>,
    /// いずれかのタグを持つノートに絞り込む
    pub tags: Vec<Tag>,
    /// スタディルームで絞り込む
    pub study_room: Option<RoomKey>,
}

/// ノート一覧の 1 ページ
#[derive(Debug, Clone)]
pub struct NotePage {
    pub notes: Vec<Note>,
    /// 絞り込み後の総件数（ページング前）
    pub total: usize,
}

/// User Repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// アカウントを追加する
    ///
    /// ユーザー名またはメールアドレスが既存のアカウントと重複する場合は
    /// `RepositoryError::DuplicateUser`。
    async fn insert(&self, user: User) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &UserId) -> Option<User>;

    async fn find_by_email(&self, email: &Email) -> Option<User>;

    async fn find_by_username(&self, username: &Username) -> Option<User>;

    /// アカウントを更新する（存在しなければ `UserNotFound`）
    async fn update(&self, user: User) -> Result<(), RepositoryError>;
}

/// Note Repository trait
#[async_trait]
pub trait NoteRepository: Send + Sync {
    async fn insert(&self, note: Note) -> Result<(), RepositoryError>;

    async fn find_by_id(&self, id: &NoteId) -> Option<Note>;

    /// ノートを更新する（存在しなければ `NoteNotFound`）
    async fn update(&self, note: Note) -> Result<(), RepositoryError>;

    /// ノートを削除する（存在しなければ `NoteNotFound`）
    async fn delete(&self, id: &NoteId) -> Result<(), RepositoryError>;

    /// 著者のノートを検索する
    ///
    /// `updated_at` の降順で返す。ページングは絞り込みの後に適用される。
    async fn search(&self, author: &UserId, query: NoteQuery) -> NotePage;
}

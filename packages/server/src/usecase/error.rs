//! UseCase 層のエラー型

use thiserror::Error;

use crate::domain::{TokenError, ValidationError};

/// ルーム参加のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JoinRoomError {
    /// 未登録のセッション
    #[error("session '{0}' is not registered")]
    UnknownSession(String),

    /// 既に別のルームに参加している（切断せずにルームを移ることは
    /// サポートしない）
    #[error("session '{session}' is already in room '{current}'")]
    AlreadyInRoom { session: String, current: String },
}

/// ルーム内イベント（chat / notes）のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RealtimeEventError {
    /// ルームに参加していないセッションからのイベント
    #[error("session '{0}' has not joined a room")]
    NotInRoom(String),
}

/// セッション切断のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DisconnectError {
    /// 未登録のセッション
    #[error("session '{0}' is not registered")]
    UnknownSession(String),
}

/// ルーム詳細取得のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GetRoomDetailError {
    #[error("room not found")]
    RoomNotFound,
}

/// アカウント登録のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignupError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("an account with this username or email already exists")]
    DuplicateAccount,

    #[error("failed to hash password: {0}")]
    Hash(String),

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// ログインのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoginError {
    /// アカウントが存在しないかパスワードが一致しない
    /// （区別できないエラーメッセージを返す）
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Token(#[from] TokenError),
}

/// プロフィール操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("user not found")]
    UserNotFound,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// ノート操作のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NoteError {
    #[error("note not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// 永続化層の失敗
    #[error("server error")]
    Storage,
}

/// AI 生成のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("prompt required")]
    EmptyPrompt,

    /// 全プロバイダが失敗した
    #[error("AI backend error: {details}")]
    AllProvidersFailed { provider: String, details: String },
}

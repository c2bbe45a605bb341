//! MessagePusher trait 定義
//!
//! シリアライズ済みイベントをセッションのチャンネルへ送るインターフェース。
//! WebSocket の生成は UI 層の責務で、この trait は sender の管理と送信のみを
//! 扱います。

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::SessionId;

/// セッションへの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// メッセージ送信のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessagePushError {
    /// 対象セッションのチャンネルが存在しない
    #[error("session '{0}' has no live channel")]
    SessionNotFound(String),

    /// 送信に失敗した（受信側が閉じている等）
    #[error("failed to push message: {0}")]
    PushFailed(String),
}

/// MessagePusher trait
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// セッションの送信チャンネルを登録する
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel);

    /// セッションの送信チャンネルを解除する
    async fn unregister_session(&self, session_id: &SessionId);

    /// 特定のセッションへメッセージを送る
    async fn push_to(&self, session_id: &SessionId, content: &str)
    -> Result<(), MessagePushError>;

    /// 複数セッションへメッセージを送る（ベストエフォート）
    ///
    /// チャンネルが既に失われたセッションはスキップし、残りへの配送は
    /// 継続する。送信元にエラーは伝搬しない。
    async fn broadcast(&self, targets: Vec<SessionId>, content: &str);
}

//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - セッションへのメッセージ送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。送信はいずれも非ブロッキングで、dispatch lock の内側から
//! 呼んでも待ちが発生しません。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{MessagePushError, MessagePusher, PusherChannel, SessionId};

/// WebSocket を使った MessagePusher 実装
#[derive(Default)]
pub struct WebSocketMessagePusher {
    /// 接続中のセッションと対応する WebSocket sender のマップ
    sessions: Mutex<HashMap<SessionId, PusherChannel>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_session(&self, session_id: SessionId, sender: PusherChannel) {
        let mut sessions = self.sessions.lock().await;
        tracing::debug!("Session '{}' registered to MessagePusher", session_id.as_str());
        sessions.insert(session_id, sender);
    }

    async fn unregister_session(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id);
        tracing::debug!(
            "Session '{}' unregistered from MessagePusher",
            session_id.as_str()
        );
    }

    async fn push_to(
        &self,
        session_id: &SessionId,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let sessions = self.sessions.lock().await;

        if let Some(sender) = sessions.get(session_id) {
            sender
                .send(content.to_string())
                .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to session '{}'", session_id.as_str());
            Ok(())
        } else {
            Err(MessagePushError::SessionNotFound(
                session_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast(&self, targets: Vec<SessionId>, content: &str) {
        let sessions = self.sessions.lock().await;

        for target in targets {
            if let Some(sender) = sessions.get(&target) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!(
                        "Failed to push message to session '{}': {}",
                        target.as_str(),
                        e
                    );
                } else {
                    tracing::debug!("Broadcasted message to session '{}'", target.as_str());
                }
            } else {
                tracing::warn!(
                    "Session '{}' not found during broadcast, skipping",
                    target.as_str()
                );
            }
        }
    }
}

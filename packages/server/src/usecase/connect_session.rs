//! UseCase: セッション接続処理
//!
//! トランスポート層の接続ごとに呼ばれ、Session Registry への登録と
//! MessagePusher へのチャンネル登録を行う。失敗モードはない。

use std::sync::Arc;

use crate::domain::{MessagePusher, PusherChannel, SessionId, SessionRegistry, Timestamp};
use juku_shared::time::now_epoch_millis;

/// セッション接続のユースケース
pub struct ConnectSessionUseCase {
    /// Session Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// MessagePusher（メッセージ通知の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl ConnectSessionUseCase {
    /// 新しい ConnectSessionUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { registry, pusher }
    }

    /// セッション接続を実行
    ///
    /// # Arguments
    ///
    /// * `sender` - セッションへのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 採番されたセッション ID と接続時刻
    pub async fn execute(&self, sender: PusherChannel) -> (SessionId, Timestamp) {
        let connected_at = Timestamp::new(now_epoch_millis());

        // 1. Registry にセッションを登録（失敗しない）
        let session_id = self.registry.register(connected_at).await;

        // 2. MessagePusher にチャンネルを登録
        self.pusher
            .register_session(session_id.clone(), sender)
            .await;

        (session_id, connected_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher, repository::InMemorySessionRegistry,
    };

    #[tokio::test]
    async fn test_connect_registers_session_and_channel() {
        // テスト項目: 接続でセッションとチャンネルの両方が登録される
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectSessionUseCase::new(registry.clone(), pusher.clone());

        // when (操作):
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        let (session_id, connected_at) = usecase.execute(tx).await;

        // then (期待する結果):
        assert_eq!(registry.count().await, 1);
        assert!(connected_at.value() > 0);

        // チャンネルが MessagePusher に登録されている
        pusher.push_to(&session_id, "hello").await.unwrap();
        assert_eq!(rx.recv().await, Some("hello".to_string()));
    }

    #[tokio::test]
    async fn test_connect_assigns_distinct_sessions() {
        // テスト項目: 接続ごとに別のセッション ID が採番される
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let usecase = ConnectSessionUseCase::new(registry.clone(), pusher);

        // when (操作):
        let (tx1, _rx1) = tokio::sync::mpsc::unbounded_channel();
        let (tx2, _rx2) = tokio::sync::mpsc::unbounded_channel();
        let (id1, _) = usecase.execute(tx1).await;
        let (id2, _) = usecase.execute(tx2).await;

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert_eq!(registry.count().await, 2);
    }
}

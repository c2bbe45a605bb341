//! InMemory Session Registry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! HashMap をインメモリストアとして使用します。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    DisplayName, RoomKey, SessionId, SessionRecord, SessionRegistry, Timestamp,
};

/// インメモリ Session Registry 実装
///
/// セッションのレコードを保持し、ドメイン層の SessionRegistry trait を
/// 実装します（依存性の逆転）。
#[derive(Default)]
pub struct InMemorySessionRegistry {
    sessions: Mutex<HashMap<SessionId, SessionRecord>>,
}

impl InMemorySessionRegistry {
    /// 新しい InMemorySessionRegistry を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn register(&self, connected_at: Timestamp) -> SessionId {
        let session_id = SessionId::generate();
        let record = SessionRecord::new(session_id.clone(), connected_at);

        let mut sessions = self.sessions.lock().await;
        sessions.insert(session_id.clone(), record);
        tracing::debug!("Session '{}' registered", session_id.as_str());

        session_id
    }

    async fn set_room(&self, session_id: &SessionId, room: RoomKey) {
        let mut sessions = self.sessions.lock().await;
        if let Some(record) = sessions.get_mut(session_id) {
            record.room = Some(room);
        }
    }

    async fn set_display_name(&self, session_id: &SessionId, display_name: DisplayName) {
        let mut sessions = self.sessions.lock().await;
        if let Some(record) = sessions.get_mut(session_id) {
            record.display_name = Some(display_name);
        }
    }

    async fn get(&self, session_id: &SessionId) -> Option<SessionRecord> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).cloned()
    }

    async fn current_room(&self, session_id: &SessionId) -> Option<RoomKey> {
        let sessions = self.sessions.lock().await;
        sessions.get(session_id).and_then(|record| record.room.clone())
    }

    async fn unregister(&self, session_id: &SessionId) {
        let mut sessions = self.sessions.lock().await;
        sessions.remove(session_id);
        tracing::debug!("Session '{}' unregistered", session_id.as_str());
    }

    async fn count(&self) -> usize {
        let sessions = self.sessions.lock().await;
        sessions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_register_assigns_fresh_ids() {
        // テスト項目: 登録のたびに新しいセッション ID が採番される
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();

        // when (操作):
        let id1 = registry.register(Timestamp::new(1000)).await;
        let id2 = registry.register(Timestamp::new(1000)).await;

        // then (期待する結果):
        assert_ne!(id1, id2);
        assert_eq!(registry.count().await, 2);
    }

    #[tokio::test]
    async fn test_set_room_is_idempotent() {
        // テスト項目: set_room を繰り返し呼んでも結果が変わらない
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let session_id = registry.register(Timestamp::new(1000)).await;
        let room = RoomKey::new("math-101".to_string()).unwrap();

        // when (操作):
        registry.set_room(&session_id, room.clone()).await;
        registry.set_room(&session_id, room.clone()).await;

        // then (期待する結果):
        assert_eq!(registry.current_room(&session_id).await, Some(room));
    }

    #[tokio::test]
    async fn test_set_room_for_unknown_session_is_noop() {
        // テスト項目: 未登録セッションへの set_room が no-op になる
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let unknown = SessionId::generate();

        // when (操作):
        registry
            .set_room(&unknown, RoomKey::new("math-101".to_string()).unwrap())
            .await;

        // then (期待する結果):
        assert_eq!(registry.current_room(&unknown).await, None);
        assert_eq!(registry.count().await, 0);
    }

    #[tokio::test]
    async fn test_set_display_name() {
        // テスト項目: 表示名が更新される
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let session_id = registry.register(Timestamp::new(1000)).await;

        // when (操作):
        registry
            .set_display_name(&session_id, DisplayName::new("alice".to_string()).unwrap())
            .await;

        // then (期待する結果):
        let record = registry.get(&session_id).await.unwrap();
        assert_eq!(record.display_name.unwrap().as_str(), "alice");
    }

    #[tokio::test]
    async fn test_unregister_frees_the_record() {
        // テスト項目: 解除後はレコードが参照できない
        // given (前提条件):
        let registry = InMemorySessionRegistry::new();
        let session_id = registry.register(Timestamp::new(1000)).await;

        // when (操作):
        registry.unregister(&session_id).await;

        // then (期待する結果):
        assert!(registry.get(&session_id).await.is_none());
        assert_eq!(registry.count().await, 0);
    }
}

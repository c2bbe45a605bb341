//! UseCase: 共有ノート更新処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - UpdateRoomNotesUseCase::execute() メソッド
//! - 共有ノートの全文上書き（last-writer-wins）と echo suppression
//!
//! ### なぜこのテストが必要か
//! - 「ノートバッファは常に最後に受信した update を反映する」という
//!   一貫性モデルそのものを固定する
//! - notes-update は chat と異なり送信元へエコーしない
//!   （ソース準拠の非対称ポリシー）
//!
//! ### どのような状況を想定しているか
//! - 正常系: 上書きと他メンバーへの配送
//! - 到着順: 連続する update の後勝ち
//! - 異常系: ルーム未参加のセッションからの update

use std::sync::Arc;

use crate::domain::{NoteText, RoomDirectory, RoomKey, SessionId, SessionRegistry};

use super::{broadcast::BroadcastRouter, error::RealtimeEventError, DispatchLock};

/// 共有ノート更新のユースケース
pub struct UpdateRoomNotesUseCase {
    /// Session Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Room Directory（ルーム状態の抽象化）
    directory: Arc<dyn RoomDirectory>,
    /// Broadcast Router（ファンアウト）
    router: Arc<BroadcastRouter>,
    /// リアルタイムイベント処理を直列化するロック
    dispatch: DispatchLock,
}

impl UpdateRoomNotesUseCase {
    /// 新しい UpdateRoomNotesUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        directory: Arc<dyn RoomDirectory>,
        router: Arc<BroadcastRouter>,
        dispatch: DispatchLock,
    ) -> Self {
        Self {
            registry,
            directory,
            router,
            dispatch,
        }
    }

    /// 共有ノート更新を実行
    ///
    /// Room Directory のノートを無条件に全文上書きし、送信元を除く
    /// メンバーへ配送する。未知のルームは暗黙に作成される。
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信元セッションの ID
    /// * `room` - ペイロードで指定されたルーム
    /// * `notes` - 新しいノート全文
    /// * `json_message` - 送信する JSON メッセージ（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 配送対象（送信元を除く）
    /// * `Err(RealtimeEventError)` - 更新失敗
    pub async fn execute(
        &self,
        session_id: &SessionId,
        room: &RoomKey,
        notes: NoteText,
        json_message: String,
    ) -> Result<Vec<SessionId>, RealtimeEventError> {
        let _guard = self.dispatch.lock().await;

        // 1. ルーム参加済みのセッションであることを確認
        if self.registry.current_room(session_id).await.is_none() {
            return Err(RealtimeEventError::NotInRoom(
                session_id.as_str().to_string(),
            ));
        }

        // 2. ノートバッファを上書き（到着順 = last-writer-wins）
        self.directory.update_note(room, notes).await;

        // 3. 送信元を除くメンバーへファンアウト
        let targets = self
            .router
            .broadcast(room, session_id, &json_message, false)
            .await;

        Ok(targets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Member, MessagePusher, Timestamp};
    use crate::infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryRoomDirectory, InMemorySessionRegistry},
    };
    use tokio::sync::{Mutex, mpsc};

    struct TestHarness {
        usecase: UpdateRoomNotesUseCase,
        registry: Arc<InMemorySessionRegistry>,
        directory: Arc<InMemoryRoomDirectory>,
        pusher: Arc<WebSocketMessagePusher>,
    }

    fn create_harness() -> TestHarness {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let directory = Arc::new(InMemoryRoomDirectory::new());
        let pusher = Arc::new(WebSocketMessagePusher::new());
        let router = Arc::new(BroadcastRouter::new(directory.clone(), pusher.clone()));
        let usecase = UpdateRoomNotesUseCase::new(
            registry.clone(),
            directory.clone(),
            router,
            Arc::new(Mutex::new(())),
        );
        TestHarness {
            usecase,
            registry,
            directory,
            pusher,
        }
    }

    async fn join(
        harness: &TestHarness,
        room: &RoomKey,
        name: &str,
    ) -> (SessionId, mpsc::UnboundedReceiver<String>) {
        let session_id = harness.registry.register(Timestamp::new(1000)).await;
        let (tx, rx) = mpsc::unbounded_channel();
        harness.pusher.register_session(session_id.clone(), tx).await;
        harness
            .directory
            .join_room(
                room.clone(),
                Member::new(
                    session_id.clone(),
                    DisplayName::new(name.to_string()).unwrap(),
                    Timestamp::new(1000),
                ),
            )
            .await;
        harness.registry.set_room(&session_id, room.clone()).await;
        (session_id, rx)
    }

    fn room_key(key: &str) -> RoomKey {
        RoomKey::new(key.to_string()).unwrap()
    }

    fn note_text(text: &str) -> NoteText {
        NoteText::new(text.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_update_overwrites_and_suppresses_echo() {
        // テスト項目: ノートが上書きされ、送信元にはエコーされない
        // given (前提条件):
        let harness = create_harness();
        let room = room_key("math-101");
        let (alice, mut alice_rx) = join(&harness, &room, "alice").await;
        let (bob, mut bob_rx) = join(&harness, &room, "bob").await;

        // when (操作): alice がノートを更新
        let targets = harness
            .usecase
            .execute(
                &alice,
                &room,
                note_text("Chapter 1"),
                "notes-payload".to_string(),
            )
            .await
            .unwrap();

        // then (期待する結果): bob のみに届き、ノートが保存されている
        assert_eq!(targets, vec![bob.clone()]);
        assert_eq!(bob_rx.recv().await, Some("notes-payload".to_string()));
        assert!(alice_rx.try_recv().is_err());

        let stored = harness.directory.get_room(&room).await.unwrap();
        assert_eq!(stored.notes.as_str(), "Chapter 1");
    }

    #[tokio::test]
    async fn test_consecutive_updates_last_writer_wins() {
        // テスト項目: 連続する update の到着順で後者が勝つ
        // given (前提条件):
        let harness = create_harness();
        let room = room_key("math-101");
        let (alice, _alice_rx) = join(&harness, &room, "alice").await;
        let (bob, _bob_rx) = join(&harness, &room, "bob").await;

        // when (操作): alice → bob の順に update
        harness
            .usecase
            .execute(&alice, &room, note_text("Chapter 1"), "p1".to_string())
            .await
            .unwrap();
        harness
            .usecase
            .execute(
                &bob,
                &room,
                note_text("Chapter 1 + derivatives"),
                "p2".to_string(),
            )
            .await
            .unwrap();

        // then (期待する結果): 後着の内容が保存されている
        let stored = harness.directory.get_room(&room).await.unwrap();
        assert_eq!(stored.notes.as_str(), "Chapter 1 + derivatives");
    }

    #[tokio::test]
    async fn test_update_allows_clearing_the_buffer() {
        // テスト項目: 空文字列の update でバッファをクリアできる
        // given (前提条件):
        let harness = create_harness();
        let room = room_key("math-101");
        let (alice, _rx) = join(&harness, &room, "alice").await;
        harness
            .usecase
            .execute(&alice, &room, note_text("Chapter 1"), "p1".to_string())
            .await
            .unwrap();

        // when (操作):
        harness
            .usecase
            .execute(&alice, &room, NoteText::empty(), "p2".to_string())
            .await
            .unwrap();

        // then (期待する結果):
        let stored = harness.directory.get_room(&room).await.unwrap();
        assert_eq!(stored.notes.as_str(), "");
    }

    #[tokio::test]
    async fn test_update_from_session_without_room_is_rejected() {
        // テスト項目: ルーム未参加のセッションからの update が落とされる
        // given (前提条件):
        let harness = create_harness();
        let lurker = harness.registry.register(Timestamp::new(1000)).await;

        // when (操作):
        let result = harness
            .usecase
            .execute(
                &lurker,
                &room_key("math-101"),
                note_text("sneaky"),
                "p".to_string(),
            )
            .await;

        // then (期待する結果): ノートも作られない
        assert!(matches!(result, Err(RealtimeEventError::NotInRoom(_))));
        assert!(
            harness
                .directory
                .get_room(&room_key("math-101"))
                .await
                .is_none()
        );
    }
}

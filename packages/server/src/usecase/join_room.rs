//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ルーム参加処理（遅延生成、スナップショット構築、重複参加の冪等性）
//!
//! ### なぜこのテストが必要か
//! - 参加者がルームの現在のノートとメンバー一覧で画面を初期化できることを保証
//! - 「1 セッション = 最大 1 ルーム」の不変条件を守る
//! - 既存メンバーへの user-joined 通知が送信元を除外することを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: 新規ルームへの参加、既存ルームへの参加
//! - 冪等性: 同一ルームへの重複 join
//! - 異常系: 別のルームへの join（ルーム移動は非サポート）

use std::sync::Arc;

use crate::domain::{
    DisplayName, Member, MessagePusher, RoomDirectory, RoomKey, RoomSnapshot, SessionId,
    SessionRegistry, Timestamp,
};
use juku_shared::time::now_epoch_millis;

use super::{broadcast::BroadcastRouter, error::JoinRoomError, DispatchLock};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    /// Session Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Room Directory（ルーム状態の抽象化）
    directory: Arc<dyn RoomDirectory>,
    /// MessagePusher（スナップショットの直接送信用）
    pusher: Arc<dyn MessagePusher>,
    /// Broadcast Router（presence 通知のファンアウト）
    router: Arc<BroadcastRouter>,
    /// リアルタイムイベント処理を直列化するロック
    dispatch: DispatchLock,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        directory: Arc<dyn RoomDirectory>,
        pusher: Arc<dyn MessagePusher>,
        router: Arc<BroadcastRouter>,
        dispatch: DispatchLock,
    ) -> Self {
        Self {
            registry,
            directory,
            pusher,
            router,
            dispatch,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 参加するセッションの ID
    /// * `room_key` - 参加先ルームのキー
    /// * `display_name` - クライアントが名乗る表示名
    ///
    /// # Returns
    ///
    /// * `Ok(RoomSnapshot)` - 参加成功（現在のノートとメンバー一覧）
    /// * `Err(JoinRoomError)` - 参加失敗
    pub async fn execute(
        &self,
        session_id: &SessionId,
        room_key: RoomKey,
        display_name: DisplayName,
    ) -> Result<RoomSnapshot, JoinRoomError> {
        let _guard = self.dispatch.lock().await;

        // 1. セッションの存在と現在のルームを確認
        let record = self
            .registry
            .get(session_id)
            .await
            .ok_or_else(|| JoinRoomError::UnknownSession(session_id.as_str().to_string()))?;

        // 切断せずにルームを移ることはサポートしない。
        // 同一ルームへの再 join は冪等（スナップショットを返し直す）。
        if let Some(current) = record.room
            && current != room_key
        {
            return Err(JoinRoomError::AlreadyInRoom {
                session: session_id.as_str().to_string(),
                current: current.into_string(),
            });
        }

        // 2. Room Directory に参加（ルームは遅延生成される）
        let member = Member::new(
            session_id.clone(),
            display_name.clone(),
            Timestamp::new(now_epoch_millis()),
        );
        let snapshot = self.directory.join_room(room_key.clone(), member).await;

        // 3. Session Registry を更新
        self.registry.set_room(session_id, room_key).await;
        self.registry.set_display_name(session_id, display_name).await;

        Ok(snapshot)
    }

    /// 参加者自身へスナップショット（room-joined）を送る
    pub async fn push_snapshot(&self, session_id: &SessionId, message: &str) {
        if let Err(e) = self.pusher.push_to(session_id, message).await {
            tracing::warn!(
                "Failed to push room snapshot to '{}': {}",
                session_id.as_str(),
                e
            );
        }
    }

    /// 参加を既存メンバーへブロードキャストする（送信元は除外）
    ///
    /// # Returns
    ///
    /// 通知対象となったセッション ID のリスト
    pub async fn broadcast_user_joined(
        &self,
        room: &RoomKey,
        origin: &SessionId,
        message: &str,
    ) -> Vec<SessionId> {
        self.router.notify_presence(room, origin, message).await
    }
}

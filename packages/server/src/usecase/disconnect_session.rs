//! UseCase: セッション切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectSessionUseCase::execute() メソッド
//! - 切断時のメンバーシップ解放、通知対象選定、猶予付きルーム回収
//!
//! ### なぜこのテストが必要か
//! - 切断後のセッションがブロードキャストの対象にならないことを保証
//! - 最後のメンバーの切断で room_now_empty が報告され、猶予後の
//!   回収につながることを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: ルーム参加中のセッションの切断と通知
//! - エッジケース: ルーム未参加のセッションの切断、最後のメンバーの切断
//! - 異常系: 未登録セッションの切断試行

use std::sync::Arc;

use crate::domain::{
    DisplayName, MessagePusher, RoomDirectory, RoomKey, SessionId, SessionRegistry,
};

use super::{broadcast::BroadcastRouter, error::DisconnectError, DispatchLock};

/// 切断処理の結果
#[derive(Debug, Clone)]
pub struct DisconnectOutcome {
    /// 切断したセッションが参加していたルーム
    pub room: Option<RoomKey>,
    /// 切断したセッションの表示名（join 済みの場合のみ）
    pub display_name: Option<DisplayName>,
    /// user-left の通知対象（残りのメンバー）
    pub notify_targets: Vec<SessionId>,
    /// 切断の結果ルームが空になったか（猶予付き回収のトリガー）
    pub room_now_empty: bool,
}

/// セッション切断のユースケース
pub struct DisconnectSessionUseCase {
    /// Session Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Room Directory（ルーム状態の抽象化）
    directory: Arc<dyn RoomDirectory>,
    /// MessagePusher（チャンネル解除）
    pusher: Arc<dyn MessagePusher>,
    /// Broadcast Router（user-left のファンアウト）
    router: Arc<BroadcastRouter>,
    /// リアルタイムイベント処理を直列化するロック
    dispatch: DispatchLock,
}

impl DisconnectSessionUseCase {
    /// 新しい DisconnectSessionUseCase を作成
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

    /// セッション切断を実行
    ///
    /// # Arguments
    ///
    /// * `session_id` - 切断するセッションの ID
    ///
    /// # Returns
    ///
    /// * `Ok(DisconnectOutcome)` - 切断成功（通知対象と回収トリガー）
    /// * `Err(DisconnectError)` - 未登録セッション
    pub async fn execute(
        &self,
        session_id: &SessionId,
    ) -> Result<DisconnectOutcome, DisconnectError> {
        let _guard = self.dispatch.lock().await;

        // 1. セッションのレコードを取得
        let record = self
            .registry
            .get(session_id)
            .await
            .ok_or_else(|| DisconnectError::UnknownSession(session_id.as_str().to_string()))?;

        // 2. 参加中のルームがあれば離脱し、通知対象を確定
        let mut outcome = DisconnectOutcome {
            room: record.room.clone(),
            display_name: record.display_name.clone(),
            notify_targets: Vec::new(),
            room_now_empty: false,
        };

        if let Some(room) = &record.room {
            let leave = self.directory.leave_room(room, session_id).await;
            outcome.room_now_empty = leave.now_empty;
            // 離脱後の members は残りのメンバーそのもの
            outcome.notify_targets = self.directory.members(room).await;
        }

        // 3. Registry と MessagePusher からセッションを解放
        self.registry.unregister(session_id).await;
        self.pusher.unregister_session(session_id).await;

        Ok(outcome)
    }

    /// 残りのメンバーへ user-left をブロードキャストする
    pub async fn broadcast_user_left(
        &self,
        room: &RoomKey,
        origin: &SessionId,
        message: &str,
    ) -> Vec<SessionId> {
        self.router.notify_presence(room, origin, message).await
    }

    /// 空のままのルームを回収する（猶予期間の後に UI 層が呼ぶ）
    ///
    /// # Returns
    ///
    /// 回収した場合 `true`（猶予中にメンバーが戻っていれば `false`）
    pub async fn evict_room_if_empty(&self, room: &RoomKey) -> bool {
        let _guard = self.dispatch.lock().await;
        self.directory.evict_if_empty(room).await
    }
}

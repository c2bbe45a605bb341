//! UseCase: チャットメッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendChatMessageUseCase::execute() メソッド
//! - チャットのファンアウト（送信元を含む全メンバーへの配送）
//!
//! ### なぜこのテストが必要か
//! - チャットは notes-update と異なり送信元にもエコーされる
//!   （ソース準拠の非対称ポリシー）。この向きを明示的に固定する
//! - ルーム未参加のセッションからのイベントを落とすことを保証
//!
//! ### どのような状況を想定しているか
//! - 正常系: ルーム全員への配送（送信元を含む）
//! - エッジケース: 送信者のみが参加している場合
//! - 異常系: ルーム未参加のセッションからの送信

use std::sync::Arc;

use crate::domain::{RoomKey, SessionId, SessionRegistry};

use super::{broadcast::BroadcastRouter, error::RealtimeEventError, DispatchLock};

/// チャットメッセージ送信のユースケース
pub struct SendChatMessageUseCase {
    /// Session Registry（セッション管理の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// Broadcast Router（ファンアウト）
    router: Arc<BroadcastRouter>,
    /// リアルタイムイベント処理を直列化するロック
    dispatch: DispatchLock,
}

impl SendChatMessageUseCase {
    /// 新しい SendChatMessageUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        router: Arc<BroadcastRouter>,
        dispatch: DispatchLock,
    ) -> Self {
        Self {
            registry,
            router,
            dispatch,
        }
    }

    /// チャットメッセージ送信を実行
    ///
    /// 配送先はペイロードで指定されたルーム（ソース準拠）。ただし
    /// セッションがどのルームにも参加していない場合はイベントを落とす。
    ///
    /// # Arguments
    ///
    /// * `session_id` - 送信元セッションの ID
    /// * `room` - ペイロードで指定されたルーム
    /// * `json_message` - 送信する JSON メッセージ（DTO 層で生成されたもの）
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<SessionId>)` - 配送対象（送信元を含む）
    /// * `Err(RealtimeEventError)` - 送信失敗
    pub async fn execute(
        &self,
        session_id: &SessionId,
        room: &RoomKey,
        json_message: String,
    ) -> Result<Vec<SessionId>, RealtimeEventError> {
        let _guard = self.dispatch.lock().await;

        // 1. ルーム参加済みのセッションであることを確認
        if self.registry.current_room(session_id).await.is_none() {
            return Err(RealtimeEventError::NotInRoom(
                session_id.as_str().to_string(),
            ));
        }

        // 2. ルーム全員へファンアウト（チャットは送信元にもエコーする）
        let targets = self
            .router
            .broadcast(room, session_id, &json_message, true)
            .await;

        Ok(targets)
    }
}

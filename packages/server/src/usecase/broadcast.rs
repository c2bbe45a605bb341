//! Broadcast Router
//!
//! ## 責務
//!
//! - Room Directory でメンバーシップを解決し、各メンバーのチャンネルへ
//!   シリアライズ済みイベントを送る
//! - echo suppression（`include_origin` が false のとき送信元を除外）
//!
//! ## 配送保証
//!
//! ベストエフォート。チャンネルが失われたメンバーはスキップされ、
//! 残りへの配送は継続する。送信元にエラーは伝搬しない。
//! ひとつのイベントの全メンバーへのエンキューは一度の走査で行われ、
//! イベント処理自体が dispatch lock で直列化されるため、同一ルームの
//! メンバーはイベントを提出順に観測する。

use std::sync::Arc;

use crate::domain::{MessagePusher, RoomDirectory, RoomKey, SessionId};

/// Broadcast Router
pub struct BroadcastRouter {
    /// Room Directory（メンバーシップ解決）
    directory: Arc<dyn RoomDirectory>,
    /// MessagePusher（メッセージ送信の抽象化）
    pusher: Arc<dyn MessagePusher>,
}

impl BroadcastRouter {
    /// 新しい BroadcastRouter を作成
    pub fn new(directory: Arc<dyn RoomDirectory>, pusher: Arc<dyn MessagePusher>) -> Self {
        Self { directory, pusher }
    }

    /// ルームのメンバーへイベントをファンアウトする
    ///
    /// # Arguments
    ///
    /// * `room` - 対象ルーム
    /// * `origin` - イベントの送信元セッション
    /// * `message` - シリアライズ済みイベント（JSON）
    /// * `include_origin` - 送信元自身にも配送するか
    ///
    /// # Returns
    ///
    /// 実際に配送対象となったセッション ID のリスト
    pub async fn broadcast(
        &self,
        room: &RoomKey,
        origin: &SessionId,
        message: &str,
        include_origin: bool,
    ) -> Vec<SessionId> {
        let mut targets = self.directory.members(room).await;
        if !include_origin {
            targets.retain(|id| id != origin);
        }
        self.pusher.broadcast(targets.clone(), message).await;
        targets
    }

    /// メンバーシップ変化（joined / left）の通知
    ///
    /// 送信元は常に除外される（参加者に自分自身の参加を知らせる必要はない）。
    pub async fn notify_presence(
        &self,
        room: &RoomKey,
        origin: &SessionId,
        message: &str,
    ) -> Vec<SessionId> {
        self.broadcast(room, origin, message, false).await
    }
}

//! Session Registry trait 定義
//!
//! 生きている接続と、その表示名・参加中ルームの対応を管理するインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;

use super::{DisplayName, RoomKey, SessionId, SessionRecord, Timestamp};

/// Session Registry trait
///
/// トランスポート層の接続イベントごとに呼ばれる。登録・解除以外は
/// ネットワークイベントを発生させない（副作用は内部状態のみ）。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// 接続時に呼ばれ、新しいセッション ID を採番して登録する（失敗しない）
    async fn register(&self, connected_at: Timestamp) -> SessionId;

    /// セッションの参加中ルームを更新する（冪等）
    async fn set_room(&self, session_id: &SessionId, room: RoomKey);

    /// セッションの表示名を更新する
    async fn set_display_name(&self, session_id: &SessionId, display_name: DisplayName);

    /// セッションのレコードを取得する
    async fn get(&self, session_id: &SessionId) -> Option<SessionRecord>;

    /// セッションが参加中のルームを取得する
    async fn current_room(&self, session_id: &SessionId) -> Option<RoomKey>;

    /// 切断時に呼ばれ、セッションのレコードを解放する
    ///
    /// 呼び出し側は Room Directory からの離脱処理も併せて行うこと。
    async fn unregister(&self, session_id: &SessionId);

    /// 登録中のセッション数を取得する
    async fn count(&self) -> usize;
}

//! Room Directory trait 定義
//!
//! ルームキーからルーム状態へのマッピングを所有し、共有ノートと
//! メンバーシップの不変条件を守るインターフェース。

use async_trait::async_trait;

use super::{Member, NoteText, Room, RoomKey, RoomSnapshot, SessionId};

/// `leave_room` の結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaveOutcome {
    /// メンバーが実際に削除されたか（不参加だった場合 false）
    pub removed: bool,
    /// 削除の結果ルームが空になったか
    pub now_empty: bool,
}

/// Room Directory trait
///
/// ルームは最初の参加で遅延生成される。空になっても即座には削除されず、
/// 猶予期間の後に `evict_if_empty` で回収される（UI 層がスケジュールする）。
#[async_trait]
pub trait RoomDirectory: Send + Sync {
    /// ルームに参加する
    ///
    /// ルームが存在しなければ空のメンバー集合・空のノートで作成する。
    /// 同一セッションの重複参加は冪等（メンバーは重複しない）。
    ///
    /// # Returns
    ///
    /// 参加直後のスナップショット（現在のノートと、参加者自身を含む
    /// メンバー一覧）
    async fn join_room(&self, key: RoomKey, member: Member) -> RoomSnapshot;

    /// ルームから離脱する（不参加なら no-op）
    ///
    /// ルーム自体はここでは削除しない。
    async fn leave_room(&self, key: &RoomKey, session_id: &SessionId) -> LeaveOutcome;

    /// ルームの共有ノートを無条件に全文上書きする（last-writer-wins）
    ///
    /// 未知のルームはこの操作で暗黙に作成される（参加時と同じ遅延生成
    /// ポリシー）。
    async fn update_note(&self, key: &RoomKey, notes: NoteText);

    /// ルームのメンバーのセッション ID を取得する
    ///
    /// 未知のルームでは失敗せず空集合を返す。
    async fn members(&self, key: &RoomKey) -> Vec<SessionId>;

    /// 空のままのルームを削除する
    ///
    /// # Returns
    ///
    /// 削除した場合 `true`。メンバーが戻っていた場合や未知のルームの
    /// 場合は `false`。
    async fn evict_if_empty(&self, key: &RoomKey) -> bool;

    /// 全ルームを取得する（観測用エンドポイント向け）
    async fn list_rooms(&self) -> Vec<Room>;

    /// ルームを取得する
    async fn get_room(&self, key: &RoomKey) -> Option<Room>;
}

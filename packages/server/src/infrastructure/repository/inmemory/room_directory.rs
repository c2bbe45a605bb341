//! InMemory Room Directory 実装
//!
//! ドメイン層が定義する RoomDirectory trait の具体的な実装。
//! HashMap をインメモリストアとして使用します。
//!
//! ## 設計ノート
//!
//! ルーム全体をひとつの Mutex で保護しています。リアルタイム系の
//! UseCase はさらに dispatch lock で直列化されるため、ここでの排他は
//! メンバー一覧取得などの観測系との整合のためのものです。

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    LeaveOutcome, Member, NoteText, Room, RoomDirectory, RoomKey, RoomSnapshot, SessionId,
};
use juku_shared::time::now_epoch_millis;

/// インメモリ Room Directory 実装
#[derive(Default)]
pub struct InMemoryRoomDirectory {
    rooms: Mutex<HashMap<RoomKey, Room>>,
}

impl InMemoryRoomDirectory {
    /// 新しい InMemoryRoomDirectory を作成
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoomDirectory for InMemoryRoomDirectory {
    async fn join_room(&self, key: RoomKey, member: Member) -> RoomSnapshot {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(key.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created", key.as_str());
            Room::new(
                key.clone(),
                crate::domain::Timestamp::new(now_epoch_millis()),
            )
        });

        room.add_member(member);

        RoomSnapshot {
            key,
            notes: room.notes.clone(),
            members: room.members.clone(),
        }
    }

    async fn leave_room(&self, key: &RoomKey, session_id: &SessionId) -> LeaveOutcome {
        let mut rooms = self.rooms.lock().await;
        match rooms.get_mut(key) {
            Some(room) => {
                let removed = room.remove_member(session_id);
                LeaveOutcome {
                    removed,
                    now_empty: removed && room.is_empty(),
                }
            }
            None => LeaveOutcome {
                removed: false,
                now_empty: false,
            },
        }
    }

    async fn update_note(&self, key: &RoomKey, notes: NoteText) {
        let mut rooms = self.rooms.lock().await;
        let room = rooms.entry(key.clone()).or_insert_with(|| {
            tracing::info!("Room '{}' created by notes update", key.as_str());
            Room::new(
                key.clone(),
                crate::domain::Timestamp::new(now_epoch_millis()),
            )
        });
        room.overwrite_notes(notes);
    }

    async fn members(&self, key: &RoomKey) -> Vec<SessionId> {
        let rooms = self.rooms.lock().await;
        rooms
            .get(key)
            .map(|room| room.member_ids())
            .unwrap_or_default()
    }

    async fn evict_if_empty(&self, key: &RoomKey) -> bool {
        let mut rooms = self.rooms.lock().await;
        match rooms.get(key) {
            Some(room) if room.is_empty() => {
                rooms.remove(key);
                true
            }
            _ => false,
        }
    }

    async fn list_rooms(&self) -> Vec<Room> {
        let rooms = self.rooms.lock().await;
        let mut all: Vec<Room> = rooms.values().cloned().collect();
        // Sort by key for consistent ordering
        all.sort_by(|a, b| a.key.cmp(&b.key));
        all
    }

    async fn get_room(&self, key: &RoomKey) -> Option<Room> {
        let rooms = self.rooms.lock().await;
        rooms.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DisplayName, Timestamp};

    fn create_test_member(name: &str) -> Member {
        Member::new(
            SessionId::generate(),
            DisplayName::new(name.to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn room_key(key: &str) -> RoomKey {
        RoomKey::new(key.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_room_creates_room_lazily() {
        // テスト項目: 最初の参加でルームが作成される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let alice = create_test_member("alice");

        // when (操作):
        let snapshot = directory.join_room(room_key("math-101"), alice.clone()).await;

        // then (期待する結果):
        assert_eq!(snapshot.key.as_str(), "math-101");
        assert_eq!(snapshot.notes.as_str(), "");
        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.members[0].id, alice.id);
    }

    #[tokio::test]
    async fn test_join_room_is_idempotent_per_session() {
        // テスト項目: 同一セッションの重複参加でメンバーが重複しない
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let alice = create_test_member("alice");

        // when (操作):
        directory.join_room(room_key("math-101"), alice.clone()).await;
        let snapshot = directory.join_room(room_key("math-101"), alice.clone()).await;

        // then (期待する結果):
        assert_eq!(snapshot.members.len(), 1);
    }

    #[tokio::test]
    async fn test_membership_replay_equals_net_effect() {
        // テスト項目: join/leave の列の後、メンバー集合が正味の効果と一致する
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let key = room_key("math-101");
        let alice = create_test_member("alice");
        let bob = create_test_member("bob");
        let charlie = create_test_member("charlie");

        // when (操作): join x3, 重複 join, leave x1
        directory.join_room(key.clone(), alice.clone()).await;
        directory.join_room(key.clone(), bob.clone()).await;
        directory.join_room(key.clone(), alice.clone()).await;
        directory.join_room(key.clone(), charlie.clone()).await;
        directory.leave_room(&key, &bob.id).await;

        // then (期待する結果): alice と charlie のみ
        let members = directory.members(&key).await;
        assert_eq!(members.len(), 2);
        assert!(members.contains(&alice.id));
        assert!(members.contains(&charlie.id));
        assert!(!members.contains(&bob.id));
    }

    #[tokio::test]
    async fn test_leave_room_reports_empty_room() {
        // テスト項目: 最後のメンバーの離脱で now_empty が報告される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let key = room_key("math-101");
        let alice = create_test_member("alice");
        directory.join_room(key.clone(), alice.clone()).await;

        // when (操作):
        let outcome = directory.leave_room(&key, &alice.id).await;

        // then (期待する結果):
        assert!(outcome.removed);
        assert!(outcome.now_empty);
        // ルーム自体は残っている
        assert!(directory.get_room(&key).await.is_some());
    }

    #[tokio::test]
    async fn test_leave_room_is_noop_for_absent_member() {
        // テスト項目: 不参加のセッションの離脱が no-op になる
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let key = room_key("math-101");
        directory.join_room(key.clone(), create_test_member("alice")).await;

        // when (操作):
        let outcome = directory.leave_room(&key, &SessionId::generate()).await;

        // then (期待する結果):
        assert!(!outcome.removed);
        assert!(!outcome.now_empty);
        assert_eq!(directory.members(&key).await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_note_last_writer_wins() {
        // テスト項目: 到着順の後者がノートバッファを上書きする
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let key = room_key("math-101");
        directory.join_room(key.clone(), create_test_member("alice")).await;

        // when (操作):
        directory
            .update_note(&key, NoteText::new("Chapter 1".to_string()).unwrap())
            .await;
        directory
            .update_note(
                &key,
                NoteText::new("Chapter 1 + derivatives".to_string()).unwrap(),
            )
            .await;

        // then (期待する結果):
        let room = directory.get_room(&key).await.unwrap();
        assert_eq!(room.notes.as_str(), "Chapter 1 + derivatives");
    }

    #[tokio::test]
    async fn test_update_note_creates_unknown_room() {
        // テスト項目: 未知のルームへの update_note がルームを暗黙に作成する
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let key = room_key("ghost-room");

        // when (操作):
        directory
            .update_note(&key, NoteText::new("orphan notes".to_string()).unwrap())
            .await;

        // then (期待する結果):
        let room = directory.get_room(&key).await.unwrap();
        assert_eq!(room.notes.as_str(), "orphan notes");
        assert!(room.is_empty());
    }

    #[tokio::test]
    async fn test_members_of_unknown_room_is_empty() {
        // テスト項目: 未知のルームのメンバー取得が失敗せず空集合を返す
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();

        // when (操作):
        let members = directory.members(&room_key("nowhere")).await;

        // then (期待する結果):
        assert!(members.is_empty());
    }

    #[tokio::test]
    async fn test_note_survives_member_departure() {
        // テスト項目: メンバーが離脱してもノートバッファが保持される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let key = room_key("math-101");
        let alice = create_test_member("alice");
        directory.join_room(key.clone(), alice.clone()).await;
        directory
            .update_note(&key, NoteText::new("Chapter 1".to_string()).unwrap())
            .await;

        // when (操作): alice が離脱し、bob が新規参加
        directory.leave_room(&key, &alice.id).await;
        let snapshot = directory
            .join_room(key.clone(), create_test_member("bob"))
            .await;

        // then (期待する結果): 最後のノートが見える
        assert_eq!(snapshot.notes.as_str(), "Chapter 1");
    }

    #[tokio::test]
    async fn test_evict_if_empty_removes_only_empty_rooms() {
        // テスト項目: evict_if_empty は空のルームだけを削除する
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        let empty_key = room_key("empty-room");
        let busy_key = room_key("busy-room");
        let alice = create_test_member("alice");
        directory.join_room(empty_key.clone(), alice.clone()).await;
        directory.leave_room(&empty_key, &alice.id).await;
        directory.join_room(busy_key.clone(), create_test_member("bob")).await;

        // when (操作):
        let evicted_empty = directory.evict_if_empty(&empty_key).await;
        let evicted_busy = directory.evict_if_empty(&busy_key).await;
        let evicted_unknown = directory.evict_if_empty(&room_key("nowhere")).await;

        // then (期待する結果):
        assert!(evicted_empty);
        assert!(!evicted_busy);
        assert!(!evicted_unknown);
        assert!(directory.get_room(&empty_key).await.is_none());
        assert!(directory.get_room(&busy_key).await.is_some());
    }

    #[tokio::test]
    async fn test_list_rooms_sorted_by_key() {
        // テスト項目: ルーム一覧がキー順で返される
        // given (前提条件):
        let directory = InMemoryRoomDirectory::new();
        directory.join_room(room_key("zeta"), create_test_member("a")).await;
        directory.join_room(room_key("alpha"), create_test_member("b")).await;

        // when (操作):
        let rooms = directory.list_rooms().await;

        // then (期待する結果):
        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].key.as_str(), "alpha");
        assert_eq!(rooms[1].key.as_str(), "zeta");
    }
}

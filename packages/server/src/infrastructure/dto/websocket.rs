//! WebSocket message DTOs.
//!
//! Wire events are closed enums tagged on a `type` field; the shape is
//! validated at the boundary by serde before anything is dispatched.
//! Malformed frames fail to parse and are dropped by the gateway.

use serde::{Deserialize, Serialize};

/// Events a client may send to the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    /// Join a study room (the client applies the "default-room" default)
    JoinRoom { room: String, user: String },

    /// Send a chat message to a room
    ChatMessage {
        room: String,
        message: String,
        user: String,
    },

    /// Replace the room's shared notes buffer (full text, not a diff)
    NotesUpdate { room: String, notes: String },
}

/// Events the server may send to a client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    /// Snapshot sent to the joiner so it can hydrate its view
    RoomJoined {
        room: String,
        notes: String,
        members: Vec<MemberInfo>,
    },

    /// Sent to existing members when someone joins
    UserJoined { user: String, id: String },

    /// Chat fan-out; `ts` is the server-assigned epoch-millisecond timestamp
    ChatMessage {
        message: String,
        user: String,
        ts: i64,
    },

    /// Notes buffer replacement, sent to everyone but the writer
    NotesUpdate { notes: String },

    /// Sent to remaining members when someone disconnects
    UserLeft { user: String, id: String },
}

/// Room member as seen in a `room-joined` snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberInfo {
    pub user: String,
    pub id: String,
    pub joined_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_join_room_deserializes() {
        // テスト項目: join-room イベントが型付きでパースされる
        // given (前提条件):
        let json = r#"{"type":"join-room","room":"math-101","user":"alice"}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::JoinRoom {
                room: "math-101".to_string(),
                user: "alice".to_string(),
            }
        );
    }

    #[test]
    fn test_client_event_unknown_type_is_rejected() {
        // テスト項目: 未知の type を持つイベントがパースエラーになる
        // given (前提条件):
        let json = r#"{"type":"leave-room","room":"math-101"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_client_event_missing_field_is_rejected() {
        // テスト項目: 必須フィールドが欠けたイベントがパースエラーになる
        // given (前提条件): user が無い join-room
        let json = r#"{"type":"join-room","room":"math-101"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_server_event_chat_message_serializes_with_tag() {
        // テスト項目: chat-message イベントの JSON に type タグが含まれる
        // given (前提条件):
        let event = ServerEvent::ChatMessage {
            message: "hello".to_string(),
            user: "alice".to_string(),
            ts: 1700000000000,
        };

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "chat-message");
        assert_eq!(json["message"], "hello");
        assert_eq!(json["ts"], 1700000000000i64);
    }

    #[test]
    fn test_server_event_room_joined_round_trip() {
        // テスト項目: room-joined イベントのシリアライズとパースが往復する
        // given (前提条件):
        let event = ServerEvent::RoomJoined {
            room: "math-101".to_string(),
            notes: "Chapter 1".to_string(),
            members: vec![MemberInfo {
                user: "alice".to_string(),
                id: "sid-1".to_string(),
                joined_at: 1000,
            }],
        };

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();
        let parsed: ServerEvent = serde_json::from_str(&json).unwrap();

        // then (期待する結果):
        assert_eq!(parsed, event);
    }

    #[test]
    fn test_notes_update_kebab_case_tag() {
        // テスト項目: NotesUpdate バリアントのタグが "notes-update" になる
        // given (前提条件):
        let event = ClientEvent::NotesUpdate {
            room: "math-101".to_string(),
            notes: "Chapter 1".to_string(),
        };

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "notes-update");
    }
}

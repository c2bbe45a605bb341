//! ドメインエンティティ定義

use super::value_object::{
    DisplayName, Email, NoteContent, NoteId, NoteText, NoteTitle, RoomKey, SessionId, Tag,
    Timestamp, UserId, Username,
};

/// ルームに参加しているメンバー
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: SessionId,
    pub display_name: DisplayName,
    pub joined_at: Timestamp,
}

impl Member {
    pub fn new(id: SessionId, display_name: DisplayName, joined_at: Timestamp) -> Self {
        Self {
            id,
            display_name,
            joined_at,
        }
    }
}

/// スタディルーム
///
/// メンバー集合とひとつの共有ノートバッファを持つ。ノートは
/// last-writer-wins（到着順で全文上書き、マージなし）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub key: RoomKey,
    pub members: Vec<Member>,
    pub notes: NoteText,
    pub created_at: Timestamp,
}

impl Room {
    /// 空のルームを作成（メンバーなし、ノートは空）
    pub fn new(key: RoomKey, created_at: Timestamp) -> Self {
        Self {
            key,
            members: Vec::new(),
            notes: NoteText::empty(),
            created_at,
        }
    }

    /// メンバーを追加する（同一セッションの重複参加は冪等）
    ///
    /// # Returns
    ///
    /// 新規に追加された場合 `true`、既に参加済みの場合 `false`
    pub fn add_member(&mut self, member: Member) -> bool {
        if self.has_member(&member.id) {
            return false;
        }
        self.members.push(member);
        true
    }

    /// メンバーを削除する（存在しない場合は no-op）
    ///
    /// # Returns
    ///
    /// 削除された場合 `true`
    pub fn remove_member(&mut self, session_id: &SessionId) -> bool {
        let before = self.members.len();
        self.members.retain(|m| &m.id != session_id);
        self.members.len() != before
    }

    pub fn has_member(&self, session_id: &SessionId) -> bool {
        self.members.iter().any(|m| &m.id == session_id)
    }

    /// ノートバッファを全文上書きする（last-writer-wins）
    pub fn overwrite_notes(&mut self, notes: NoteText) {
        self.notes = notes;
    }

    pub fn member_ids(&self) -> Vec<SessionId> {
        self.members.iter().map(|m| m.id.clone()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// ルーム参加時にクライアントへ返すスナップショット
///
/// 参加直後のクライアントが画面を初期化できるよう、現在のノートと
/// メンバー一覧（参加者自身を含む）を返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSnapshot {
    pub key: RoomKey,
    pub notes: NoteText,
    pub members: Vec<Member>,
}

/// 接続中のセッションのレコード
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: SessionId,
    pub display_name: Option<DisplayName>,
    pub room: Option<RoomKey>,
    pub connected_at: Timestamp,
}

impl SessionRecord {
    pub fn new(id: SessionId, connected_at: Timestamp) -> Self {
        Self {
            id,
            display_name: None,
            room: None,
            connected_at,
        }
    }
}

/// アカウント
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub email: Email,
    pub password_hash: String,
    pub display_name: DisplayName,
    pub created_at: Timestamp,
}

impl User {
    pub fn new(
        username: Username,
        email: Email,
        password_hash: String,
        display_name: DisplayName,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id: UserId::generate(),
            username,
            email,
            password_hash,
            display_name,
            created_at,
        }
    }
}

/// ノートに付与される AI 要約
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiSummary {
    pub content: String,
    pub provider: String,
    pub generated_at: Timestamp,
}

/// ノートの本文から計算されるメタデータ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteMetadata {
    pub word_count: usize,
    /// 読了時間の見積もり（分、200 wpm、最低 1 分）
    pub reading_time_minutes: usize,
}

impl NoteMetadata {
    pub fn compute(content: &NoteContent) -> Self {
        let word_count = content
            .as_str()
            .split_whitespace()
            .filter(|w| !w.is_empty())
            .count();
        let reading_time_minutes = std::cmp::max(1, word_count.div_ceil(200));
        Self {
            word_count,
            reading_time_minutes,
        }
    }
}

/// 永続化される学習ノート
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: NoteId,
    pub title: NoteTitle,
    pub content: NoteContent,
    pub author: UserId,
    pub tags: Vec<Tag>,
    pub is_public: bool,
    pub study_room: RoomKey,
    pub ai_summary: Option<AiSummary>,
    pub metadata: NoteMetadata,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    pub fn new(
        title: NoteTitle,
        content: NoteContent,
        author: UserId,
        tags: Vec<Tag>,
        is_public: bool,
        study_room: RoomKey,
        created_at: Timestamp,
    ) -> Self {
        let metadata = NoteMetadata::compute(&content);
        Self {
            id: NoteId::generate(),
            title,
            content,
            author,
            tags,
            is_public,
            study_room,
            ai_summary: None,
            metadata,
            created_at,
            updated_at: created_at,
        }
    }

    /// 本文を差し替え、メタデータを再計算する
    pub fn replace_content(&mut self, content: NoteContent, updated_at: Timestamp) {
        self.metadata = NoteMetadata::compute(&content);
        self.content = content;
        self.updated_at = updated_at;
    }
}

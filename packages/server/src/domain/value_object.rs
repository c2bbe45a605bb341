//! Value Object 定義
//!
//! ドメイン層の値オブジェクト。不正な値を持つインスタンスが存在しないよう、
//! コンストラクタで検証します。

use uuid::Uuid;

use super::error::ValidationError;

/// 未指定時に使われるスタディルームのキー
pub const DEFAULT_ROOM: &str = "default-room";

const MAX_ROOM_KEY_LEN: usize = 64;
const MAX_DISPLAY_NAME_LEN: usize = 50;
const MAX_MESSAGE_LEN: usize = 2_000;
const MAX_NOTE_TEXT_LEN: usize = 10_000;
const MAX_NOTE_TITLE_LEN: usize = 200;
const MAX_TAG_LEN: usize = 30;
const MIN_USERNAME_LEN: usize = 3;
const MAX_USERNAME_LEN: usize = 30;
const MAX_EMAIL_LEN: usize = 254;
const MIN_PASSWORD_LEN: usize = 6;
const MAX_PASSWORD_LEN: usize = 128;

/// 接続を識別するセッション ID（サーバー側で採番）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    /// 新しいセッション ID を採番
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("session id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ユーザー ID（サーバー側で採番）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId(String);

impl UserId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("user id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ノート ID（サーバー側で採番）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NoteId(String);

impl NoteId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("note id"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ルームを識別するキー（クライアント指定の不透明な文字列）
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomKey(String);

impl RoomKey {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("room key"));
        }
        if value.chars().count() > MAX_ROOM_KEY_LEN {
            return Err(ValidationError::TooLong("room key", MAX_ROOM_KEY_LEN));
        }
        Ok(Self(value))
    }

    /// デフォルトルームのキー
    pub fn default_room() -> Self {
        Self(DEFAULT_ROOM.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for RoomKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// クライアントが名乗る表示名（アカウントとは照合しない）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("display name"));
        }
        if value.chars().count() > MAX_DISPLAY_NAME_LEN {
            return Err(ValidationError::TooLong(
                "display name",
                MAX_DISPLAY_NAME_LEN,
            ));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for DisplayName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// チャットメッセージの本文（空文字列は不可）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageContent(String);

impl MessageContent {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("message"));
        }
        if value.chars().count() > MAX_MESSAGE_LEN {
            return Err(ValidationError::TooLong("message", MAX_MESSAGE_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for MessageContent {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// ルームの共有ノートバッファ
///
/// プロトコルは差分ではなく全文を送るため、空文字列（バッファのクリア）も
/// 有効な値です。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NoteText(String);

impl NoteText {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.chars().count() > MAX_NOTE_TEXT_LEN {
            return Err(ValidationError::TooLong("notes", MAX_NOTE_TEXT_LEN));
        }
        Ok(Self(value))
    }

    /// 空のノートバッファ
    pub fn empty() -> Self {
        Self(String::new())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for NoteText {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix タイムスタンプ（UTC、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// アカウントのユーザー名
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Username(String);

impl Username {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let len = value.chars().count();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("username"));
        }
        if len < MIN_USERNAME_LEN {
            return Err(ValidationError::TooShort("username", MIN_USERNAME_LEN));
        }
        if len > MAX_USERNAME_LEN {
            return Err(ValidationError::TooLong("username", MAX_USERNAME_LEN));
        }
        if !value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ValidationError::Malformed("username"));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// メールアドレス
///
/// ローカル部とドメイン部が非空であることだけを確認する、意図的に緩い検証。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Email(String);

impl Email {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("email"));
        }
        if value.chars().count() > MAX_EMAIL_LEN {
            return Err(ValidationError::TooLong("email", MAX_EMAIL_LEN));
        }
        match value.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(Self(value)),
            _ => Err(ValidationError::Malformed("email")),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 平文パスワード（ハッシュ化前の検証のみ）
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let len = value.chars().count();
        if len < MIN_PASSWORD_LEN {
            return Err(ValidationError::TooShort("password", MIN_PASSWORD_LEN));
        }
        if len > MAX_PASSWORD_LEN {
            return Err(ValidationError::TooLong("password", MAX_PASSWORD_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// パスワードがログに流れないよう Debug は中身を伏せる
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

/// ノートのタイトル
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteTitle(String);

impl NoteTitle {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty("title"));
        }
        if trimmed.chars().count() > MAX_NOTE_TITLE_LEN {
            return Err(ValidationError::TooLong("title", MAX_NOTE_TITLE_LEN));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ノートの本文
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContent(String);

impl NoteContent {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        if value.trim().is_empty() {
            return Err(ValidationError::Empty("content"));
        }
        if value.chars().count() > MAX_NOTE_TEXT_LEN {
            return Err(ValidationError::TooLong("content", MAX_NOTE_TEXT_LEN));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// ノートに付けるタグ
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(String);

impl Tag {
    pub fn new(value: String) -> Result<Self, ValidationError> {
        let trimmed = value.trim().to_string();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty("tag"));
        }
        if trimmed.chars().count() > MAX_TAG_LEN {
            return Err(ValidationError::TooLong("tag", MAX_TAG_LEN));
        }
        Ok(Self(trimmed))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

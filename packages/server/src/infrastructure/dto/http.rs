//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use juku_shared::time::epoch_millis_to_rfc3339;

use crate::domain::{AiSummary, Note, Room, User};

// ========================================
// auth
// ========================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub created_at: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id.into_string(),
            username: user.username.into_string(),
            email: user.email.into_string(),
            display_name: user.display_name.into_string(),
            created_at: epoch_millis_to_rfc3339(user.created_at.value()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

// ========================================
// notes
// ========================================

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub is_public: bool,
    pub study_room: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoteRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub is_public: Option<bool>,
}

/// Query parameters for GET /api/notes
#[derive(Debug, Deserialize)]
pub struct NoteQueryParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
    pub search: Option<String>,
    /// Comma-separated list of tags
    pub tags: Option<String>,
    pub study_room: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AiSummaryDto {
    pub content: String,
    pub provider: String,
    pub generated_at: String,
}

impl From<AiSummary> for AiSummaryDto {
    fn from(summary: AiSummary) -> Self {
        Self {
            content: summary.content,
            provider: summary.provider,
            generated_at: epoch_millis_to_rfc3339(summary.generated_at.value()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NoteDto {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    pub is_public: bool,
    pub study_room: String,
    pub ai_summary: Option<AiSummaryDto>,
    pub word_count: usize,
    pub reading_time_minutes: usize,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Note> for NoteDto {
    fn from(note: Note) -> Self {
        Self {
            id: note.id.into_string(),
            title: note.title.into_string(),
            content: note.content.into_string(),
            author: note.author.into_string(),
            tags: note.tags.into_iter().map(|tag| tag.into_string()).collect(),
            is_public: note.is_public,
            study_room: note.study_room.into_string(),
            ai_summary: note.ai_summary.map(AiSummaryDto::from),
            word_count: note.metadata.word_count,
            reading_time_minutes: note.metadata.reading_time_minutes,
            created_at: epoch_millis_to_rfc3339(note.created_at.value()),
            updated_at: epoch_millis_to_rfc3339(note.updated_at.value()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct NotesPageDto {
    pub notes: Vec<NoteDto>,
    pub total: usize,
    pub total_pages: usize,
    pub current_page: usize,
}

#[derive(Debug, Serialize)]
pub struct NoteResponse {
    pub message: String,
    pub note: NoteDto,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub message: String,
    pub summary: AiSummaryDto,
}

// ========================================
// ai
// ========================================

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    #[serde(default)]
    pub options: GenerationOptionsDto,
}

#[derive(Debug, Default, Deserialize)]
pub struct GenerationOptionsDto {
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub response: String,
    pub provider: String,
    pub success: bool,
}

#[derive(Debug, Serialize)]
pub struct ProviderInfo {
    pub name: String,
    pub enabled: bool,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ProvidersResponse {
    pub current: String,
    pub available: Vec<ProviderInfo>,
}

// ========================================
// rooms (observability)
// ========================================

#[derive(Debug, Serialize)]
pub struct RoomSummaryDto {
    pub key: String,
    pub member_count: usize,
    pub created_at: String,
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            key: room.key.as_str().to_string(),
            member_count: room.members.len(),
            created_at: epoch_millis_to_rfc3339(room.created_at.value()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RoomMemberDto {
    pub id: String,
    pub user: String,
    pub joined_at: String,
}

#[derive(Debug, Serialize)]
pub struct RoomDetailDto {
    pub key: String,
    pub members: Vec<RoomMemberDto>,
    pub notes_len: usize,
    pub created_at: String,
}

impl From<&Room> for RoomDetailDto {
    fn from(room: &Room) -> Self {
        Self {
            key: room.key.as_str().to_string(),
            members: room
                .members
                .iter()
                .map(|member| RoomMemberDto {
                    id: member.id.as_str().to_string(),
                    user: member.display_name.as_str().to_string(),
                    joined_at: epoch_millis_to_rfc3339(member.joined_at.value()),
                })
                .collect(),
            notes_len: room.notes.as_str().len(),
            created_at: epoch_millis_to_rfc3339(room.created_at.value()),
        }
    }
}

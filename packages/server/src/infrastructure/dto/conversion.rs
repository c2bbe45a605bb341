//! Conversion logic between DTOs and domain entities.

use crate::domain::{Member, RoomSnapshot};
use crate::infrastructure::dto::websocket as dto;

// ========================================
// Domain Entity → DTO
// ========================================

impl From<&Member> for dto::MemberInfo {
    fn from(member: &Member) -> Self {
        Self {
            user: member.display_name.as_str().to_string(),
            id: member.id.as_str().to_string(),
            joined_at: member.joined_at.value(),
        }
    }
}

impl From<RoomSnapshot> for dto::ServerEvent {
    fn from(snapshot: RoomSnapshot) -> Self {
        dto::ServerEvent::RoomJoined {
            room: snapshot.key.as_str().to_string(),
            notes: snapshot.notes.as_str().to_string(),
            members: snapshot.members.iter().map(dto::MemberInfo::from).collect(),
        }
    }
}

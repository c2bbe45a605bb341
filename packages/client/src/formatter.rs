//! Message formatting utilities for client display.

use juku_server::infrastructure::dto::websocket::MemberInfo;
use juku_shared::time::epoch_millis_to_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the room-joined snapshot showing the notes buffer and members
    ///
    /// # Arguments
    ///
    /// * `room` - The room that was joined
    /// * `notes` - The room's current shared notes buffer
    /// * `members` - Members of the room (including this client)
    /// * `current_user` - This client's display name (to mark as "me")
    pub fn format_room_joined(
        room: &str,
        notes: &str,
        members: &[MemberInfo],
        current_user: &str,
    ) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str(&format!("Room: {}\n", room));
        output.push_str("Members:\n");

        if members.is_empty() {
            output.push_str("(No members)\n");
        } else {
            for member in members {
                let is_me = member.user == current_user;
                let me_suffix = if is_me { " (me)" } else { "" };
                let timestamp_str = epoch_millis_to_rfc3339(member.joined_at);
                output.push_str(&format!(
                    "{}{} - joined at {}\n",
                    member.user, me_suffix, timestamp_str
                ));
            }
        }

        output.push_str("Shared notes:\n");
        if notes.is_empty() {
            output.push_str("(empty)\n");
        } else {
            output.push_str(&format!("{}\n", notes));
        }
        output.push_str("============================================================\n");
        output
    }

    /// Format a user-joined notification
    pub fn format_user_joined(user: &str) -> String {
        format!("\n+ {} joined the room\n", user)
    }

    /// Format a user-left notification
    pub fn format_user_left(user: &str) -> String {
        format!("\n- {} left the room\n", user)
    }

    /// Format a chat message with its server timestamp
    pub fn format_chat_message(user: &str, message: &str, ts: i64) -> String {
        let timestamp_str = epoch_millis_to_rfc3339(ts);
        format!("\n[{}] {}: {}\n", timestamp_str, user, message)
    }

    /// Format a notes-update (the full replacement buffer)
    pub fn format_notes_update(notes: &str) -> String {
        let mut output = String::new();
        output.push_str("\n--- shared notes updated ---\n");
        if notes.is_empty() {
            output.push_str("(cleared)\n");
        } else {
            output.push_str(&format!("{}\n", notes));
        }
        output.push_str("----------------------------\n");
        output
    }

    /// Format a raw (unrecognized) message
    pub fn format_raw_message(text: &str) -> String {
        format!("\n{}\n", text)
    }
}

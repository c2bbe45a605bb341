//! WebSocket connection handlers (the realtime gateway).
//!
//! Per-connection state machine: `Connected` (registered, no room) →
//! `InRoom` (joined exactly one room) → `Disconnected` (registry entry
//! freed). Malformed or out-of-state inbound events are dropped with a
//! server-side warning and no response frame (fire-and-forget protocol).

use std::sync::Arc;

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{DisplayName, MessageContent, NoteText, RoomKey, SessionId},
    infrastructure::dto::websocket::{ClientEvent, ServerEvent},
    ui::state::AppState,
};
use juku_shared::time::now_epoch_millis;

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    // Create a channel for this session to receive fan-out messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the session before the upgrade completes (no failure mode)
    let (session_id, _connected_at) = state.connect_session_usecase.execute(tx).await;
    tracing::info!("Session '{}' connected", session_id.as_str());

    ws.on_upgrade(move |socket| handle_socket(socket, state, session_id, rx))
}

/// Spawns a task that receives messages from the rx channel and pushes them
/// to the WebSocket sender.
///
/// This handles the outbound flow: events fanned out by the Broadcast Router
/// (via the MessagePusher channel) are written to this session's socket.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session_id: SessionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    // Outbound: fan-out channel -> socket
    let mut send_task = pusher_loop(rx, sender);

    // Inbound: socket -> gateway dispatch
    let state_clone = state.clone();
    let session_clone = session_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    handle_client_event(&state_clone, &session_clone, text.as_str()).await;
                }
                Message::Ping(_) => {
                    // Ping/pong is handled automatically by the WebSocket protocol
                    tracing::debug!("Received ping");
                }
                Message::Close(_) => {
                    tracing::info!("Session '{}' requested close", session_clone.as_str());
                    break;
                }
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    handle_disconnect(&state, &session_id).await;
}

/// Parse and dispatch one inbound frame.
///
/// Shape validation happens here, at the boundary: a frame that is not one
/// of the known tagged events is dropped with a warning and no nak.
async fn handle_client_event(state: &Arc<AppState>, session_id: &SessionId, text: &str) {
    let event = match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => event,
        Err(e) => {
            tracing::warn!(
                "Dropping malformed event from '{}': {}",
                session_id.as_str(),
                e
            );
            return;
        }
    };

    match event {
        ClientEvent::JoinRoom { room, user } => {
            handle_join_room(state, session_id, room, user).await;
        }
        ClientEvent::ChatMessage {
            room,
            message,
            user,
        } => {
            handle_chat_message(state, session_id, room, message, user).await;
        }
        ClientEvent::NotesUpdate { room, notes } => {
            handle_notes_update(state, session_id, room, notes).await;
        }
    }
}

async fn handle_join_room(
    state: &Arc<AppState>,
    session_id: &SessionId,
    room: String,
    user: String,
) {
    // Domain Model への変換（不正な値はイベントごと落とす）
    let (room_key, display_name) =
        match (RoomKey::new(room), DisplayName::new(user)) {
            (Ok(room_key), Ok(display_name)) => (room_key, display_name),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!("Dropping join-room from '{}': {}", session_id.as_str(), e);
                return;
            }
        };

    let snapshot = match state
        .join_room_usecase
        .execute(session_id, room_key.clone(), display_name.clone())
        .await
    {
        Ok(snapshot) => snapshot,
        Err(e) => {
            tracing::warn!("Dropping join-room from '{}': {}", session_id.as_str(), e);
            return;
        }
    };

    // 1. Hydrate the joiner with the current notes and member list
    let snapshot_json = serde_json::to_string(&ServerEvent::from(snapshot)).unwrap();
    state
        .join_room_usecase
        .push_snapshot(session_id, &snapshot_json)
        .await;

    // 2. Tell the existing members (the joiner is excluded)
    let joined_event = ServerEvent::UserJoined {
        user: display_name.as_str().to_string(),
        id: session_id.as_str().to_string(),
    };
    let joined_json = serde_json::to_string(&joined_event).unwrap();
    state
        .join_room_usecase
        .broadcast_user_joined(&room_key, session_id, &joined_json)
        .await;

    tracing::info!(
        "Session '{}' joined room '{}' as '{}'",
        session_id.as_str(),
        room_key.as_str(),
        display_name.as_str()
    );
}

async fn handle_chat_message(
    state: &Arc<AppState>,
    session_id: &SessionId,
    room: String,
    message: String,
    user: String,
) {
    let (room_key, content, display_name) = match (
        RoomKey::new(room),
        MessageContent::new(message),
        DisplayName::new(user),
    ) {
        (Ok(room_key), Ok(content), Ok(display_name)) => (room_key, content, display_name),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            tracing::warn!(
                "Dropping chat-message from '{}': {}",
                session_id.as_str(),
                e
            );
            return;
        }
    };

    // Server-assigned timestamp; the sender's display name is echoed as-is
    let event = ServerEvent::ChatMessage {
        message: content.into_string(),
        user: display_name.into_string(),
        ts: now_epoch_millis(),
    };
    let json = serde_json::to_string(&event).unwrap();

    if let Err(e) = state
        .send_chat_message_usecase
        .execute(session_id, &room_key, json)
        .await
    {
        tracing::warn!(
            "Dropping chat-message from '{}': {}",
            session_id.as_str(),
            e
        );
    }
}

async fn handle_notes_update(
    state: &Arc<AppState>,
    session_id: &SessionId,
    room: String,
    notes: String,
) {
    let (room_key, note_text) = match (RoomKey::new(room), NoteText::new(notes)) {
        (Ok(room_key), Ok(note_text)) => (room_key, note_text),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!(
                "Dropping notes-update from '{}': {}",
                session_id.as_str(),
                e
            );
            return;
        }
    };

    let event = ServerEvent::NotesUpdate {
        notes: note_text.as_str().to_string(),
    };
    let json = serde_json::to_string(&event).unwrap();

    if let Err(e) = state
        .update_room_notes_usecase
        .execute(session_id, &room_key, note_text, json)
        .await
    {
        tracing::warn!(
            "Dropping notes-update from '{}': {}",
            session_id.as_str(),
            e
        );
    }
}

async fn handle_disconnect(state: &Arc<AppState>, session_id: &SessionId) {
    let outcome = match state.disconnect_session_usecase.execute(session_id).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::warn!("Failed to disconnect '{}': {}", session_id.as_str(), e);
            return;
        }
    };
    tracing::info!("Session '{}' disconnected", session_id.as_str());

    let Some(room) = outcome.room else {
        return;
    };

    // Tell the remaining members
    if let Some(display_name) = &outcome.display_name {
        let left_event = ServerEvent::UserLeft {
            user: display_name.as_str().to_string(),
            id: session_id.as_str().to_string(),
        };
        let left_json = serde_json::to_string(&left_event).unwrap();
        state
            .disconnect_session_usecase
            .broadcast_user_left(&room, session_id, &left_json)
            .await;
    }

    // The room that just emptied is reclaimed after a grace period, unless
    // someone rejoins in the meantime
    if outcome.room_now_empty {
        let usecase = state.disconnect_session_usecase.clone();
        let grace = state.room_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            if usecase.evict_room_if_empty(&room).await {
                tracing::info!(
                    "Room '{}' evicted after {}s grace period",
                    room.as_str(),
                    grace.as_secs()
                );
            }
        });
    }
}

//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};

use juku_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};

use super::{error::ClientError, formatter::MessageFormatter, ui::redisplay_prompt};

/// Prefix that turns an input line into a notes-update instead of a chat
const NOTES_COMMAND: &str = "/notes ";

/// Run the WebSocket client session
pub async fn run_client_session(
    url: &str,
    room: &str,
    user: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let (ws_stream, _response) = connect_async(url)
        .await
        .map_err(|e| Box::new(ClientError::ConnectionError(e.to_string())))?;

    tracing::info!("Connected to study-room server!");
    println!(
        "\nYou are '{}' in room '{}'. Type to chat, '/notes <text>' to replace the shared notes. Press Ctrl+C to exit.\n",
        user, room
    );

    let (mut write, mut read) = ws_stream.split();

    // Join the room first; everything else is driven by user input
    let join = ClientEvent::JoinRoom {
        room: room.to_string(),
        user: user.to_string(),
    };
    write
        .send(Message::Text(serde_json::to_string(&join)?.into()))
        .await
        .map_err(|e| Box::new(ClientError::ConnectionError(e.to_string())))?;

    // Clone identifiers for the read task
    let user_for_read = user.to_string();

    // Spawn a task to handle incoming messages
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    let formatted = match serde_json::from_str::<ServerEvent>(&text) {
                        Ok(ServerEvent::RoomJoined {
                            room,
                            notes,
                            members,
                        }) => MessageFormatter::format_room_joined(
                            &room,
                            &notes,
                            &members,
                            &user_for_read,
                        ),
                        Ok(ServerEvent::UserJoined { user, .. }) => {
                            MessageFormatter::format_user_joined(&user)
                        }
                        Ok(ServerEvent::UserLeft { user, .. }) => {
                            MessageFormatter::format_user_left(&user)
                        }
                        Ok(ServerEvent::ChatMessage { message, user, ts }) => {
                            MessageFormatter::format_chat_message(&user, &message, ts)
                        }
                        Ok(ServerEvent::NotesUpdate { notes }) => {
                            MessageFormatter::format_notes_update(&notes)
                        }
                        // Display unrecognized frames as raw text
                        Err(_) => MessageFormatter::format_raw_message(&text),
                    };
                    print!("{}", formatted);
                    redisplay_prompt(&user_for_read);
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let user_for_prompt = user.to_string();
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        let prompt = format!("{}> ", user_for_prompt);

        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim();
                    if !line.is_empty() {
                        rl.add_history_entry(line).ok();
                        if input_tx.send(line.to_string()).is_err() {
                            // Channel closed, exit thread
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    // Spawn a task to turn input lines into wire events
    let room_for_write = room.to_string();
    let user_for_write = user.to_string();
    let mut write_task = tokio::spawn(async move {
        let mut write_error = false;

        while let Some(line) = input_rx.recv().await {
            let event = match line.strip_prefix(NOTES_COMMAND) {
                Some(notes) => ClientEvent::NotesUpdate {
                    room: room_for_write.clone(),
                    notes: notes.to_string(),
                },
                None => ClientEvent::ChatMessage {
                    room: room_for_write.clone(),
                    message: line,
                    user: user_for_write.clone(),
                },
            };

            let json = match serde_json::to_string(&event) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to serialize event: {}", e);
                    continue;
                }
            };

            if let Err(e) = write.send(Message::Text(json.into())).await {
                tracing::warn!("Failed to send event: {}", e);
                write_error = true;
                break;
            }
        }

        write_error
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            let connection_error = read_result.unwrap_or(false);
            if connection_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            let write_error = write_result.unwrap_or(false);
            if write_error {
                return Err(Box::new(ClientError::ConnectionError(
                    "Connection lost".to_string(),
                )));
            }
        }
    }

    Ok(())
}

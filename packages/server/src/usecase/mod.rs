//! UseCase layer: one operation per module, dependencies injected as
//! `Arc<dyn …>` trait objects so every usecase is unit-testable with
//! in-memory implementations or mocks.

use std::sync::Arc;

use tokio::sync::Mutex;

pub mod broadcast;
pub mod connect_session;
pub mod create_note;
pub mod delete_note;
pub mod disconnect_session;
pub mod error;
pub mod generate_ai_response;
pub mod get_note;
pub mod get_room_detail;
pub mod get_rooms;
pub mod get_user_profile;
pub mod join_room;
pub mod list_notes;
pub mod login_user;
pub mod send_chat_message;
pub mod signup_user;
pub mod summarize_note;
pub mod update_note;
pub mod update_room_notes;
pub mod update_user_profile;

/// リアルタイムイベント処理を直列化するロック
///
/// 全てのリアルタイム系 UseCase がこのロックを共有し、ひとつの
/// イベントの処理（ディレクトリ/レジストリの更新と全ブロードキャスト
/// のエンキュー）を完了させてから次のイベントを処理する。チャンネル
/// 送信は非ブロッキングで、クリティカルセクション内に待ちは無い。
/// 「2 つの notes-update は到着順に適用・配送される」という
/// last-writer-wins の一貫性モデルはこの直列化が与える。
pub type DispatchLock = Arc<Mutex<()>>;

pub use broadcast::BroadcastRouter;
pub use connect_session::ConnectSessionUseCase;
pub use create_note::{CreateNoteInput, CreateNoteUseCase};
pub use delete_note::DeleteNoteUseCase;
pub use disconnect_session::{DisconnectOutcome, DisconnectSessionUseCase};
pub use error::{
    DisconnectError, GenerateError, GetRoomDetailError, JoinRoomError, LoginError, NoteError,
    ProfileError, RealtimeEventError, SignupError,
};
pub use generate_ai_response::{GenerateAiResponseUseCase, GeneratedText};
pub use get_note::GetNoteUseCase;
pub use get_room_detail::GetRoomDetailUseCase;
pub use get_rooms::GetRoomsUseCase;
pub use get_user_profile::GetUserProfileUseCase;
pub use join_room::JoinRoomUseCase;
pub use list_notes::{ListNotesInput, ListNotesUseCase};
pub use login_user::LoginUserUseCase;
pub use send_chat_message::SendChatMessageUseCase;
pub use signup_user::{SignupInput, SignupUserUseCase};
pub use summarize_note::SummarizeNoteUseCase;
pub use update_note::{UpdateNoteInput, UpdateNoteUseCase};
pub use update_room_notes::UpdateRoomNotesUseCase;
pub use update_user_profile::UpdateUserProfileUseCase;

//! Server state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{TokenService, UserRepository};
use crate::usecase::{
    ConnectSessionUseCase, CreateNoteUseCase, DeleteNoteUseCase, DisconnectSessionUseCase,
    GenerateAiResponseUseCase, GetNoteUseCase, GetRoomDetailUseCase, GetRoomsUseCase,
    GetUserProfileUseCase, JoinRoomUseCase, ListNotesUseCase, LoginUserUseCase,
    SendChatMessageUseCase, SignupUserUseCase, SummarizeNoteUseCase, UpdateNoteUseCase,
    UpdateRoomNotesUseCase, UpdateUserProfileUseCase,
};

/// Availability info for the AI providers endpoint
#[derive(Debug, Clone)]
pub struct AiProviderStatus {
    /// The configured primary provider name
    pub current: String,
    /// Whether an OpenAI API key is configured
    pub openai_configured: bool,
}

/// Shared application state
pub struct AppState {
    // realtime
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    pub send_chat_message_usecase: Arc<SendChatMessageUseCase>,
    pub update_room_notes_usecase: Arc<UpdateRoomNotesUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    /// 空になったルームを回収するまでの猶予
    pub room_grace: Duration,

    // rooms (observability)
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    pub get_room_detail_usecase: Arc<GetRoomDetailUseCase>,

    // accounts
    pub signup_user_usecase: Arc<SignupUserUseCase>,
    pub login_user_usecase: Arc<LoginUserUseCase>,
    pub get_user_profile_usecase: Arc<GetUserProfileUseCase>,
    pub update_user_profile_usecase: Arc<UpdateUserProfileUseCase>,
    /// AuthUser extractor 用（トークン検証とユーザー解決）
    pub token_service: Arc<dyn TokenService>,
    pub user_repository: Arc<dyn UserRepository>,

    // notes
    pub create_note_usecase: Arc<CreateNoteUseCase>,
    pub list_notes_usecase: Arc<ListNotesUseCase>,
    pub get_note_usecase: Arc<GetNoteUseCase>,
    pub update_note_usecase: Arc<UpdateNoteUseCase>,
    pub delete_note_usecase: Arc<DeleteNoteUseCase>,
    pub summarize_note_usecase: Arc<SummarizeNoteUseCase>,

    // ai
    pub generate_ai_response_usecase: Arc<GenerateAiResponseUseCase>,
    pub ai_provider_status: AiProviderStatus,
}

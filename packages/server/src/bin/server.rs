//! Collaborative study-notes server.
//!
//! Accounts, note CRUD with search, an AI proxy with provider fallback and
//! realtime study rooms over WebSocket.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin juku-server
//! cargo run --bin juku-server -- --host 0.0.0.0 --port 4000
//! ```

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::sync::Mutex;

use juku_server::{
    domain::{AiProvider, TokenService, UserRepository},
    infrastructure::{
        ai::{OllamaProvider, OpenAiProvider},
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryNoteRepository, InMemoryRoomDirectory, InMemorySessionRegistry,
            InMemoryUserRepository,
        },
        token::JwtTokenService,
    },
    ui::{
        Server,
        state::{AiProviderStatus, AppState},
    },
    usecase::{
        BroadcastRouter, ConnectSessionUseCase, CreateNoteUseCase, DeleteNoteUseCase,
        DisconnectSessionUseCase, GenerateAiResponseUseCase, GetNoteUseCase,
        GetRoomDetailUseCase, GetRoomsUseCase, GetUserProfileUseCase, JoinRoomUseCase,
        ListNotesUseCase, LoginUserUseCase, SendChatMessageUseCase, SignupUserUseCase,
        SummarizeNoteUseCase, UpdateNoteUseCase, UpdateRoomNotesUseCase,
        UpdateUserProfileUseCase,
    },
};
use juku_shared::logger::setup_logger;

const DEV_JWT_SECRET: &str = "dev-secret-change-me";

#[derive(Parser, Debug)]
#[command(name = "juku-server")]
#[command(about = "Collaborative study-notes server with realtime study rooms", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Seconds an emptied room is kept before eviction (0 = immediate)
    #[arg(long, default_value = "60")]
    room_grace_secs: u64,

    /// Secret used to sign JWT bearer tokens
    #[arg(long, env = "JUKU_JWT_SECRET", default_value = DEV_JWT_SECRET)]
    jwt_secret: String,

    /// Primary AI provider ("ollama" or "openai")
    #[arg(long, env = "JUKU_AI_PROVIDER", default_value = "ollama")]
    ai_provider: String,

    /// Base URL of the Ollama instance
    #[arg(long, env = "JUKU_OLLAMA_URL", default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Default model used for Ollama generation
    #[arg(long, env = "JUKU_AI_MODEL", default_value = "phi")]
    ai_model: String,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "JUKU_OPENAI_URL", default_value = "https://api.openai.com")]
    openai_url: String,

    /// OpenAI API key (the provider is disabled without it)
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "debug");

    let args = Args::parse();

    if args.jwt_secret == DEV_JWT_SECRET {
        tracing::warn!("Using the built-in JWT secret; set JUKU_JWT_SECRET in production");
    }

    // Initialize dependencies in order:
    // 1. Stores (registry, directory, repositories) and the pusher
    // 2. Broadcast router and dispatch lock
    // 3. Collaborator services (tokens, AI providers)
    // 4. UseCases
    // 5. AppState and Server

    // 1. Stores and pusher
    let registry = Arc::new(InMemorySessionRegistry::new());
    let directory = Arc::new(InMemoryRoomDirectory::new());
    let pusher = Arc::new(WebSocketMessagePusher::new());
    let user_repository: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
    let note_repository = Arc::new(InMemoryNoteRepository::new());

    // 2. Broadcast router and the lock serializing realtime event handling
    let router = Arc::new(BroadcastRouter::new(directory.clone(), pusher.clone()));
    let dispatch = Arc::new(Mutex::new(()));

    // 3. Collaborator services
    let token_service: Arc<dyn TokenService> =
        Arc::new(JwtTokenService::with_default_validity(&args.jwt_secret));

    let ollama: Arc<dyn AiProvider> = Arc::new(OllamaProvider::new(
        args.ollama_url.clone(),
        args.ai_model.clone(),
    ));
    let openai = OpenAiProvider::new(args.openai_url.clone(), args.openai_api_key.clone());
    let openai_configured = openai.is_configured();

    let provider_name = args.ai_provider.to_lowercase();
    let (primary, fallback): (Arc<dyn AiProvider>, Option<Arc<dyn AiProvider>>) =
        match provider_name.as_str() {
            "openai" => (Arc::new(openai), Some(ollama.clone())),
            "ollama" => (ollama.clone(), None),
            other => {
                tracing::warn!("Unknown AI provider '{}', falling back to ollama", other);
                (ollama.clone(), None)
            }
        };
    let ai_provider_status = AiProviderStatus {
        current: primary.name().to_string(),
        openai_configured,
    };

    // 4. UseCases
    let generate_ai_response_usecase = Arc::new(GenerateAiResponseUseCase::new(primary, fallback));

    let app_state = AppState {
        connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
            registry.clone(),
            pusher.clone(),
        )),
        join_room_usecase: Arc::new(JoinRoomUseCase::new(
            registry.clone(),
            directory.clone(),
            pusher.clone(),
            router.clone(),
            dispatch.clone(),
        )),
        send_chat_message_usecase: Arc::new(SendChatMessageUseCase::new(
            registry.clone(),
            router.clone(),
            dispatch.clone(),
        )),
        update_room_notes_usecase: Arc::new(UpdateRoomNotesUseCase::new(
            registry.clone(),
            directory.clone(),
            router.clone(),
            dispatch.clone(),
        )),
        disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
            registry.clone(),
            directory.clone(),
            pusher.clone(),
            router.clone(),
            dispatch.clone(),
        )),
        room_grace: Duration::from_secs(args.room_grace_secs),
        get_rooms_usecase: Arc::new(GetRoomsUseCase::new(directory.clone())),
        get_room_detail_usecase: Arc::new(GetRoomDetailUseCase::new(directory.clone())),
        signup_user_usecase: Arc::new(SignupUserUseCase::new(
            user_repository.clone(),
            token_service.clone(),
        )),
        login_user_usecase: Arc::new(LoginUserUseCase::new(
            user_repository.clone(),
            token_service.clone(),
        )),
        get_user_profile_usecase: Arc::new(GetUserProfileUseCase::new(user_repository.clone())),
        update_user_profile_usecase: Arc::new(UpdateUserProfileUseCase::new(
            user_repository.clone(),
        )),
        token_service,
        user_repository,
        create_note_usecase: Arc::new(CreateNoteUseCase::new(note_repository.clone())),
        list_notes_usecase: Arc::new(ListNotesUseCase::new(note_repository.clone())),
        get_note_usecase: Arc::new(GetNoteUseCase::new(note_repository.clone())),
        update_note_usecase: Arc::new(UpdateNoteUseCase::new(note_repository.clone())),
        delete_note_usecase: Arc::new(DeleteNoteUseCase::new(note_repository.clone())),
        summarize_note_usecase: Arc::new(SummarizeNoteUseCase::new(
            note_repository.clone(),
            generate_ai_response_usecase.clone(),
        )),
        generate_ai_response_usecase,
        ai_provider_status,
    };

    // 5. Create and run the server
    let server = Server::new(Arc::new(app_state));
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

//! Server execution logic.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post, put},
};
use tower_http::trace::TraceLayer;

use super::{
    handler::{ai, auth, http, notes, websocket::websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// The study-notes server
///
/// Wraps the assembled [`AppState`] and runs the axum router.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(Arc::new(app_state));
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    state: Arc<AppState>,
}

impl Server {
    /// Create a new Server instance
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    /// Run the server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address
    /// or if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント（リアルタイムゲートウェイ）
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(http::health_check))
            .route("/api/rooms", get(http::get_rooms))
            .route("/api/rooms/{room_key}", get(http::get_room_detail))
            .route("/api/auth/signup", post(auth::signup))
            .route("/api/auth/login", post(auth::login))
            .route("/api/auth/me", get(auth::me))
            .route("/api/auth/profile", put(auth::update_profile))
            .route("/api/auth/logout", post(auth::logout))
            .route("/api/notes", get(notes::list_notes).post(notes::create_note))
            .route(
                "/api/notes/{id}",
                get(notes::get_note)
                    .put(notes::update_note)
                    .delete(notes::delete_note),
            )
            .route("/api/notes/{id}/ai-summary", post(notes::summarize_note))
            .route("/api/ai/generate", post(ai::generate))
            .route("/api/ai/providers", get(ai::providers))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "Study-notes server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

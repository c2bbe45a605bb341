//! CLI study-room client with reconnection support.
//!
//! Connects to a juku server, joins a study room and bridges stdin to the
//! realtime protocol: plain lines become chat messages, `/notes <text>`
//! replaces the room's shared notes buffer. Automatically reconnects on
//! disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin juku-client -- --user Alice
//! cargo run --bin juku-client -- -u Bob -r math-101
//! ```

use clap::Parser;

use juku_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "juku-client")]
#[command(about = "CLI client for juku study rooms", long_about = None)]
struct Args {
    /// Display name shown to other members of the room
    #[arg(short = 'u', long)]
    user: String,

    /// Study room to join
    #[arg(short = 'r', long, default_value = "default-room")]
    room: String,

    /// WebSocket server URL
    #[arg(long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_PKG_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = juku_client::runner::run_client(args.url, args.room, args.user).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

//! UI layer: axum router, request handlers and shared state.

pub mod error;
pub mod extract;
mod handler;
mod server;
mod signal;
pub mod state; // UseCase 層を組み立てる bin からアクセスするため public

pub use server::Server;

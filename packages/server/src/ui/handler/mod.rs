//! Request handlers.

pub mod ai;
pub mod auth;
pub mod http;
pub mod notes;
pub mod websocket;

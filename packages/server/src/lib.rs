//! Collaborative study-notes server library.
//!
//! This library provides accounts, per-note CRUD with search, an AI proxy and
//! a realtime study-room layer (shared notes buffer + chat over WebSocket).

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

//! Infrastructure layer: concrete implementations of the domain trait seams.

pub mod ai;
pub mod dto;
pub mod message_pusher;
pub mod repository;
pub mod token;

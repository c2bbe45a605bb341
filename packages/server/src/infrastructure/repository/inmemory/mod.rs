//! インメモリ Repository 実装

mod note;
mod room_directory;
mod session_registry;
mod user;

pub use note::InMemoryNoteRepository;
pub use room_directory::InMemoryRoomDirectory;
pub use session_registry::InMemorySessionRegistry;
pub use user::InMemoryUserRepository;

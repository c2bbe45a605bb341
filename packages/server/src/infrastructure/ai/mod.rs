//! AiProvider 実装

mod ollama;
mod openai;

pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

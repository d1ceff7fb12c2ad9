//! Inference backend integration
//!
//! Only the local Ollama server is supported; see [`ollama::OllamaClient`].

pub mod ollama;

pub use ollama::OllamaClient;

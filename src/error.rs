//! Error types shared by the alias resolver, the Ollama client and the CLI

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can end a single `llm` invocation
#[derive(Debug, Error)]
pub enum LlmError {
    /// The requested model token matched no alias and no canonical identifier
    #[error("Unknown model: '{requested}'")]
    UnknownModel { requested: String },

    /// The liveness check could not reach the backend
    #[error("Ollama server not reachable at {endpoint}")]
    BackendUnreachable { endpoint: String },

    /// Transport failure or non-success status from the generate call
    #[error("{}", backend_message(.message, .status_code))]
    BackendError {
        message: String,
        status_code: Option<u16>,
    },

    /// The response body was not a JSON object of the expected shape
    #[error("Invalid response from Ollama: {message}")]
    MalformedResponse { message: String },

    #[error("File not found: {}", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Error reading file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File is empty, nothing to summarise: {}", .path.display())]
    EmptyFile { path: PathBuf },

    /// The HTTP client itself could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

fn backend_message(message: &str, status_code: &Option<u16>) -> String {
    match status_code {
        Some(code) => format!("API error ({}): {}", code, message),
        None => format!("Network error: {}", message),
    }
}

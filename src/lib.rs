//! llm-cli - ask a local LLM from the terminal
//!
//! This library backs the `llm` binary, which forwards a question (or a file
//! to summarise) to a locally running [Ollama](https://ollama.com) server and
//! prints the answer.
//!
//! # Core Concepts
//!
//! - **Model aliases**: short tokens such as `qwen` or `gpt` are mapped to the
//!   exact model tags Ollama expects ([`models::ModelAliases`])
//! - **Inference client**: a blocking client that checks `/api/tags` and calls
//!   `/api/generate` once per invocation ([`ai::OllamaClient`])
//! - **Configuration**: an immutable [`AppConfig`] built once at startup
//!
//! # Example Usage
//!
//! ```no_run
//! use llm_cli::{AppConfig, LlmError, OllamaClient};
//!
//! fn ask(question: &str) -> Result<String, LlmError> {
//!     let config = AppConfig::default();
//!     let model = config.aliases.resolve("qwen")?;
//!     let client = OllamaClient::from_config(&config)?;
//!     if !client.is_backend_reachable() {
//!         return Err(LlmError::BackendUnreachable {
//!             endpoint: client.endpoint().to_string(),
//!         });
//!     }
//!     let prompt = llm_cli::prompt::question_prompt(question);
//!     client.generate(&model, &prompt, config.request_timeout)
//! }
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod prompt;
pub mod util;

pub use ai::OllamaClient;
pub use config::AppConfig;
pub use error::LlmError;
pub use models::{ModelAlias, ModelAliases};
pub use util::{init_logging, LoggingConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

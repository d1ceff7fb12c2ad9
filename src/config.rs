//! Runtime configuration for llm-cli
//!
//! Everything the alias resolver and the Ollama client need is gathered into a
//! single immutable [`AppConfig`], built once in `main` from the parsed
//! command line and passed down by reference. There are no configuration
//! files and no environment variables beyond `RUST_LOG` for log filtering.

use crate::cli::commands::CliArgs;
use crate::models::ModelAliases;
use std::time::Duration;

/// Default Ollama endpoint
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";

/// Model used when `--model` is not given
pub const DEFAULT_MODEL: &str = "phi3";

const DEFAULT_LIVENESS_TIMEOUT: Duration = Duration::from_secs(1);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Number of characters of a file included in a summary prompt
pub const DEFAULT_SUMMARY_CHAR_LIMIT: usize = 8000;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Ollama base URL, without a trailing slash
    pub ollama_host: String,

    /// Timeout for the `/api/tags` liveness check
    pub liveness_timeout: Duration,

    /// Upper bound for a single `/api/generate` call
    pub request_timeout: Duration,

    /// Model token used when none is requested
    pub default_model: String,

    /// Characters of file content sent for summarisation
    pub summary_char_limit: usize,

    pub aliases: ModelAliases,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ollama_host: DEFAULT_OLLAMA_HOST.to_string(),
            liveness_timeout: DEFAULT_LIVENESS_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            default_model: DEFAULT_MODEL.to_string(),
            summary_char_limit: DEFAULT_SUMMARY_CHAR_LIMIT,
            aliases: ModelAliases::builtin(),
        }
    }
}

impl AppConfig {
    /// Builds the configuration for one invocation from the command line
    pub fn from_args(args: &CliArgs) -> Self {
        let mut config = Self::default();
        if let Some(host) = &args.host {
            config.ollama_host = normalize_host(host);
        }
        config
    }

    /// Returns a copy pointed at a different Ollama host
    pub fn with_host(mut self, host: &str) -> Self {
        self.ollama_host = normalize_host(host);
        self
    }
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ollama_host, "http://localhost:11434");
        assert_eq!(config.liveness_timeout, Duration::from_secs(1));
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.default_model, "phi3");
        assert_eq!(config.summary_char_limit, 8000);
        assert_eq!(config.aliases, ModelAliases::builtin());
    }

    #[test]
    fn test_from_args_without_host() {
        let args = CliArgs::parse_from(["llm", "hello"]);
        let config = AppConfig::from_args(&args);
        assert_eq!(config.ollama_host, DEFAULT_OLLAMA_HOST);
    }

    #[test]
    fn test_from_args_strips_trailing_slash() {
        let args = CliArgs::parse_from(["llm", "--host", "http://10.0.0.5:11434/", "hello"]);
        let config = AppConfig::from_args(&args);
        assert_eq!(config.ollama_host, "http://10.0.0.5:11434");
    }

    #[test]
    fn test_with_host() {
        let config = AppConfig::default().with_host(" http://127.0.0.1:9999// ");
        assert_eq!(config.ollama_host, "http://127.0.0.1:9999");
    }
}

//! Ollama HTTP client for local LLM inference
//!
//! Two calls are made against the Ollama REST API, always in this order and
//! at most once each per invocation:
//!
//! - `GET /api/tags` as a liveness check ([`OllamaClient::is_backend_reachable`])
//! - `POST /api/generate` with `stream: false` ([`OllamaClient::generate`])
//!
//! # Example
//!
//! ```no_run
//! use llm_cli::ai::ollama::OllamaClient;
//! use std::time::Duration;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OllamaClient::new("http://localhost:11434".to_string(), Duration::from_secs(1))?;
//!
//! if client.is_backend_reachable() {
//!     let answer = client.generate("phi3", "Why is the sky blue?", Duration::from_secs(60))?;
//!     println!("{}", answer);
//! }
//! # Ok(())
//! # }
//! ```

use crate::config::AppConfig;
use crate::error::LlmError;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Blocking client for a single Ollama server
pub struct OllamaClient {
    /// Ollama API endpoint URL
    endpoint: String,

    /// Shared HTTP client
    http_client: Client,

    /// Timeout for the liveness check
    liveness_timeout: Duration,
}

impl OllamaClient {
    /// Creates a client for `endpoint` (e.g. "http://localhost:11434")
    ///
    /// # Errors
    ///
    /// [`LlmError::HttpClient`] if the TLS backend or resolver cannot be set up.
    pub fn new(endpoint: String, liveness_timeout: Duration) -> Result<Self, LlmError> {
        let http_client = Client::builder()
            .build()
            .map_err(|e| LlmError::HttpClient(e.to_string()))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            http_client,
            liveness_timeout,
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self, LlmError> {
        Self::new(config.ollama_host.clone(), config.liveness_timeout)
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Checks whether anything is accepting HTTP requests at the endpoint.
    ///
    /// Only connectivity matters: any HTTP response, whatever its status,
    /// counts as reachable. Transport failures (refused, timeout, DNS) yield
    /// `false` and are never propagated.
    pub fn is_backend_reachable(&self) -> bool {
        let url = format!("{}/api/tags", self.endpoint);

        debug!("Checking Ollama liveness at {}", url);

        match self
            .http_client
            .get(&url)
            .timeout(self.liveness_timeout)
            .send()
        {
            Ok(response) => {
                if response.status().is_success() {
                    info!("Ollama liveness check successful");
                } else {
                    warn!(
                        "Ollama answered liveness check with status: {}",
                        response.status()
                    );
                }
                true
            }
            Err(e) => {
                if e.is_timeout() {
                    warn!("Ollama liveness check timed out");
                } else if e.is_connect() {
                    warn!("Cannot connect to Ollama at {}", self.endpoint);
                } else {
                    warn!("Ollama liveness check error: {}", e);
                }
                false
            }
        }
    }

    /// Sends one non-streaming generate request and returns the trimmed text.
    ///
    /// A payload without a `response` field yields an empty string.
    ///
    /// # Errors
    ///
    /// - [`LlmError::BackendError`] on transport failure, timeout or a
    ///   non-success HTTP status
    /// - [`LlmError::MalformedResponse`] if the body is not a JSON object or
    ///   `response` is not a string
    pub fn generate(
        &self,
        model: &str,
        prompt: &str,
        timeout: Duration,
    ) -> Result<String, LlmError> {
        let url = format!("{}/api/generate", self.endpoint);

        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        debug!(
            "Sending request to Ollama: model={}, prompt_length={}",
            model,
            prompt.len()
        );

        let start = Instant::now();

        let response = self
            .http_client
            .post(&url)
            .timeout(timeout)
            .json(&request)
            .send()
            .map_err(|e| self.transport_error(e, timeout))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| self.transport_error(e, timeout))?;

        if !status.is_success() {
            error!("Ollama API returned error status {}: {}", status, body);

            if status.as_u16() == 404 && body.contains("model") {
                return Err(LlmError::BackendError {
                    message: format!(
                        "Model '{}' not found. Please pull it with: ollama pull {}",
                        model, model
                    ),
                    status_code: Some(404),
                });
            }

            return Err(LlmError::BackendError {
                message: format!("HTTP {}: {}", status, body.trim()),
                status_code: Some(status.as_u16()),
            });
        }

        let parsed = parse_generate_response(&body)?;

        info!(
            "Ollama generation completed in {:.2}s (model={})",
            start.elapsed().as_secs_f64(),
            model
        );

        if parsed.done == Some(false) {
            warn!("Ollama response indicates incomplete generation");
        }

        debug!(
            "Ollama stats: prompt_tokens={}, eval_tokens={}, total_duration={:?}",
            parsed.prompt_eval_count.unwrap_or(0),
            parsed.eval_count.unwrap_or(0),
            parsed.total_duration
        );

        Ok(parsed.text())
    }

    fn transport_error(&self, e: reqwest::Error, timeout: Duration) -> LlmError {
        if e.is_timeout() {
            error!("Ollama request timed out after {:?}", timeout);
            LlmError::BackendError {
                message: format!("Request timed out after {:?}", timeout),
                status_code: None,
            }
        } else if e.is_connect() {
            error!("Cannot connect to Ollama at {}", self.endpoint);
            LlmError::BackendError {
                message: format!("Connection failed: {}", e),
                status_code: None,
            }
        } else {
            error!("Ollama request error: {}", e);
            LlmError::BackendError {
                message: format!("Request failed: {}", e),
                status_code: None,
            }
        }
    }
}

impl fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaClient")
            .field("endpoint", &self.endpoint)
            .field("liveness_timeout", &self.liveness_timeout)
            .finish()
    }
}

/// Request body for `/api/generate`
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Response body from `/api/generate`. Every field is optional; only the
/// overall shape (a JSON object) is enforced.
#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    done: Option<bool>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
    total_duration: Option<u64>,
}

impl GenerateResponse {
    fn text(self) -> String {
        self.response.unwrap_or_default().trim().to_string()
    }
}

fn parse_generate_response(body: &str) -> Result<GenerateResponse, LlmError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        error!("Failed to parse Ollama response: {}", e);
        LlmError::MalformedResponse {
            message: format!("JSON parse error: {}", e),
        }
    })?;

    if !value.is_object() {
        return Err(LlmError::MalformedResponse {
            message: format!("expected a JSON object, got: {}", truncate(body, 200)),
        });
    }

    serde_json::from_value(value).map_err(|e| LlmError::MalformedResponse {
        message: format!("unexpected field type: {}", e),
    })
}

fn truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

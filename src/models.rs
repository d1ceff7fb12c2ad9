//! Model alias resolution
//!
//! Users type short, memorable model names (`qwen`, `GPT`, `deepseek-big`)
//! and the Ollama server expects exact tags (`qwen3-coder:480b-cloud`).
//! [`ModelAliases`] bridges the two with case-insensitive substring matching.
//!
//! Aliases are tried in declaration order and the first token found anywhere
//! in the lowercased input wins. An input such as `"qwen-vs-gpt"` therefore
//! resolves to the Qwen model because `qwen` is declared before `gpt`.
//!
//! # Example
//!
//! ```
//! use llm_cli::models::ModelAliases;
//!
//! let aliases = ModelAliases::builtin();
//! assert_eq!(aliases.resolve("Qwen").unwrap(), "qwen3-coder:480b-cloud");
//! assert_eq!(aliases.resolve("phi3").unwrap(), "phi3");
//! assert!(aliases.resolve("totally-unknown-xyz").is_err());
//! ```

use crate::error::LlmError;
use tracing::debug;

/// Built-in alias table, in tie-break order
const BUILTIN_ALIASES: &[(&str, &str)] = &[
    ("qwen", "qwen3-coder:480b-cloud"),
    ("gpt", "gpt-oss:120b-cloud"),
    ("deepseek", "deepseek-v3.1:671b-cloud"),
    ("kimi", "kimi-k2:1t-cloud"),
    ("glm", "glm-4.6:cloud"),
    ("phi", "phi3"),
    ("llama", "llama3.2"),
    ("mistral", "mistral"),
    ("gemma", "gemma3"),
];

/// A short token mapped to the identifier the backend understands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAlias {
    /// Lowercase token matched as a substring of the user's input
    pub token: String,

    /// Exact model tag sent to Ollama
    pub canonical: String,
}

impl ModelAlias {
    pub fn new(token: impl Into<String>, canonical: impl Into<String>) -> Self {
        Self {
            token: token.into().to_lowercase(),
            canonical: canonical.into(),
        }
    }
}

/// Ordered, immutable alias table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelAliases {
    aliases: Vec<ModelAlias>,
}

impl Default for ModelAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ModelAliases {
    /// The table shipped with the binary
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_ALIASES
                .iter()
                .map(|(token, canonical)| ModelAlias::new(*token, *canonical))
                .collect(),
        )
    }

    /// Builds a table from aliases in tie-break order. Empty tokens are
    /// dropped since they would match every input.
    pub fn new(aliases: Vec<ModelAlias>) -> Self {
        let aliases = aliases
            .into_iter()
            .filter(|alias| !alias.token.is_empty())
            .collect();
        Self { aliases }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ModelAlias> {
        self.aliases.iter()
    }

    /// Canonical identifiers in table order, without duplicates
    pub fn canonical_models(&self) -> Vec<&str> {
        let mut models: Vec<&str> = Vec::with_capacity(self.aliases.len());
        for alias in &self.aliases {
            if !models.contains(&alias.canonical.as_str()) {
                models.push(&alias.canonical);
            }
        }
        models
    }

    /// Maps a user-supplied model token to a canonical identifier.
    ///
    /// Empty (or all-whitespace) input is returned unchanged. An input that
    /// matches no alias but is already a canonical identifier passes through.
    ///
    /// # Errors
    ///
    /// [`LlmError::UnknownModel`] carrying the original token when nothing
    /// matches.
    pub fn resolve(&self, requested: &str) -> Result<String, LlmError> {
        let trimmed = requested.trim();
        if trimmed.is_empty() {
            return Ok(requested.to_string());
        }

        let lowered = trimmed.to_lowercase();
        if let Some(alias) = self
            .aliases
            .iter()
            .find(|alias| lowered.contains(alias.token.as_str()))
        {
            debug!(
                "Resolved model '{}' to '{}' via alias '{}'",
                requested, alias.canonical, alias.token
            );
            return Ok(alias.canonical.clone());
        }

        if self.aliases.iter().any(|alias| alias.canonical == trimmed) {
            debug!("Model '{}' is already canonical", trimmed);
            return Ok(trimmed.to_string());
        }

        Err(LlmError::UnknownModel {
            requested: requested.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        qwen_plain = { "qwen", "qwen3-coder:480b-cloud" },
        qwen_upper = { "QWEN", "qwen3-coder:480b-cloud" },
        qwen_padded = { "  Qwen  ", "qwen3-coder:480b-cloud" },
        qwen_embedded = { "my-qwen-model", "qwen3-coder:480b-cloud" },
        gpt = { "gpt", "gpt-oss:120b-cloud" },
        gpt_oss = { "GPT-OSS", "gpt-oss:120b-cloud" },
        deepseek = { "deepseek-big", "deepseek-v3.1:671b-cloud" },
        kimi = { "Kimi", "kimi-k2:1t-cloud" },
        glm = { "glm", "glm-4.6:cloud" },
        phi = { "phi", "phi3" },
        llama = { "Llama3", "llama3.2" },
        mistral = { "mistral", "mistral" },
        gemma = { "gemma", "gemma3" },
    )]
    fn test_alias_resolution(input: &str, expected: &str) {
        let aliases = ModelAliases::builtin();
        assert_eq!(aliases.resolve(input).unwrap(), expected);
    }

    #[test]
    fn test_empty_input_unchanged() {
        let aliases = ModelAliases::builtin();
        assert_eq!(aliases.resolve("").unwrap(), "");
        assert_eq!(aliases.resolve("   ").unwrap(), "   ");
    }

    #[test]
    fn test_every_canonical_resolves_to_itself() {
        let aliases = ModelAliases::builtin();
        for canonical in aliases.canonical_models() {
            assert_eq!(aliases.resolve(canonical).unwrap(), canonical);
        }
    }

    #[test]
    fn test_unknown_model() {
        let aliases = ModelAliases::builtin();
        match aliases.resolve("totally-unknown-xyz") {
            Err(LlmError::UnknownModel { requested }) => {
                assert_eq!(requested, "totally-unknown-xyz");
            }
            other => panic!("Expected UnknownModel, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_model_keeps_original_token() {
        let aliases = ModelAliases::builtin();
        match aliases.resolve("  Nope ") {
            Err(LlmError::UnknownModel { requested }) => assert_eq!(requested, "  Nope "),
            other => panic!("Expected UnknownModel, got {:?}", other),
        }
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let aliases = ModelAliases::builtin();
        assert_eq!(
            aliases.resolve("qwen-vs-gpt").unwrap(),
            "qwen3-coder:480b-cloud"
        );
        assert_eq!(
            aliases.resolve("gpt-vs-qwen").unwrap(),
            "qwen3-coder:480b-cloud"
        );
    }

    #[test]
    fn test_custom_table_order() {
        let aliases = ModelAliases::new(vec![
            ModelAlias::new("b", "model-b"),
            ModelAlias::new("a", "model-a"),
        ]);
        assert_eq!(aliases.resolve("ab").unwrap(), "model-b");
    }

    #[test]
    fn test_canonical_without_alias_match() {
        let aliases = ModelAliases::new(vec![ModelAlias::new("tiny", "m:1b")]);
        assert_eq!(aliases.resolve("m:1b").unwrap(), "m:1b");
        assert_eq!(aliases.resolve(" m:1b ").unwrap(), "m:1b");
        assert!(aliases.resolve("M:1B").is_err());
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        let aliases = ModelAliases::new(vec![
            ModelAlias::new("", "everything"),
            ModelAlias::new("x", "model-x"),
        ]);
        assert_eq!(aliases.iter().count(), 1);
        assert!(aliases.resolve("abc").is_err());
    }

    #[test]
    fn test_tokens_are_lowercased() {
        let alias = ModelAlias::new("Qwen", "qwen3");
        assert_eq!(alias.token, "qwen");
    }

    #[test]
    fn test_canonical_models_dedup() {
        let aliases = ModelAliases::new(vec![
            ModelAlias::new("phi", "phi3"),
            ModelAlias::new("microsoft", "phi3"),
        ]);
        assert_eq!(aliases.canonical_models(), vec!["phi3"]);
    }
}

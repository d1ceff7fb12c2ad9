//! Invocation flow for the `llm` binary
//!
//! One invocation is a single linear pass: resolve the model, check the
//! backend, send one generate request, print the result. Each step returns
//! early with an exit code; nothing is retried.

use crate::ai::OllamaClient;
use crate::cli::commands::CliArgs;
use crate::cli::output::{Console, Style};
use crate::config::AppConfig;
use crate::error::LlmError;
use crate::prompt;
use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

pub const USAGE: &str =
    "llm [--verbose|--raw] [--model MODEL] [--summarise FILE] <your question>";

/// Runs one invocation and returns the process exit code
pub fn run(args: &CliArgs, config: &AppConfig) -> i32 {
    let console = Console::detect();

    let question = args.question_text();
    if args.summarise.is_none() && question.trim().is_empty() {
        eprintln!("{} {}", console.paint(Style::BoldRed, "Usage:"), USAGE);
        return 1;
    }

    let model = match resolve_model(args, config) {
        Ok(model) => model,
        Err(e) => {
            report_error(&console, &e, config);
            return 1;
        }
    };

    let client = match OllamaClient::from_config(config) {
        Ok(client) => client,
        Err(e) => {
            report_error(&console, &e, config);
            return 1;
        }
    };

    if let Err(e) = ensure_reachable(&client) {
        report_error(&console, &e, config);
        return 1;
    }

    match &args.summarise {
        Some(path) => handle_summarise(&console, &client, config, &model, path),
        None => handle_question(&console, &client, config, &model, &question, args),
    }
}

/// Resolves `--model` (or the configured default) to a canonical identifier
pub fn resolve_model(args: &CliArgs, config: &AppConfig) -> Result<String, LlmError> {
    let requested = args.model.as_deref().unwrap_or(config.default_model.as_str());
    let model = config.aliases.resolve(requested)?;
    info!("Using model: {}", model);
    Ok(model)
}

fn ensure_reachable(client: &OllamaClient) -> Result<(), LlmError> {
    if client.is_backend_reachable() {
        Ok(())
    } else {
        Err(LlmError::BackendUnreachable {
            endpoint: client.endpoint().to_string(),
        })
    }
}

fn handle_question(
    console: &Console,
    client: &OllamaClient,
    config: &AppConfig,
    model: &str,
    question: &str,
    args: &CliArgs,
) -> i32 {
    if args.verbose {
        println!(
            "{} {}\n",
            console.paint(Style::BoldCyan, "🤖 Asking local LLM:"),
            question
        );
    }

    let prompt = prompt::question_prompt(question);

    match client.generate(model, &prompt, config.request_timeout) {
        Ok(answer) => {
            if args.raw {
                println!("{}", answer);
            } else {
                println!("{}", console.format_answer(&answer, Some(Style::Green)));
            }
        }
        Err(e) => {
            error!("Generation failed: {}", e);
            eprintln!("{} {}", console.paint(Style::BoldRed, "Error:"), e);
        }
    }

    0
}

fn handle_summarise(
    console: &Console,
    client: &OllamaClient,
    config: &AppConfig,
    model: &str,
    path: &Path,
) -> i32 {
    let text = match read_source_file(path) {
        Ok(text) => text,
        Err(e) => {
            report_error(console, &e, config);
            return 1;
        }
    };

    println!(
        "{} {}",
        console.paint(Style::Cyan, "📄 Summarising:"),
        path.display()
    );

    let prompt = prompt::summary_prompt(&text, config.summary_char_limit);

    match client.generate(model, &prompt, config.request_timeout) {
        Ok(summary) => {
            println!("\n{}\n", console.paint(Style::BoldGreen, "🧠 Summary:"));
            println!("{}", console.format_answer(&summary, None));
            0
        }
        Err(e) => {
            report_error(console, &e, config);
            1
        }
    }
}

/// Reads a file for summarisation. Bytes that are not valid UTF-8 are
/// dropped.
///
/// # Errors
///
/// - [`LlmError::FileNotFound`] if `path` is missing or not a regular file
/// - [`LlmError::FileRead`] if reading fails
/// - [`LlmError::EmptyFile`] if the content is blank
pub fn read_source_file(path: &Path) -> Result<String, LlmError> {
    if !path.is_file() {
        return Err(LlmError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = fs::read(path).map_err(|source| LlmError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let text = decode_dropping_invalid(&bytes);

    if text.trim().is_empty() {
        return Err(LlmError::EmptyFile {
            path: path.to_path_buf(),
        });
    }

    debug!("Read {} characters from {}", text.chars().count(), path.display());
    Ok(text)
}

/// Decodes UTF-8, skipping invalid byte runs and a truncated trailing
/// sequence. Valid U+FFFD characters are kept.
fn decode_dropping_invalid(bytes: &[u8]) -> String {
    let mut text = String::with_capacity(bytes.len());
    let mut rest = bytes;

    loop {
        match std::str::from_utf8(rest) {
            Ok(valid) => {
                text.push_str(valid);
                break;
            }
            Err(e) => {
                let (valid, after) = rest.split_at(e.valid_up_to());
                // bytes before valid_up_to() are always valid UTF-8
                text.push_str(std::str::from_utf8(valid).unwrap_or_default());
                match e.error_len() {
                    Some(len) => rest = &after[len..],
                    None => break,
                }
            }
        }
    }

    text
}

fn report_error(console: &Console, err: &LlmError, config: &AppConfig) {
    error!("{}", err);

    match err {
        LlmError::UnknownModel { .. } => {
            eprintln!("{}", console.paint(Style::Red, &err.to_string()));
            eprintln!(
                "Known models: {}",
                config.aliases.canonical_models().join(", ")
            );
        }
        LlmError::BackendUnreachable { endpoint } => {
            eprintln!(
                "{}",
                console.paint(Style::BoldRed, "❌ Ollama server not running.")
            );
            eprintln!("No response from {}", endpoint);
            eprintln!("Start it with: {}", console.paint(Style::Yellow, "ollama serve"));
        }
        LlmError::EmptyFile { .. } => {
            eprintln!(
                "{}",
                console.paint(Style::Yellow, "File is empty, nothing to summarise.")
            );
        }
        _ => {
            eprintln!("{} {}", console.paint(Style::BoldRed, "Error:"), err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_resolve_default_model() {
        let args = CliArgs::parse_from(["llm", "hi"]);
        let model = resolve_model(&args, &AppConfig::default()).unwrap();
        assert_eq!(model, "phi3");
    }

    #[test]
    fn test_resolve_alias() {
        let args = CliArgs::parse_from(["llm", "--model", "qwen", "hi"]);
        let model = resolve_model(&args, &AppConfig::default()).unwrap();
        assert_eq!(model, "qwen3-coder:480b-cloud");
    }

    #[test]
    fn test_unknown_model_exits_before_network() {
        // Nothing listens on this port; an UnknownModel must surface first.
        let config = AppConfig::default().with_host("http://localhost:59999");
        let args = CliArgs::parse_from(["llm", "--model", "totally-unknown-xyz", "hi"]);
        assert!(matches!(
            resolve_model(&args, &config),
            Err(LlmError::UnknownModel { .. })
        ));
        assert_eq!(run(&args, &config), 1);
    }

    #[test]
    fn test_empty_question_is_usage_error() {
        let args = CliArgs::parse_from(["llm", "--raw"]);
        assert_eq!(run(&args, &AppConfig::default()), 1);
    }

    #[test]
    fn test_unreachable_backend_exits_with_error() {
        let config = AppConfig::default().with_host("http://localhost:59999");
        let args = CliArgs::parse_from(["llm", "hello"]);
        assert_eq!(run(&args, &config), 1);
    }

    #[test]
    fn test_read_source_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "Quarterly planning notes.").unwrap();
        assert_eq!(
            read_source_file(file.path()).unwrap(),
            "Quarterly planning notes."
        );
    }

    #[test]
    fn test_read_source_file_drops_invalid_utf8() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"ab\xffcd").unwrap();
        assert_eq!(read_source_file(file.path()).unwrap(), "abcd");
    }

    #[test]
    fn test_read_source_file_keeps_real_replacement_character() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all("a\u{FFFD}b".as_bytes()).unwrap();
        file.write_all(b"\xffc").unwrap();
        assert_eq!(read_source_file(file.path()).unwrap(), "a\u{FFFD}bc");
    }

    #[test]
    fn test_decode_dropping_invalid() {
        assert_eq!(decode_dropping_invalid(b"plain"), "plain");
        assert_eq!(decode_dropping_invalid(b"\xc3\xa9\x80x"), "\u{e9}x");
        assert_eq!(decode_dropping_invalid(b"ab\xe2\x82"), "ab");
        assert_eq!(decode_dropping_invalid(b"\xff\xfe"), "");
    }

    #[test]
    fn test_read_source_file_missing() {
        let result = read_source_file(Path::new("/definitely/not/here.txt"));
        assert!(matches!(result, Err(LlmError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_source_file_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_source_file(dir.path());
        assert!(matches!(result, Err(LlmError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_source_file_blank() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "  \n\t\n").unwrap();
        let result = read_source_file(file.path());
        assert!(matches!(result, Err(LlmError::EmptyFile { .. })));
    }
}

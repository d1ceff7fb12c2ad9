use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Ask a locally running Ollama server a question, or have it summarise a file
#[derive(Parser, Debug)]
#[command(
    name = "llm",
    about = "Ask a local LLM a question or have it summarise a file",
    version,
    long_about = "llm forwards a question (or a file to summarise) to a locally running \
                  Ollama server and prints the answer.\n\n\
                  Examples:\n  \
                  llm how do I undo the last git commit\n  \
                  llm --raw --model qwen list files by size\n  \
                  llm --model qwen --summarise notes.txt"
)]
pub struct CliArgs {
    #[arg(long, help = "Echo the question before asking and enable debug logging")]
    pub verbose: bool,

    #[arg(long, help = "Print the answer as plain text without styling")]
    pub raw: bool,

    #[arg(
        long,
        value_name = "MODEL",
        help = "Model name or alias (e.g. 'qwen', 'gpt', 'phi3'); defaults to phi3"
    )]
    pub model: Option<String>,

    #[arg(
        long,
        visible_alias = "summarize",
        value_name = "FILE",
        help = "Summarise the contents of FILE instead of answering a question"
    )]
    pub summarise: Option<PathBuf>,

    #[arg(
        long,
        value_name = "URL",
        help = "Ollama server URL (default: http://localhost:11434)"
    )]
    pub host: Option<String>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(
        long,
        value_enum,
        default_value = "human",
        help = "Format of diagnostic logs on stderr"
    )]
    pub log_format: LogFormatArg,

    #[arg(value_name = "QUESTION", help = "Question to ask")]
    pub question: Vec<String>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormatArg {
    Human,
    Json,
}

impl CliArgs {
    /// The question words joined by single spaces
    pub fn question_text(&self) -> String {
        self.question.join(" ")
    }
}

//! Console styling and markdown rendering
//!
//! Answers that contain fenced code blocks are rendered as light markdown:
//! fences are dropped, code lines are indented and tinted, headings are bold.
//! Everything else is printed as a single styled block. ANSI escapes are only
//! emitted when stdout is a terminal.

/// Text styles used by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Red,
    BoldRed,
    Green,
    BoldGreen,
    Yellow,
    Cyan,
    BoldCyan,
    Bold,
}

impl Style {
    fn ansi_code(self) -> &'static str {
        match self {
            Style::Red => "31",
            Style::BoldRed => "1;31",
            Style::Green => "32",
            Style::BoldGreen => "1;32",
            Style::Yellow => "33",
            Style::Cyan => "36",
            Style::BoldCyan => "1;36",
            Style::Bold => "1",
        }
    }
}

const CODE_FENCE: &str = "```";
const CODE_INDENT: &str = "    ";

#[derive(Debug, Clone, Copy)]
pub struct Console {
    color: bool,
}

impl Console {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colours only when stdout is attached to a terminal
    pub fn detect() -> Self {
        Self::new(atty::is(atty::Stream::Stdout))
    }

    pub fn paint(&self, style: Style, text: &str) -> String {
        if self.color && !text.is_empty() {
            format!("\x1b[{}m{}\x1b[0m", style.ansi_code(), text)
        } else {
            text.to_string()
        }
    }

    /// Formats a model answer for display. Fenced answers are rendered as
    /// markdown, anything else is painted in `plain_style`.
    pub fn format_answer(&self, answer: &str, plain_style: Option<Style>) -> String {
        if looks_like_markdown(answer) {
            self.render_markdown(answer)
        } else {
            match plain_style {
                Some(style) => self.paint(style, answer),
                None => answer.to_string(),
            }
        }
    }

    pub fn render_markdown(&self, text: &str) -> String {
        let mut out: Vec<String> = Vec::new();
        let mut in_code = false;

        for line in text.lines() {
            if line.trim_start().starts_with(CODE_FENCE) {
                in_code = !in_code;
                continue;
            }

            if in_code {
                out.push(self.paint(Style::Cyan, &format!("{}{}", CODE_INDENT, line)));
            } else if let Some(heading) = heading_text(line) {
                out.push(self.paint(Style::Bold, heading));
            } else {
                out.push(line.to_string());
            }
        }

        out.join("\n")
    }
}

pub fn looks_like_markdown(text: &str) -> bool {
    text.contains(CODE_FENCE)
}

fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let hashes = trimmed.chars().take_while(|c| *c == '#').count();
    if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
        Some(trimmed[hashes..].trim())
    } else {
        None
    }
}

//! Prompt framing for questions and file summaries

/// Preamble for a plain question
pub const QUESTION_PREAMBLE: &str = "You are a concise command-line assistant. \
Return clear answers and minimal explanations, using code blocks where helpful.";

/// Instructions preceding the text to summarise
pub const SUMMARY_INSTRUCTIONS: &str = "You are an expert technical writer, not a shell or programming assistant. \
Your only job is to read the following text and produce a short, clear summary \
in natural language. Do NOT output code, commands, or instructions. \
Respond in plain English prose in 3-5 sentences.";

pub fn question_prompt(question: &str) -> String {
    format!("{}\n\nQuestion: {}\n", QUESTION_PREAMBLE, question)
}

/// Frames `text` for summarisation, keeping at most `char_limit` characters
pub fn summary_prompt(text: &str, char_limit: usize) -> String {
    format!(
        "{}\n\n--- BEGIN TEXT ---\n{}\n--- END TEXT ---\n\nSummary:",
        SUMMARY_INSTRUCTIONS,
        take_chars(text, char_limit)
    )
}

/// Longest prefix of `text` holding at most `limit` characters
pub fn take_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

//! Prompt construction, command validation, and response post-processing.
//!
//! The generator is asked twice per request: once for the code itself and
//! once for a short explanation of that code. Responses frequently arrive
//! wrapped in markdown fences, so [`extract_code`] strips those before the
//! snippet is stored anywhere.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Hard ceiling on command length, in characters.
pub const MAX_COMMAND_CHARS: usize = 4000;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate a generation command.
///
/// Rules:
/// - Must not be empty or whitespace-only.
/// - Must not exceed `MAX_COMMAND_CHARS` characters.
pub fn validate_command(command: &str) -> Result<(), CoreError> {
    if command.trim().is_empty() {
        return Err(CoreError::Validation(
            "Command must not be empty".to_string(),
        ));
    }
    if command.chars().count() > MAX_COMMAND_CHARS {
        return Err(CoreError::Validation(format!(
            "Command must not exceed {MAX_COMMAND_CHARS} characters"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Prompt construction
// ---------------------------------------------------------------------------

/// Build the code-generation prompt for a command.
pub fn code_prompt(command: &str) -> String {
    format!(
        "You are a Python coding assistant. Generate a concise, working code \
         snippet for the following command:\n\n{command}\n\nProvide only the \
         Python code without any explanation or markdown formatting."
    )
}

/// Build the follow-up prompt asking for a short explanation of `code`.
pub fn explanation_prompt(code: &str) -> String {
    format!("Provide a brief explanation for this Python code: {code}")
}

/// Explanation used when the explanation call fails or returns nothing.
pub fn fallback_explanation(command: &str) -> String {
    format!("Code for: {command}")
}

// ---------------------------------------------------------------------------
// Response post-processing
// ---------------------------------------------------------------------------

/// Extract the code payload from a raw generator response.
///
/// If the response contains a markdown fence, the first fenced block is
/// returned with any leading language tag line removed. Unfenced responses
/// are returned trimmed.
pub fn extract_code(raw: &str) -> String {
    let Some(start) = raw.find("```") else {
        return raw.trim().to_string();
    };
    let rest = &raw[start + 3..];
    let block = rest.find("```").map_or(rest, |end| &rest[..end]);

    // The fence may open with a language tag ("python", "rust", ...).
    let block = match block.split_once('\n') {
        Some((first, tail)) if is_language_tag(first.trim()) => tail,
        _ => block,
    };

    block.trim().to_string()
}

/// A short alphanumeric word directly after an opening fence is treated as
/// a language tag, not code.
fn is_language_tag(word: &str) -> bool {
    !word.is_empty()
        && word.len() <= 16
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '#')
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

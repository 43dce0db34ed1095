//! Maps a decode failure back to the line of the rendered output it came from.

use super::stream::is_separator;
use regex::Regex;
use std::fmt::Display;
use std::sync::LazyLock;

/// Phrase a parser error carries ahead of its document-relative line number.
static LINE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:yaml|json): line (\d+):").expect("line pattern is a valid regex")
});

/// Where in the rendered output a decode failure happened.
///
/// All fields are zero or empty when the failure could not be located.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YamlErrorContext {
    /// Line relative to the start of the failing document.
    pub rel_line: usize,
    /// Line within the full rendered output.
    pub abs_line: usize,
    /// Parser message following the line number.
    pub message: String,
    /// The rendered line at `abs_line`.
    pub context: String,
}

impl YamlErrorContext {
    pub fn is_empty(&self) -> bool {
        self.abs_line == 0
    }

    /// Text appended to a decode error message, empty when nothing was located.
    pub fn suffix(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" (line {}: {:?})", self.abs_line, self.context)
        }
    }
}

/// Returns the line number of the first separator strictly after `start_line`,
/// or `start_line` when no separator follows.
///
/// Line numbers are 1-based; `0` denotes the start of the output.
pub fn move_to_next_doc(lines: &[&str], start_line: usize) -> usize {
    (start_line + 1..=lines.len())
        .find(|&i| is_separator(lines[i - 1]))
        .unwrap_or(start_line)
}

/// Locates a decode error within the rendered output.
///
/// # Arguments
/// * `err` - The decode error; only its text is inspected
/// * `start_line` - Line at which the failing document began
/// * `lines` - The full rendered output split into lines
///
/// # Returns
/// * `YamlErrorContext` - The located line, or an empty context when the
///   error text carries no line number or the line is out of range
pub fn get_yaml_error_context(
    err: &impl Display,
    start_line: usize,
    lines: &[&str],
) -> YamlErrorContext {
    let text = err.to_string();
    let Some(captures) = LINE_PATTERN.captures(&text) else {
        return YamlErrorContext::default();
    };
    let Ok(rel_line) = captures[1].parse::<usize>() else {
        return YamlErrorContext::default();
    };

    let abs_line = start_line + rel_line;
    if abs_line == 0 || abs_line > lines.len() {
        return YamlErrorContext::default();
    }

    let matched_end = captures.get(0).map(|m| m.end()).unwrap_or_default();
    YamlErrorContext {
        rel_line,
        abs_line,
        message: text[matched_end..].trim().to_string(),
        context: lines[abs_line - 1].to_string(),
    }
}

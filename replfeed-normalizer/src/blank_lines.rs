//! Blank-line removal
//!
//! Deletes every line the tokenizer flagged with a blank-line marker. Blank lines inside
//! string literals never get a marker, so they survive. Which lines go is decided by the
//! token stream alone; this module never inspects line content.

use crate::token::Token;
use log::debug;

/// 1-based line numbers marked blank, ascending and deduplicated.
pub fn blank_line_numbers(tokens: &[Token]) -> Vec<usize> {
    let mut lines: Vec<usize> = tokens
        .iter()
        .filter(|token| token.is_blank_line_marker())
        .map(|token| token.start.line)
        .collect();
    lines.sort_unstable();
    lines.dedup();
    lines
}

/// Remove the lines marked blank in `tokens` from `lines`.
///
/// Deletion runs from the highest line number down, so each index stays valid.
pub fn remove_blank_lines(mut lines: Vec<String>, tokens: &[Token]) -> Vec<String> {
    let marked = blank_line_numbers(tokens);
    let before = lines.len();

    for line in marked.iter().rev() {
        if (1..=lines.len()).contains(line) {
            lines.remove(line - 1);
        }
    }

    debug!(
        "removed {} blank lines ({} marked)",
        before - lines.len(),
        marked.len()
    );
    lines
}

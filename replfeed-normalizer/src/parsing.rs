//! Statement boundary analysis
//!
//!     Finds where every top-level statement starts in text that has already had its blank
//!     lines removed. The structural view comes from the chumsky grammar in
//!     [grammar](grammar); [ranges](ranges) turns the start lines into line ranges and
//!     optionally merges runs of one-line statements.
//!
//!     Any line index produced here is only valid for the exact text that was analyzed.

pub mod grammar;
pub mod ranges;

pub use grammar::{parse_statements, StatementNode, CLAUSE_KEYWORDS};
pub use ranges::{
    merge_single_line_runs, ranges_from_start_lines, top_level_start_lines, StatementRange,
};

use crate::error::NormalizeError;
use crate::lexing::tokenize;
use crate::token::Token;
use log::debug;

/// Ranges of the top-level statements in `tokens`, for text of `line_count` lines.
pub fn statement_ranges(
    tokens: &[Token],
    line_count: usize,
    merge_runs: bool,
) -> Result<Vec<StatementRange>, NormalizeError> {
    let nodes = parse_statements(tokens)?;
    let starts = top_level_start_lines(&nodes);
    let ranges = ranges_from_start_lines(&starts, line_count);
    debug!("found {} top-level statements", ranges.len());

    Ok(if merge_runs {
        merge_single_line_runs(ranges)
    } else {
        ranges
    })
}

/// Tokenize and analyze `cleaned_text`, merging runs of one-line statements.
pub fn find_top_level_statement_ranges(
    cleaned_text: &str,
) -> Result<Vec<StatementRange>, NormalizeError> {
    find_top_level_statement_ranges_with(cleaned_text, true)
}

pub fn find_top_level_statement_ranges_with(
    cleaned_text: &str,
    merge_runs: bool,
) -> Result<Vec<StatementRange>, NormalizeError> {
    let tokens = tokenize(cleaned_text)?;
    statement_ranges(&tokens, cleaned_text.lines().count(), merge_runs)
}

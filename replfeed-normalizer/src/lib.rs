//! # replfeed-normalizer
//!
//! Rewrites a snippet of indentation-delimited source (Python-style) so it can be fed,
//! line by line, into an interactive interpreter.
//!
//! Interactive prompts treat a blank line as "this block is finished", and they treat the
//! first unindented line after a block as a continuation error unless a blank line closes the
//! block first. The normalizer therefore:
//!
//!     1. drops every blank line that is not part of a string literal, and
//!     2. puts exactly one blank line in front of each top-level statement (except the first),
//!        leaving runs of one-line statements such as consecutive imports untouched.
//!
//! Everything else (line content, indentation, ordering) is preserved byte for byte.
//!
//! Layout
//!
//!     lexing        logos lexemes + the indentation mapper that yields [`Token`]s
//!     blank_lines   the blank-line remover
//!     parsing       the chumsky statement grammar and top-level [`StatementRange`]s
//!     assembling    separator insertion and final serialization
//!     transforms    the Runnable/Transform pipeline tying the stages together
//!
//! The whole thing is a pure function of its input: no I/O, no shared state.

pub mod assembling;
pub mod blank_lines;
pub mod error;
pub mod lexing;
pub mod lines;
pub mod options;
pub mod parsing;
pub mod token;
pub mod transforms;

pub use error::{LexError, NormalizeError, StructureError};
pub use lexing::tokenize;
pub use options::{LineEnding, NormalizeOptions};
pub use parsing::{find_top_level_statement_ranges, StatementRange};
pub use token::{Position, Token, TokenKind};

/// Normalize `source` with the default options (native line endings, one-liner runs merged).
pub fn normalize(source: &str) -> Result<String, NormalizeError> {
    transforms::standard::NORMALIZE.run(source.to_string())
}

/// Normalize `source` with explicit options.
pub fn normalize_with(source: &str, options: &NormalizeOptions) -> Result<String, NormalizeError> {
    transforms::standard::pipeline(options).run(source.to_string())
}

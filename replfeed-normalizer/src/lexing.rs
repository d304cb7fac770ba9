//! Tokenizer
//!
//!     Tokenization runs in two stages, the same way the raw lexer and the indentation
//!     transformation are split elsewhere in this codebase:
//!
//!         1. Base tokenization with logos. See [base_tokenization](base_tokenization).
//!            This yields flat lexemes (words, strings, comments, brackets, whitespace,
//!            newlines) with byte ranges. String literals are consumed whole by callbacks,
//!            so a newline or a `#` inside a string never reaches the later stage.
//!
//!         2. Indentation mapping. See [indentation](indentation).
//!            A stateful mapper walks the lexemes physical line by physical line and emits
//!            the semantic tokens: NEWLINE at the end of each logical line, one BLANK_LINE
//!            per whitespace-only physical line, INDENT / DEDENT on indentation changes.
//!
//! Positions
//!
//!     Lexemes carry byte ranges. The mapper converts them with [SourceLocation] into
//!     1-based lines and 0-based byte columns. Every token derived from a blank line starts
//!     and ends on that same line, which is what lets the blank-line remover map markers
//!     straight back onto the line sequence.

pub mod base_tokenization;
pub mod indentation;
pub mod location;

pub use base_tokenization::{Lexeme, LexemeError, StringStyle};
pub use indentation::IndentationMapper;
pub use location::SourceLocation;

use crate::error::LexError;
use crate::token::Token;
use log::trace;
use logos::Logos;

/// Tokenize `source` into semantic tokens.
///
/// Fails on the first lexical problem; there is no recovery.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexeme::lexer(source);
    let mut mapper = IndentationMapper::new(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(lexeme) => mapper.push(lexeme, span)?,
            Err(error) => return Err(mapper.lexeme_error(error, span)),
        }
    }

    let tokens = mapper.finish()?;
    trace!("tokenized {} bytes into {} tokens", source.len(), tokens.len());
    Ok(tokens)
}

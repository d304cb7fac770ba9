//! Error types for the normalization pipeline.

use thiserror::Error;

/// The raw text could not be tokenized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unterminated string literal at line {line}, column {column}")]
    UnterminatedString { line: usize, column: usize },

    #[error("unterminated triple-quoted string literal starting at line {line}, column {column}")]
    UnterminatedTripleQuotedString { line: usize, column: usize },

    #[error("unindent does not match any outer indentation level at line {line}")]
    InconsistentDedent { line: usize },

    #[error("inconsistent use of tabs and spaces in indentation at line {line}")]
    MixedIndentation { line: usize },

    #[error("unexpected end of input in a multi-line statement starting at line {line}")]
    UnexpectedEof { line: usize },

    #[error("unmatched {found:?} at line {line}, column {column}")]
    UnmatchedBracket {
        line: usize,
        column: usize,
        found: char,
    },

    #[error("unexpected character {found:?} at line {line}, column {column}")]
    UnexpectedCharacter {
        line: usize,
        column: usize,
        found: char,
    },
}

/// The cleaned text does not form a sequence of well-nested statements.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at line {line}, column {column}")]
pub struct StructureError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Any failure of a normalization call. There is never partial output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    #[error("lexical error: {0}")]
    Lexical(#[from] LexError),

    #[error("structural error: {0}")]
    Structural(#[from] StructureError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = NormalizeError::from(LexError::UnterminatedString { line: 2, column: 4 });
        assert_eq!(
            err.to_string(),
            "lexical error: unterminated string literal at line 2, column 4"
        );

        let err = NormalizeError::from(StructureError {
            line: 3,
            column: 4,
            message: "unexpected indent".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "structural error: unexpected indent at line 3, column 4"
        );
    }
}

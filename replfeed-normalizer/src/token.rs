//! Token types shared by the tokenizer, the blank-line remover and the statement grammar.

use serde::Serialize;
use std::fmt;

/// A position in the source. Lines are 1-based, columns are 0-based byte offsets into the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.line, self.column)
    }
}

/// What a token stands for.
///
/// `Newline`, `BlankLine`, `Indent` and `Dedent` are the markers the normalizer acts on.
/// `Comment`, `LineBreak` and `EndMarker` are reported so the token stream covers every line,
/// and `Other` is any real lexeme (names, numbers, strings, operators, brackets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenKind {
    /// End of a logical line.
    Newline,
    /// End of a physical line that does not end a logical line: comment-only lines and
    /// line breaks inside open brackets.
    LineBreak,
    /// A physical line holding nothing but whitespace.
    BlankLine,
    Indent,
    Dedent,
    Comment,
    Other,
    EndMarker,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Newline => "NEWLINE",
            TokenKind::LineBreak => "LINE_BREAK",
            TokenKind::BlankLine => "BLANK_LINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Comment => "COMMENT",
            TokenKind::Other => "OTHER",
            TokenKind::EndMarker => "END_MARKER",
        }
    }

    /// Kinds the statement grammar consumes. Everything else is layout noise.
    pub fn is_significant(&self) -> bool {
        matches!(
            self,
            TokenKind::Newline | TokenKind::Indent | TokenKind::Dedent | TokenKind::Other
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub start: Position,
    pub end: Position,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, start: Position, end: Position, text: impl Into<String>) -> Self {
        Self {
            kind,
            start,
            end,
            text: text.into(),
        }
    }

    /// A blank-line marker confined to a single physical line.
    pub fn is_blank_line_marker(&self) -> bool {
        self.kind == TokenKind::BlankLine && self.start.line == self.end.line
    }

    /// Short human description used in structural error messages.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Indent => "indent".to_string(),
            TokenKind::Dedent => "dedent".to_string(),
            TokenKind::Newline => "end of line".to_string(),
            _ => format!("{:?}", self.text),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {:?}", self.kind, self.start, self.end, self.text)
    }
}

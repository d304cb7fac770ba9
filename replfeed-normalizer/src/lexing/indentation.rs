//! Indentation mapper
//!
//!     Turns the flat logos lexemes into the semantic token stream. This is a stateful
//!     machine that tracks, per physical line, whether anything but whitespace was seen, and
//!     per logical line, whether any code was seen.
//!
//! Algorithm
//!
//!     1. Whitespace lexemes are dropped; indentation is read straight from the source slice
//!        between the start of the line and the first code lexeme.
//!     2. The first code lexeme of a logical line compares its indentation with the stack of
//!        open levels:
//!        - deeper: push a level and emit one Indent
//!        - shallower: pop levels, emitting one Dedent per level, until the column matches;
//!          no match is an inconsistent dedent
//!        - equal: nothing
//!     3. A newline lexeme ends the physical line:
//!        - nothing seen on the line: BlankLine (one per physical line, never merged)
//!        - code seen and no bracket open: Newline, which ends the logical line
//!        - otherwise (comment-only line, or inside brackets): LineBreak
//!     4. At end of input, close the last logical line, then emit a Dedent for every level
//!        still open and an EndMarker, all positioned one line past the last line.
//!
//!     Comment-only and blank lines never touch the indentation stack, and lines inside
//!     brackets or after a backslash continuation are never measured.
//!
//! Tabs
//!
//!     Columns are computed with tab stops every 8 columns. A second measure that counts a
//!     tab as one column catches indentation whose meaning depends on the tab size; that is
//!     reported as mixed indentation.

use super::base_tokenization::{Lexeme, LexemeError};
use super::location::SourceLocation;
use crate::error::LexError;
use crate::token::{Position, Token, TokenKind};
use std::cmp::Ordering;
use std::ops::Range;

const TAB_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Indentation {
    column: usize,
    alt_column: usize,
}

impl Indentation {
    const ZERO: Indentation = Indentation {
        column: 0,
        alt_column: 0,
    };

    fn measure(prefix: &str) -> Self {
        let mut column = 0;
        let mut alt_column = 0;
        for ch in prefix.chars() {
            match ch {
                '\t' => {
                    column = (column / TAB_SIZE + 1) * TAB_SIZE;
                    alt_column += 1;
                }
                // form feed resets the count
                '\x0C' => {
                    column = 0;
                    alt_column = 0;
                }
                _ => {
                    column += 1;
                    alt_column += 1;
                }
            }
        }
        Self { column, alt_column }
    }
}

fn closing_for(open: char) -> char {
    match open {
        '(' => ')',
        '[' => ']',
        _ => '}',
    }
}

/// Maps logos lexemes to semantic [`Token`]s. Feed lexemes in order with
/// [`push`](IndentationMapper::push), then call [`finish`](IndentationMapper::finish).
pub struct IndentationMapper<'a> {
    source: &'a str,
    location: SourceLocation,
    tokens: Vec<Token>,
    /// Open indentation levels; the bottom entry is column zero and is never popped.
    levels: Vec<Indentation>,
    /// Open brackets and where they were opened.
    brackets: Vec<(char, Position)>,
    line_has_content: bool,
    logical_has_code: bool,
    /// Line of a backslash continuation not yet followed by any content.
    continuation: Option<usize>,
}

impl<'a> IndentationMapper<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            location: SourceLocation::new(source),
            tokens: Vec::new(),
            levels: vec![Indentation::ZERO],
            brackets: Vec::new(),
            line_has_content: false,
            logical_has_code: false,
            continuation: None,
        }
    }

    pub fn push(&mut self, lexeme: Lexeme, span: Range<usize>) -> Result<(), LexError> {
        match lexeme {
            Lexeme::Whitespace => {}
            Lexeme::Newline => self.end_physical_line(span)?,
            Lexeme::Continuation => {
                self.continuation = Some(self.location.position(span.start).line);
                self.line_has_content = false;
            }
            Lexeme::Comment => {
                self.line_has_content = true;
                self.continuation = None;
                self.emit(TokenKind::Comment, span);
            }
            Lexeme::Open => {
                self.begin_code(span.start)?;
                let open = self.char_at(span.start);
                self.brackets
                    .push((open, self.location.position(span.start)));
                self.emit(TokenKind::Other, span);
            }
            Lexeme::Close => {
                self.begin_code(span.start)?;
                self.close_bracket(span.start)?;
                self.emit(TokenKind::Other, span);
            }
            Lexeme::String(_) | Lexeme::Word | Lexeme::Punct => {
                self.begin_code(span.start)?;
                self.emit(TokenKind::Other, span);
            }
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<Vec<Token>, LexError> {
        if let Some(&(_, opened_at)) = self.brackets.first() {
            return Err(LexError::UnexpectedEof {
                line: opened_at.line,
            });
        }
        if let Some(line) = self.continuation {
            return Err(LexError::UnexpectedEof { line });
        }

        let source = self.source;
        let end = self.location.position(source.len());
        if self.line_has_content {
            // last line has no terminator
            let kind = if self.logical_has_code {
                TokenKind::Newline
            } else {
                TokenKind::LineBreak
            };
            self.tokens.push(Token::new(kind, end, end, ""));
        } else if end.column > 0 {
            let text = &source[source.len() - end.column..];
            self.tokens.push(Token::new(
                TokenKind::BlankLine,
                Position::new(end.line, 0),
                end,
                text,
            ));
        }

        let eof = Position::new(source.lines().count() + 1, 0);
        while self.levels.len() > 1 {
            self.levels.pop();
            self.tokens.push(Token::new(TokenKind::Dedent, eof, eof, ""));
        }
        self.tokens
            .push(Token::new(TokenKind::EndMarker, eof, eof, ""));

        Ok(self.tokens)
    }

    /// Translate a logos failure into a positioned [`LexError`].
    pub fn lexeme_error(&self, error: LexemeError, span: Range<usize>) -> LexError {
        let Position { line, column } = self.location.position(span.start);
        match error {
            LexemeError::UnterminatedString => LexError::UnterminatedString { line, column },
            LexemeError::UnterminatedTripleQuotedString => {
                LexError::UnterminatedTripleQuotedString { line, column }
            }
            LexemeError::UnexpectedCharacter => LexError::UnexpectedCharacter {
                line,
                column,
                found: self.char_at(span.start),
            },
        }
    }

    fn char_at(&self, offset: usize) -> char {
        self.source[offset..].chars().next().unwrap_or('\0')
    }

    fn current_level(&self) -> Indentation {
        self.levels.last().copied().unwrap_or(Indentation::ZERO)
    }

    fn emit(&mut self, kind: TokenKind, span: Range<usize>) {
        let source = self.source;
        let start = self.location.position(span.start);
        let end = self.location.position(span.end);
        self.tokens
            .push(Token::new(kind, start, end, &source[span]));
    }

    fn begin_code(&mut self, offset: usize) -> Result<(), LexError> {
        if !self.logical_has_code {
            self.indent_to(offset)?;
            self.logical_has_code = true;
        }
        self.line_has_content = true;
        self.continuation = None;
        Ok(())
    }

    fn indent_to(&mut self, offset: usize) -> Result<(), LexError> {
        let source = self.source;
        let position = self.location.position(offset);
        let prefix = &source[offset - position.column..offset];
        let indentation = Indentation::measure(prefix);
        let line = position.line;

        let current = self.current_level();
        match indentation.column.cmp(&current.column) {
            Ordering::Equal => {
                if indentation.alt_column != current.alt_column {
                    return Err(LexError::MixedIndentation { line });
                }
            }
            Ordering::Greater => {
                if indentation.alt_column <= current.alt_column {
                    return Err(LexError::MixedIndentation { line });
                }
                self.levels.push(indentation);
                self.tokens.push(Token::new(
                    TokenKind::Indent,
                    Position::new(line, 0),
                    position,
                    prefix,
                ));
            }
            Ordering::Less => {
                while self.levels.len() > 1 && indentation.column < self.current_level().column {
                    self.levels.pop();
                    self.tokens
                        .push(Token::new(TokenKind::Dedent, position, position, ""));
                }
                let current = self.current_level();
                if indentation.column != current.column {
                    return Err(LexError::InconsistentDedent { line });
                }
                if indentation.alt_column != current.alt_column {
                    return Err(LexError::MixedIndentation { line });
                }
            }
        }
        Ok(())
    }

    fn close_bracket(&mut self, offset: usize) -> Result<(), LexError> {
        let found = self.char_at(offset);
        match self.brackets.pop() {
            Some((open, _)) if closing_for(open) == found => Ok(()),
            _ => {
                let Position { line, column } = self.location.position(offset);
                Err(LexError::UnmatchedBracket {
                    line,
                    column,
                    found,
                })
            }
        }
    }

    fn end_physical_line(&mut self, span: Range<usize>) -> Result<(), LexError> {
        let source = self.source;
        let start = self.location.position(span.start);
        let end = Position::new(start.line, start.column + span.len());

        if let Some(line) = self.continuation.filter(|_| !self.line_has_content) {
            // a continuation can't be followed by an empty line
            return Err(LexError::UnexpectedEof { line });
        }

        if !self.line_has_content {
            let text = &source[span.start - start.column..span.start];
            self.tokens.push(Token::new(
                TokenKind::BlankLine,
                Position::new(start.line, 0),
                start,
                text,
            ));
        } else if self.brackets.is_empty() && self.logical_has_code {
            self.tokens
                .push(Token::new(TokenKind::Newline, start, end, &source[span]));
            self.logical_has_code = false;
        } else {
            self.tokens
                .push(Token::new(TokenKind::LineBreak, start, end, &source[span]));
        }

        self.line_has_content = false;
        Ok(())
    }
}

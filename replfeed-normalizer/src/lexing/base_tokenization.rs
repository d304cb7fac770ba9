//! Raw lexemes
//!
//! The logos lexer only has to get three things right: where string literals start and end,
//! where comments are, and which characters open or close brackets. Everything else is
//! coarse (`Word`, `Punct`) because nothing downstream looks inside it.
//!
//! String literals are matched by their opening delimiter (with an optional prefix such as
//! `r`, `b`, `f`, `rb`) and the body is consumed by a callback, since a regex cannot express
//! "up to the matching unescaped quote" for triple-quoted strings across lines.

use logos::{Lexer, Logos};

/// Why logos gave up on a lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexemeError {
    #[default]
    UnexpectedCharacter,
    UnterminatedString,
    UnterminatedTripleQuotedString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringStyle {
    Single,
    Triple,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(error = LexemeError)]
pub enum Lexeme {
    #[regex(r"\r?\n")]
    Newline,

    // A lone `\r` is treated as horizontal space
    #[regex(r"[ \t\x0C\r]+")]
    Whitespace,

    #[regex(r"#[^\r\n]*")]
    Comment,

    /// Backslash line continuation, newline included.
    #[regex(r"\\\r?\n")]
    Continuation,

    #[regex(r"[(\[{]")]
    Open,

    #[regex(r"[)\]}]")]
    Close,

    #[regex(r#"[rRbBuUfF]{0,2}'"#, |lex| scan_string(lex, b'\'', StringStyle::Single))]
    #[regex(r#"[rRbBuUfF]{0,2}""#, |lex| scan_string(lex, b'"', StringStyle::Single))]
    #[regex(r#"[rRbBuUfF]{0,2}'''"#, |lex| scan_string(lex, b'\'', StringStyle::Triple))]
    #[regex(r#"[rRbBuUfF]{0,2}""""#, |lex| scan_string(lex, b'"', StringStyle::Triple))]
    String(StringStyle),

    #[regex(r"[A-Za-z0-9_\x{80}-\x{10FFFF}]+")]
    Word,

    #[regex(r"[!$%&*+,\-./:;<=>?@^|~`]")]
    Punct,
}

/// Consume a string body after its opening delimiter.
///
/// Scans bytes: every delimiter is ASCII, so a stop position is always a char boundary.
/// A backslash escapes the next byte (or the next `\r\n`), raw strings included.
fn scan_string(
    lex: &mut Lexer<'_, Lexeme>,
    quote: u8,
    style: StringStyle,
) -> Result<StringStyle, LexemeError> {
    let rest = lex.remainder().as_bytes();
    let closing: &[u8] = match style {
        StringStyle::Single => std::slice::from_ref(&quote),
        StringStyle::Triple => &[quote, quote, quote],
    };

    let mut i = 0;
    while i < rest.len() {
        match rest[i] {
            b'\\' => {
                i += if rest.get(i + 1) == Some(&b'\r') && rest.get(i + 2) == Some(&b'\n') {
                    3
                } else {
                    2
                };
            }
            b'\n' if style == StringStyle::Single => {
                lex.bump(i);
                return Err(LexemeError::UnterminatedString);
            }
            byte if byte == quote && rest[i..].starts_with(closing) => {
                lex.bump(i + closing.len());
                return Ok(style);
            }
            _ => i += 1,
        }
    }

    lex.bump(rest.len());
    Err(match style {
        StringStyle::Single => LexemeError::UnterminatedString,
        StringStyle::Triple => LexemeError::UnterminatedTripleQuotedString,
    })
}

//! Statement grammar
//!
//!     A chumsky grammar over the significant tokens (`Newline`, `Indent`, `Dedent`,
//!     `Other`). It recognizes only as much structure as statement boundaries need:
//!
//!         program   := statement* EOF
//!         statement := decorator* line suite? clause*
//!         clause    := clause_line suite?
//!         suite     := INDENT statement+ DEDENT
//!
//!     A line may only take a suite when its last lexeme is `:`; any other indented
//!     suite is reported as an unexpected indent. Clause lines start with
//!     `elif`, `else`, `except` or `finally`, so `if/elif/else`, `try/except/finally` and the
//!     `else` of loops fold into the statement that opened them; a clause after
//!     any other statement is an error. Decorator lines start
//!     with `@` and fold into the definition they decorate.

use chumsky::error::SimpleReason;
use chumsky::prelude::*;

use crate::error::StructureError;
use crate::token::{Position, Token, TokenKind};

type ParserError = Simple<Token>;

/// Keywords that continue the compound statement above them instead of starting a new one.
pub const CLAUSE_KEYWORDS: &[&str] = &["elif", "else", "except", "finally"];

/// Statements that may be continued by clause lines.
const CLAUSE_OWNERS: &[&str] = &["if", "for", "while", "try", "async"];

/// A statement as the grammar sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementNode {
    /// Where the first line (the first decorator, if any) starts.
    pub start: Position,
    /// Last physical line of the statement, suites and clauses included.
    pub end_line: usize,
    /// Statements nested in the suites of this statement and of its clauses.
    pub body: Vec<StatementNode>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct LogicalLine {
    head: Token,
    /// Index of `head` in the significant token stream.
    head_index: usize,
    end_line: usize,
    opens_block: bool,
}

impl LogicalLine {
    fn accepts_clauses(&self) -> bool {
        CLAUSE_OWNERS.contains(&self.head.text.as_str())
    }
}

type Block = (LogicalLine, Option<Vec<StatementNode>>);

impl StatementNode {
    fn from_parts(decorators: Vec<LogicalLine>, header: Block, clauses: Vec<Block>) -> Self {
        let start = decorators
            .first()
            .map_or(header.0.head.start, |decorator| decorator.head.start);

        let mut end_line = header.0.end_line;
        let mut body = Vec::new();
        for (line, suite) in std::iter::once(header).chain(clauses) {
            end_line = end_line.max(line.end_line);
            if let Some(suite) = suite {
                if let Some(last) = suite.last() {
                    end_line = end_line.max(last.end_line);
                }
                body.extend(suite);
            }
        }

        Self {
            start,
            end_line,
            body,
        }
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end_line
    }
}

fn is_decorator(token: &Token) -> bool {
    token.text == "@"
}

fn is_clause(token: &Token) -> bool {
    CLAUSE_KEYWORDS.contains(&token.text.as_str())
}

fn is_header(token: &Token) -> bool {
    !is_decorator(token) && !is_clause(token)
}

fn kind(expected: TokenKind) -> impl Parser<Token, Token, Error = ParserError> + Clone {
    filter(move |token: &Token| token.kind == expected)
}

/// One logical line whose first lexeme satisfies `first`.
fn logical_line(
    first: fn(&Token) -> bool,
) -> impl Parser<Token, LogicalLine, Error = ParserError> + Clone {
    filter(move |token: &Token| token.kind == TokenKind::Other && first(token))
        .map_with_span(|head, span: std::ops::Range<usize>| (head, span.start))
        .then(kind(TokenKind::Other).repeated())
        .then(kind(TokenKind::Newline))
        .map(|(((head, head_index), rest), newline)| {
            let opens_block = rest.last().unwrap_or(&head).text == ":";
            LogicalLine {
                head,
                head_index,
                end_line: newline.start.line,
                opens_block,
            }
        })
}

fn statement() -> impl Parser<Token, StatementNode, Error = ParserError> + Clone {
    recursive(|statement| {
        let suite = kind(TokenKind::Indent)
            .map_with_span(|_, span| span)
            .then(statement.repeated().at_least(1))
            .then_ignore(kind(TokenKind::Dedent));

        let block = |first: fn(&Token) -> bool| {
            logical_line(first)
                .then(suite.clone().or_not())
                .validate(|(line, suite), _, emit| {
                    if let Some((indent, _)) = &suite {
                        if !line.opens_block {
                            emit(Simple::custom(indent.clone(), "unexpected indent"));
                        }
                    }
                    (line, suite.map(|(_, body)| body))
                })
        };

        logical_line(is_decorator)
            .repeated()
            .then(block(is_header))
            .then(block(is_clause).repeated())
            .validate(|((decorators, header), clauses), _, emit| {
                if let Some((clause, _)) = clauses.first() {
                    if !header.0.accepts_clauses() {
                        let index = clause.head_index;
                        emit(Simple::custom(
                            index..index + 1,
                            format!("unexpected {}", clause.head.describe()),
                        ));
                    }
                }
                StatementNode::from_parts(decorators, header, clauses)
            })
    })
}

fn program() -> impl Parser<Token, Vec<StatementNode>, Error = ParserError> {
    statement().repeated().then_ignore(end())
}

/// Parse the statements of a token stream.
///
/// Non-significant tokens (comments, line breaks, blank-line markers, the end marker) are
/// dropped before parsing. On failure, the first error is reported at the token the
/// grammar could not accept.
pub fn parse_statements(tokens: &[Token]) -> Result<Vec<StatementNode>, StructureError> {
    let significant: Vec<Token> = tokens
        .iter()
        .filter(|token| token.kind.is_significant())
        .cloned()
        .collect();
    let eof = tokens
        .last()
        .map_or(Position::new(1, 0), |token| token.start);

    program()
        .parse(significant.clone())
        .map_err(|errors| match errors.first() {
            Some(error) => structure_error(error, &significant, eof),
            None => StructureError {
                line: eof.line,
                column: eof.column,
                message: "invalid statement structure".to_string(),
            },
        })
}

fn structure_error(error: &ParserError, tokens: &[Token], eof: Position) -> StructureError {
    let (token, message) = match error.reason() {
        SimpleReason::Custom(message) => (tokens.get(error.span().start), message.clone()),
        _ => {
            let message = match error.found() {
                Some(token) if token.kind == TokenKind::Indent => "unexpected indent".to_string(),
                Some(token) if token.kind == TokenKind::Dedent => "unexpected dedent".to_string(),
                Some(token) => format!("unexpected {}", token.describe()),
                None => "unexpected end of input".to_string(),
            };
            (error.found(), message)
        }
    };

    let position = token.map_or(eof, |token| token.start);
    StructureError {
        line: position.line,
        column: position.column,
        message,
    }
}

//! Pipeline stages
//!
//! Each stage consumes one pipeline state and produces the next. States are plain data;
//! nothing is shared between calls.

use crate::assembling::{assemble, insert_separators};
use crate::blank_lines::remove_blank_lines;
use crate::error::NormalizeError;
use crate::lexing::tokenize;
use crate::lines::{has_trailing_blank, join_for_analysis, split_lines};
use crate::options::LineEnding;
use crate::parsing::{statement_ranges, StatementRange};
use crate::token::Token;
use crate::transforms::Runnable;
use log::{debug, trace};

/// Raw input plus its first-pass tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Tokenized {
    pub source: String,
    pub tokens: Vec<Token>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BlankLinesRemoved {
    pub lines: Vec<String>,
    /// Captured from the raw input, before any line was removed.
    pub trailing_blank: bool,
}

/// Cleaned lines plus tokens of the cleaned text, so positions match the current lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Retokenized {
    pub lines: Vec<String>,
    pub tokens: Vec<Token>,
    pub trailing_blank: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundariesFound {
    pub lines: Vec<String>,
    pub ranges: Vec<StatementRange>,
    pub trailing_blank: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeparatorsInserted {
    pub lines: Vec<String>,
    pub trailing_blank: bool,
}

/// String → Tokenized
#[derive(Debug, Default)]
pub struct Tokenization;

impl Tokenization {
    pub fn new() -> Self {
        Tokenization
    }
}

impl Runnable<String, Tokenized> for Tokenization {
    fn run(&self, source: String) -> Result<Tokenized, NormalizeError> {
        let tokens = tokenize(&source)?;
        trace!("first pass tokens: {:?}", tokens);
        Ok(Tokenized { source, tokens })
    }
}

/// Tokenized → BlankLinesRemoved
#[derive(Debug, Default)]
pub struct BlankLineRemoval;

impl BlankLineRemoval {
    pub fn new() -> Self {
        BlankLineRemoval
    }
}

impl Runnable<Tokenized, BlankLinesRemoved> for BlankLineRemoval {
    fn run(&self, input: Tokenized) -> Result<BlankLinesRemoved, NormalizeError> {
        let trailing_blank = has_trailing_blank(&input.source);
        let lines = remove_blank_lines(split_lines(&input.source), &input.tokens);
        Ok(BlankLinesRemoved {
            lines,
            trailing_blank,
        })
    }
}

/// BlankLinesRemoved → Retokenized
///
/// Line numbers from the first pass are stale once lines are gone, so the cleaned text is
/// tokenized from scratch.
#[derive(Debug, Default)]
pub struct Retokenization;

impl Retokenization {
    pub fn new() -> Self {
        Retokenization
    }
}

impl Runnable<BlankLinesRemoved, Retokenized> for Retokenization {
    fn run(&self, input: BlankLinesRemoved) -> Result<Retokenized, NormalizeError> {
        let tokens = tokenize(&join_for_analysis(&input.lines))?;
        debug!("re-tokenized {} cleaned lines", input.lines.len());
        Ok(Retokenized {
            lines: input.lines,
            tokens,
            trailing_blank: input.trailing_blank,
        })
    }
}

/// Retokenized → BoundariesFound
#[derive(Debug)]
pub struct BoundaryAnalysis {
    merge_single_line_runs: bool,
}

impl BoundaryAnalysis {
    pub fn new(merge_single_line_runs: bool) -> Self {
        Self {
            merge_single_line_runs,
        }
    }
}

impl Default for BoundaryAnalysis {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Runnable<Retokenized, BoundariesFound> for BoundaryAnalysis {
    fn run(&self, input: Retokenized) -> Result<BoundariesFound, NormalizeError> {
        let ranges = statement_ranges(
            &input.tokens,
            input.lines.len(),
            self.merge_single_line_runs,
        )?;
        Ok(BoundariesFound {
            lines: input.lines,
            ranges,
            trailing_blank: input.trailing_blank,
        })
    }
}

/// BoundariesFound → SeparatorsInserted
#[derive(Debug, Default)]
pub struct SeparatorInsertion;

impl SeparatorInsertion {
    pub fn new() -> Self {
        SeparatorInsertion
    }
}

impl Runnable<BoundariesFound, SeparatorsInserted> for SeparatorInsertion {
    fn run(&self, input: BoundariesFound) -> Result<SeparatorsInserted, NormalizeError> {
        Ok(SeparatorsInserted {
            lines: insert_separators(input.lines, &input.ranges),
            trailing_blank: input.trailing_blank,
        })
    }
}

/// SeparatorsInserted → String
#[derive(Debug, Default)]
pub struct Assembly {
    line_ending: LineEnding,
}

impl Assembly {
    pub fn new(line_ending: LineEnding) -> Self {
        Self { line_ending }
    }
}

impl Runnable<SeparatorsInserted, String> for Assembly {
    fn run(&self, input: SeparatorsInserted) -> Result<String, NormalizeError> {
        Ok(assemble(
            &input.lines,
            input.trailing_blank,
            self.line_ending,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(lines: &[&str]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_blank_line_removal_captures_trailing_flag() {
        let tokenized = Tokenization::new().run("a = 1\n\n".to_string()).unwrap();
        let removed = BlankLineRemoval::new().run(tokenized).unwrap();
        assert_eq!(removed.lines, owned(&["a = 1"]));
        assert!(removed.trailing_blank);
    }

    #[test]
    fn test_retokenization_uses_cleaned_positions() {
        let tokenized = Tokenization::new()
            .run("def f():\n\n    pass\n".to_string())
            .unwrap();
        let removed = BlankLineRemoval::new().run(tokenized).unwrap();
        let retokenized = Retokenization::new().run(removed).unwrap();
        let pass = retokenized
            .tokens
            .iter()
            .find(|t| t.text == "pass")
            .unwrap();
        assert_eq!(pass.start.line, 2);
    }

    #[test]
    fn test_boundary_analysis_without_merging() {
        let input = Retokenized {
            lines: owned(&["a", "b"]),
            tokens: tokenize("a\nb").unwrap(),
            trailing_blank: false,
        };
        let found = BoundaryAnalysis::new(false).run(input).unwrap();
        assert_eq!(
            found.ranges,
            vec![StatementRange::new(1, 1), StatementRange::new(2, 2)]
        );
    }

    #[test]
    fn test_assembly_line_ending() {
        let input = SeparatorsInserted {
            lines: owned(&["a", "", "b"]),
            trailing_blank: true,
        };
        assert_eq!(
            Assembly::new(LineEnding::Crlf).run(input).unwrap(),
            "a\r\n\r\nb\r\n"
        );
    }
}

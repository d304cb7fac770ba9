//! Property-based tests for normalization
//!
//! Programs are generated from top-level blocks (one-liners, function definitions and
//! if/else statements), with runs of blank or whitespace-only lines sprinkled between any
//! two lines, including inside blocks.

use proptest::prelude::*;
use replfeed_normalizer::{normalize_with, LineEnding, NormalizeOptions};

fn options() -> NormalizeOptions {
    NormalizeOptions {
        line_ending: LineEnding::Lf,
        merge_single_line_runs: true,
    }
}

fn normalize(source: &str) -> String {
    normalize_with(source, &options()).expect("generated programs are valid")
}

/// Generate a run of blank lines (possibly holding whitespace)
fn blank_lines() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just(String::new()),
            Just("    ".to_string()),
            Just("\t".to_string()),
        ],
        0..3,
    )
}

/// Generate a one-line statement
fn simple_statement() -> impl Strategy<Value = String> {
    prop_oneof![
        ("[a-z]{1,6}", 0..1000u32).prop_map(|(name, value)| format!("v_{name} = {value}")),
        "[a-z]{1,6}".prop_map(|name| format!("print(v_{name})")),
        "[a-z]{1,6}".prop_map(|name| format!("import m_{name}")),
    ]
}

/// Generate a top-level block as its lines
fn block() -> impl Strategy<Value = Vec<String>> {
    prop_oneof![
        simple_statement().prop_map(|line| vec![line]),
        ("[a-z]{1,6}", prop::collection::vec(simple_statement(), 1..4)).prop_map(
            |(name, body)| {
                let mut lines = vec![format!("def f_{name}():")];
                lines.extend(body.into_iter().map(|line| format!("    {line}")));
                lines
            }
        ),
        (simple_statement(), simple_statement()).prop_map(|(then, otherwise)| {
            vec![
                "if ready:".to_string(),
                format!("    {then}"),
                "else:".to_string(),
                format!("    {otherwise}"),
            ]
        }),
    ]
}

/// Generate a whole program, with 0, 1 or 2 trailing terminators
fn program() -> impl Strategy<Value = String> {
    (
        prop::collection::vec(block(), 1..6),
        prop::collection::vec(blank_lines(), 8),
        0..3usize,
    )
        .prop_map(|(blocks, blanks, trailing)| {
            let mut lines: Vec<String> = Vec::new();
            for (index, line) in blocks.into_iter().flatten().enumerate() {
                if index > 0 {
                    lines.extend(blanks[index % blanks.len()].iter().cloned());
                }
                lines.push(line);
            }
            let mut text = lines.join("\n");
            text.push_str(&"\n".repeat(trailing));
            text
        })
}

fn content_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

proptest! {
    #[test]
    fn test_normalize_is_idempotent(source in program()) {
        let once = normalize(&source);
        let twice = normalize(&once);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn test_content_lines_are_preserved(source in program()) {
        let output = normalize(&source);
        prop_assert_eq!(content_lines(&output), content_lines(&source));
    }

    #[test]
    fn test_trailing_terminator_fidelity(source in program()) {
        let output = normalize(&source);
        prop_assert_eq!(output.ends_with('\n'), source.ends_with('\n'));
        prop_assert!(!output.ends_with("\n\n"));
    }

    #[test]
    fn test_separators_only_between_top_level_statements(source in program()) {
        let output = normalize(&source);
        let lines: Vec<&str> = output.lines().collect();
        for (index, line) in lines.iter().enumerate() {
            if !line.is_empty() {
                continue;
            }
            // never first, never doubled, never in front of an indented line
            prop_assert!(index > 0);
            let next = lines[index + 1];
            prop_assert!(!next.is_empty());
            prop_assert!(!next.starts_with(' '));
            // a one-liner following a one-liner is never separated
            let previous = lines[index - 1];
            prop_assert!(previous.starts_with(' ') || next.ends_with(':'));
        }
    }
}

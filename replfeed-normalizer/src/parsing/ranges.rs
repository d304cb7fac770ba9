//! Top-level statement ranges.
//!
//! A range runs from a statement's start line to the line before the next top-level
//! statement starts, so comments trailing a statement belong to it. The last range ends on
//! the last line.

use serde::Serialize;

use super::grammar::StatementNode;

/// Inclusive, 1-based line range of one top-level statement (or of a merged run of
/// one-line statements).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementRange {
    pub start_line: usize,
    pub end_line: usize,
    pub is_single_line: bool,
}

impl StatementRange {
    pub fn new(start_line: usize, end_line: usize) -> Self {
        Self {
            start_line,
            end_line,
            is_single_line: start_line == end_line,
        }
    }
}

/// Start lines of the top-level statements, ascending and deduplicated.
pub fn top_level_start_lines(nodes: &[StatementNode]) -> Vec<usize> {
    let mut starts: Vec<usize> = nodes.iter().map(|node| node.start.line).collect();
    starts.sort_unstable();
    starts.dedup();
    starts
}

/// Turn sorted start lines into ranges ending just before the next start.
pub fn ranges_from_start_lines(starts: &[usize], last_line: usize) -> Vec<StatementRange> {
    starts
        .iter()
        .enumerate()
        .map(|(index, &start)| {
            let end = starts
                .get(index + 1)
                .map_or(last_line, |next| next - 1)
                .max(start);
            StatementRange::new(start, end)
        })
        .collect()
}

/// Collapse each run of consecutive one-line ranges into a single range.
///
/// Multi-line ranges are never merged with their neighbours.
pub fn merge_single_line_runs(ranges: Vec<StatementRange>) -> Vec<StatementRange> {
    let mut merged: Vec<StatementRange> = Vec::with_capacity(ranges.len());
    let mut in_run = false;

    for range in ranges {
        match merged.last_mut() {
            Some(last) if in_run && range.is_single_line => {
                *last = StatementRange::new(last.start_line, range.end_line);
            }
            _ => merged.push(range),
        }
        in_run = range.is_single_line;
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(ranges: &[StatementRange]) -> Vec<(usize, usize)> {
        ranges.iter().map(|r| (r.start_line, r.end_line)).collect()
    }

    #[test]
    fn test_ranges_end_before_next_start() {
        let ranges = ranges_from_start_lines(&[1, 3, 4], 6);
        assert_eq!(spans(&ranges), vec![(1, 2), (3, 3), (4, 6)]);
        assert!(!ranges[0].is_single_line);
        assert!(ranges[1].is_single_line);
    }

    #[test]
    fn test_no_statements() {
        assert!(ranges_from_start_lines(&[], 3).is_empty());
    }

    #[test]
    fn test_merges_runs_of_single_lines() {
        let ranges = ranges_from_start_lines(&[1, 2, 3, 4, 6, 7], 7);
        let merged = merge_single_line_runs(ranges);
        assert_eq!(spans(&merged), vec![(1, 3), (4, 5), (6, 7)]);
    }

    #[test]
    fn test_multi_line_range_breaks_a_run() {
        let ranges = ranges_from_start_lines(&[1, 2, 4], 4);
        let merged = merge_single_line_runs(ranges);
        assert_eq!(spans(&merged), vec![(1, 1), (2, 3), (4, 4)]);
    }

    #[test]
    fn test_merged_range_is_not_single_line() {
        let merged = merge_single_line_runs(ranges_from_start_lines(&[1, 2], 2));
        assert_eq!(merged, vec![StatementRange::new(1, 2)]);
        assert!(!merged[0].is_single_line);
    }
}

//! The line sequence threaded through the pipeline.
//!
//! Lines never carry their terminators. `\n` and `\r\n` are both accepted on input.

/// Split `source` into lines without terminators.
pub fn split_lines(source: &str) -> Vec<String> {
    source.lines().map(str::to_owned).collect()
}

/// Whether the input ends in a line terminator or in a whitespace-only line.
///
/// Captured once from the original input; the assembler restores exactly one trailing
/// terminator when this is set, however many blank lines were stripped.
pub fn has_trailing_blank(source: &str) -> bool {
    source.ends_with('\n')
        || source
            .lines()
            .last()
            .is_some_and(|line| line.trim().is_empty())
}

/// Join lines for re-tokenization. Always `\n`: positions only depend on line boundaries.
pub fn join_for_analysis(lines: &[String]) -> String {
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_lines_drops_terminators() {
        assert_eq!(split_lines("a\r\nb\nc"), vec!["a", "b", "c"]);
        assert_eq!(split_lines("a\n\n"), vec!["a", ""]);
        assert!(split_lines("").is_empty());
    }

    #[test]
    fn test_trailing_blank() {
        assert!(has_trailing_blank("x = 1\n"));
        assert!(has_trailing_blank("x = 1\r\n"));
        assert!(has_trailing_blank("x = 1\n    "));
        assert!(!has_trailing_blank("x = 1"));
        assert!(!has_trailing_blank(""));
    }
}

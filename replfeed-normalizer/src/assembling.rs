//! Separator insertion and final assembly.

use crate::options::LineEnding;
use crate::parsing::StatementRange;
use log::debug;

/// Insert one empty line before every range after the first.
///
/// Insertion runs from the last range backwards so earlier start lines stay valid. A range
/// starting on line 1 never gets a separator.
pub fn insert_separators(mut lines: Vec<String>, ranges: &[StatementRange]) -> Vec<String> {
    let mut inserted = 0;
    for range in ranges.iter().skip(1).rev() {
        if range.start_line > 1 && range.start_line - 1 <= lines.len() {
            lines.insert(range.start_line - 1, String::new());
            inserted += 1;
        }
    }
    debug!("inserted {} statement separators", inserted);
    lines
}

/// Join `lines` with `line_ending`, restoring one trailing terminator when requested.
pub fn assemble(lines: &[String], trailing_blank: bool, line_ending: LineEnding) -> String {
    let terminator = line_ending.as_str();
    let mut output = lines.join(terminator);
    if trailing_blank {
        output.push_str(terminator);
    }
    output
}

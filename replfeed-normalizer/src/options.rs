//! Knobs for a normalization call.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Line terminator used when the normalized lines are joined back together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    /// Whatever the host platform uses.
    #[default]
    Native,
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Native => {
                if cfg!(windows) {
                    "\r\n"
                } else {
                    "\n"
                }
            }
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LineEnding::Native => "native",
            LineEnding::Lf => "lf",
            LineEnding::Crlf => "crlf",
        };
        f.write_str(name)
    }
}

impl FromStr for LineEnding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "native" => Ok(LineEnding::Native),
            "lf" => Ok(LineEnding::Lf),
            "crlf" => Ok(LineEnding::Crlf),
            other => Err(format!(
                "unknown line ending '{other}' (expected native, lf or crlf)"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    pub line_ending: LineEnding,
    /// Treat a run of consecutive one-line top-level statements as a single block, so no
    /// separators are put between them.
    pub merge_single_line_runs: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::Native,
            merge_single_line_runs: true,
        }
    }
}

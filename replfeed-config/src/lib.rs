//! Configuration for the replfeed front ends.
//!
//! Settings resolve in three layers, later ones winning:
//!
//! 1. `defaults/replfeed.default.toml`, compiled into the crate
//! 2. a TOML file: `--config <file>`, or `replfeed.toml` in the working directory
//! 3. command-line flags, applied as key overrides (`normalize.line_ending`, ...)
//!
//! The result deserializes into [`ReplfeedConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use replfeed_normalizer::{LineEnding, NormalizeOptions};
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/replfeed.default.toml");

/// Top-level configuration consumed by replfeed applications.
#[derive(Debug, Clone, Deserialize)]
pub struct ReplfeedConfig {
    pub normalize: NormalizeConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Mirrors the knobs exposed by the normalizer.
#[derive(Debug, Clone, Deserialize)]
pub struct NormalizeConfig {
    pub line_ending: LineEnding,
    pub merge_single_line_runs: bool,
}

impl NormalizeConfig {
    pub fn options(&self) -> NormalizeOptions {
        NormalizeOptions {
            line_ending: self.line_ending,
            merge_single_line_runs: self.merge_single_line_runs,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub on_error: ErrorPolicy,
}

/// What a front end does when normalization fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Report the error and exit non-zero.
    Fail,
    /// Log the error and emit the input unchanged.
    Passthrough,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Stacks the three layers; call [`build`](Loader::build) once everything is added.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Loader holding only the compiled-in defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Add a file the user named explicitly; `build` fails if it can't be read.
    pub fn with_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), true)
    }

    /// Add a file that may be absent, such as `replfeed.toml` in the working directory.
    pub fn with_optional_file(self, path: impl AsRef<Path>) -> Self {
        self.with_toml(path.as_ref(), false)
    }

    /// Override one dotted key, e.g. `output.on_error`. Flags go through here.
    pub fn set_override(
        self,
        key: &str,
        value: impl Into<ValueKind>,
    ) -> Result<Self, ConfigError> {
        let builder = self.builder.set_override(key, value)?;
        Ok(Self { builder })
    }

    /// Merge the layers and deserialize them.
    pub fn build(self) -> Result<ReplfeedConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }

    fn with_toml(self, path: &Path, required: bool) -> Self {
        let source = File::from(path).format(FileFormat::Toml).required(required);
        Self {
            builder: self.builder.add_source(source),
        }
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// The compiled-in defaults, with no file or flags applied.
pub fn load_defaults() -> Result<ReplfeedConfig, ConfigError> {
    Loader::new().build()
}

//! Standard transform definitions
//!
//! Pre-built pipelines. The defaults are `once_cell::sync::Lazy` statics; custom options
//! get a freshly built pipeline.

use crate::options::NormalizeOptions;
use crate::transforms::stages::{
    Assembly, BlankLineRemoval, BoundariesFound, BoundaryAnalysis, Retokenization,
    SeparatorInsertion, Tokenization,
};
use crate::transforms::Transform;
use once_cell::sync::Lazy;

pub type NormalizeTransform = Transform<String, String>;

pub type AnalysisTransform = Transform<String, BoundariesFound>;

/// Source text → cleaned lines with their top-level statement ranges.
///
/// Runs tokenization, blank-line removal, re-tokenization and boundary analysis.
pub fn analysis(merge_single_line_runs: bool) -> AnalysisTransform {
    Transform::from_fn(Ok)
        .then(Tokenization::new())
        .then(BlankLineRemoval::new())
        .then(Retokenization::new())
        .then(BoundaryAnalysis::new(merge_single_line_runs))
}

/// Full normalization pipeline for `options`.
pub fn pipeline(options: &NormalizeOptions) -> NormalizeTransform {
    analysis(options.merge_single_line_runs)
        .then(SeparatorInsertion::new())
        .then(Assembly::new(options.line_ending))
}

/// Analysis with one-liner runs merged.
pub static ANALYSIS: Lazy<AnalysisTransform> = Lazy::new(|| analysis(true));

/// Normalization with the default options.
///
/// ```rust,ignore
/// use replfeed_normalizer::transforms::standard::NORMALIZE;
///
/// let out = NORMALIZE.run("a = 1\n\nb = 2\n".to_string())?;
/// ```
pub static NORMALIZE: Lazy<NormalizeTransform> =
    Lazy::new(|| pipeline(&NormalizeOptions::default()));

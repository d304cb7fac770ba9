//! Transform pipeline infrastructure
//!
//! Normalization is a chain of stages, each turning one pipeline state into the next:
//!
//! ```text
//! String → Tokenized → BlankLinesRemoved → Retokenized → BoundariesFound
//!        → SeparatorsInserted → String
//! ```
//!
//! ## The `Runnable` Trait
//!
//! Every stage implements `Runnable<I, O>`. A stage that fails returns a
//! [`NormalizeError`] and the pipeline stops there; there is no partial output.
//!
//! ## The `Transform<I, O>` Type
//!
//! A boxed, composable pipeline. `.then()` appends a stage whose input type matches the
//! current output type, so a mis-ordered pipeline does not compile:
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(Tokenization::new())   // String → Tokenized
//!     .then(BlankLineRemoval::new()); // Tokenized → BlankLinesRemoved
//! ```
//!
//! ## Static Lazy Transforms
//!
//! The default pipeline is built once as a `once_cell::sync::Lazy` static. Transforms are
//! `Send + Sync`, so one static can serve any number of threads. See [`standard`].

pub mod stages;
pub mod standard;

use crate::error::NormalizeError;

/// Anything that turns an `I` into an `O`, or fails with a [`NormalizeError`].
pub trait Runnable<I, O> {
    fn run(&self, input: I) -> Result<O, NormalizeError>;
}

/// A composable transformation pipeline from `I` to `O`.
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, NormalizeError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, NormalizeError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Append a stage, returning a transform from `I` to the stage's output.
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, NormalizeError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, NormalizeError> {
        Transform::run(self, input)
    }
}

//! Error type shared by every optimizer in the crate.

use thiserror::Error;

/// Errors raised by configuration checks, strategies, and collaborators.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A strategy selector name did not match any known variant.
    #[error("unknown {kind} strategy: {value:?}")]
    UnknownStrategy {
        /// Which selector family was being parsed (e.g. `"selection"`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Input to a numeric routine was unusable (empty, negative, non-finite).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An operation needed at least one population member.
    #[error("population is empty")]
    EmptyPopulation,

    /// A strategy was asked to work on a degenerate shape, such as a
    /// zero-length chromosome or an empty tournament.
    #[error("degenerate input: {0}")]
    Degenerate(String),

    /// The fitness function returned a value outside its contract.
    #[error("fitness function returned {value}, expected a finite non-negative value")]
    InvalidFitness {
        /// The offending value.
        value: f64,
    },

    /// A weight store has no entry under the requested identifier.
    #[error("no stored weights for {0:?}")]
    NotFound(String),

    /// I/O failure while writing results.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

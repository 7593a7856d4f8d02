//! # Error Types
//!
//! This module defines the error type shared by every operator in the crate.
//! The search engine is a closed numerical system, so every variant describes a
//! precondition violation (a malformed truth table, an impossible weight target,
//! an invalid configuration) rather than a transient run-time failure. Nothing
//! here is meant to be retried.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use walshga::error::{GeneticError, Result};
//!
//! fn check_weight(weight: usize, length: usize) -> Result<()> {
//!     if weight > length {
//!         return Err(GeneticError::WeightOutOfRange { weight, length });
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_weight(4, 8).is_ok());
//! assert!(check_weight(9, 8).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use walshga::error::{GeneticError, OptionExt};
//!
//! fn first_fitness(fitness: &[f64]) -> walshga::error::Result<f64> {
//!     fitness.first().copied().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(first_fitness(&[]).is_err());
//! ```

use thiserror::Error;

/// Represents errors that can occur while searching for Boolean functions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneticError {
    /// Error that occurs when an invalid configuration is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when a crossover operator receives parents it cannot combine.
    #[error("Crossover error: {0}")]
    Crossover(String),

    /// Error that occurs when a mutation operator cannot be applied.
    #[error("Mutation error: {0}")]
    Mutation(String),

    /// Error that occurs when a bit vector is not a valid truth table.
    #[error("Invalid truth table: {0}")]
    InvalidTruthTable(String),

    /// Error that occurs when two sequences that must agree in length do not.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Error that occurs when a Hamming weight target cannot fit the bitstring.
    #[error("Weight {weight} is out of range for length {length}")]
    WeightOutOfRange { weight: usize, length: usize },

    /// Error that occurs when parent selection or replacement fails.
    #[error("Selection error: {0}")]
    Selection(String),

    /// Error that occurs when the local search receives inconsistent input.
    #[error("Local search error: {0}")]
    LocalSearch(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when NaN or infinity values are encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),
}

/// A specialized Result type for search operations.
///
/// This type is a convenience wrapper around `std::result::Result` with the error type
/// fixed to `GeneticError`.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
///
/// ## Examples
///
/// ```rust
/// use walshga::error::{GeneticError, OptionExt};
///
/// let best: Option<usize> = None;
/// let result = best.ok_or_else_genetic(|| GeneticError::EmptyPopulation);
/// assert_eq!(result, Err(GeneticError::EmptyPopulation));
/// ```
pub trait OptionExt<T> {
    /// Converts an Option to a Result using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Checks that a probability lies in `[0, 1]` and is finite.
///
/// # Errors
///
/// Returns `GeneticError::InvalidNumericValue` naming `what` if the value is NaN,
/// infinite, or outside the unit interval.
pub fn check_probability(value: f64, what: &str) -> Result<()> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(GeneticError::InvalidNumericValue(format!(
            "{} must be a probability in [0, 1], got {}",
            what, value
        )));
    }
    Ok(())
}

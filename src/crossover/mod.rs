//! # Crossover Operators
//!
//! Recombination operators over bitstrings. Apart from the classic one-point
//! crossover, every operator builds a child with an exact Hamming weight by
//! construction, so no repair step is ever needed:
//!
//! - [`counter`]: copies parent bits while counting ones and zeros, forcing
//!   the remaining value once either quota is reached. The unbalanced variant
//!   lets the saturated value overshoot with a given probability.
//! - [`zero_lengths`]: recombines the run lengths of zeros between ones.
//! - [`one_map`]: recombines the sets of positions holding a one.
//! - [`matrix`]: applies any of the above column by column to binary matrices.
//!
//! The `shuffle` flag changes the order in which child positions are filled
//! (a uniformly random permutation instead of the identity). It never changes
//! which source index a value is read from.
//!
//! ## Example
//!
//! ```rust
//! use walshga::boolfun::hamming_weight;
//! use walshga::crossover::CrossoverOperator;
//! use walshga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(42);
//! let parent1 = vec![false, true, true, false, true, false, false, true];
//! let parent2 = vec![true, true, false, false, false, false, true, true];
//!
//! let child = CrossoverOperator::BalancedCounter
//!     .cross(&parent1, &parent2, 4, true, &mut rng)
//!     .unwrap();
//! assert_eq!(hamming_weight(&child), 4);
//! ```

pub mod counter;
pub mod matrix;
pub mod one_map;
pub mod one_point;
pub mod zero_lengths;

use std::fmt;

use crate::error::{check_probability, GeneticError, Result};
use crate::rng::RandomSource;

pub use counter::{balanced_counter_crossover, unbalanced_counter_crossover};
pub use matrix::{cross_matrix, transpose};
pub use one_map::one_map_crossover;
pub use one_point::one_point_crossover;
pub use zero_lengths::zero_lengths_crossover;

/// The available crossover operators.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrossoverOperator {
    /// Classic one-point crossover; one of the two children is kept at random.
    OnePoint,
    /// Counter-based crossover with exact weight.
    BalancedCounter,
    /// Crossover on the run lengths of zeros, with exact weight.
    ZeroLengths,
    /// Uniform crossover on the positions of ones, with exact weight.
    OneMap,
    /// Counter-based crossover that may overshoot the weight with probability `unbalance_p`.
    UnbalancedCounter { unbalance_p: f64 },
}

impl CrossoverOperator {
    /// Maps the integer operator codes used by command-line drivers.
    ///
    /// `0`: one-point, `1`: balanced counter, `2`: zero lengths, `3`: one map,
    /// `4`: unbalanced counter with the given probability.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for any other code.
    pub fn from_code(code: u8, unbalance_p: f64) -> Result<Self> {
        match code {
            0 => Ok(Self::OnePoint),
            1 => Ok(Self::BalancedCounter),
            2 => Ok(Self::ZeroLengths),
            3 => Ok(Self::OneMap),
            4 => {
                check_probability(unbalance_p, "unbalancedness probability")?;
                Ok(Self::UnbalancedCounter { unbalance_p })
            }
            other => Err(GeneticError::Configuration(format!(
                "unknown crossover operator code {}",
                other
            ))),
        }
    }

    /// Whether every child is guaranteed to have the target weight.
    pub fn preserves_weight(&self) -> bool {
        matches!(
            self,
            Self::BalancedCounter | Self::ZeroLengths | Self::OneMap
        )
    }

    /// The unbalancedness probability, for the unbalanced counter operator.
    pub fn unbalance_probability(&self) -> Option<f64> {
        match self {
            Self::UnbalancedCounter { unbalance_p } => Some(*unbalance_p),
            _ => None,
        }
    }

    /// Returns the operator with a new unbalancedness probability; other operators are unchanged.
    pub fn with_unbalance_probability(self, unbalance_p: f64) -> Self {
        match self {
            Self::UnbalancedCounter { .. } => Self::UnbalancedCounter { unbalance_p },
            other => other,
        }
    }

    /// Produces one child from two parents.
    ///
    /// `weight` is the target Hamming weight; it is ignored by the one-point operator.
    ///
    /// # Errors
    ///
    /// Returns an error if the parents are empty or differ in length, if `weight`
    /// exceeds the length, or if a map-based operator receives parents whose
    /// weight differs from `weight`.
    pub fn cross<R: RandomSource + ?Sized>(
        &self,
        parent1: &[bool],
        parent2: &[bool],
        weight: usize,
        shuffle: bool,
        rng: &mut R,
    ) -> Result<Vec<bool>> {
        match *self {
            Self::OnePoint => {
                let (first, second) = one_point_crossover(parent1, parent2, rng)?;
                Ok(if rng.next_bool() { second } else { first })
            }
            Self::BalancedCounter => {
                balanced_counter_crossover(parent1, parent2, weight, shuffle, rng)
            }
            Self::ZeroLengths => zero_lengths_crossover(parent1, parent2, weight, shuffle, rng),
            Self::OneMap => one_map_crossover(parent1, parent2, weight, shuffle, rng),
            Self::UnbalancedCounter { unbalance_p } => {
                unbalanced_counter_crossover(parent1, parent2, weight, shuffle, unbalance_p, rng)
            }
        }
    }
}

impl Default for CrossoverOperator {
    fn default() -> Self {
        Self::BalancedCounter
    }
}

impl fmt::Display for CrossoverOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnePoint => write!(f, "one-point"),
            Self::BalancedCounter => write!(f, "balanced counter"),
            Self::ZeroLengths => write!(f, "zero lengths"),
            Self::OneMap => write!(f, "one map"),
            Self::UnbalancedCounter { unbalance_p } => {
                write!(f, "unbalanced counter (p = {})", unbalance_p)
            }
        }
    }
}

/// Checks that two parents can be recombined with the given target weight.
pub(crate) fn check_parents(parent1: &[bool], parent2: &[bool], weight: usize) -> Result<()> {
    if parent1.is_empty() {
        return Err(GeneticError::Crossover("parents must not be empty".to_string()));
    }
    if parent1.len() != parent2.len() {
        return Err(GeneticError::LengthMismatch {
            expected: parent1.len(),
            actual: parent2.len(),
        });
    }
    if weight > parent1.len() {
        return Err(GeneticError::WeightOutOfRange {
            weight,
            length: parent1.len(),
        });
    }
    Ok(())
}

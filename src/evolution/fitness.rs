//! # Fitness Functions
//!
//! The two criteria the search optimizes:
//!
//! - **Nonlinearity** (maximized): `NL(f) = 2^(n-1) - radius / 2`, optionally
//!   minus the unbalancedness `|W_f(0)|` so that unbalanced functions produced
//!   by weight-agnostic operators are pushed back towards balance.
//! - **Bent distance** (minimized): `sqrt(Σ_a (2^(n/2) - |W_f(a)|)^2)`, which is
//!   zero exactly for bent functions. The sum skips `a = 0` unless the
//!   unbalancedness term is requested. Only defined for even `n`.
//!
//! ## Example
//!
//! ```rust
//! use walshga::boolfun::TruthTable;
//! use walshga::evolution::{Challenge, FitnessFunction};
//!
//! // x1 x2 is bent on two variables.
//! let table = TruthTable::from_binary_str("0001").unwrap();
//! let (_, distance) = FitnessFunction::bent_distance().evaluate(&table);
//! assert_eq!(distance, 0.0);
//! ```

use std::fmt;

use crate::boolfun::walsh::{nonlinearity, spectral_radius_of};
use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;
use crate::selection::Objective;

/// The built-in fitness criteria.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitnessFunction {
    /// Nonlinearity, optionally penalized by `|W_f(0)|`. Maximized.
    Nonlinearity { penalize_unbalancedness: bool },
    /// Euclidean distance of the spectrum from a flat bent spectrum. Minimized.
    BentDistance { include_unbalancedness: bool },
}

impl FitnessFunction {
    /// Plain nonlinearity.
    pub fn nonlinearity() -> Self {
        Self::Nonlinearity {
            penalize_unbalancedness: false,
        }
    }

    /// Nonlinearity minus unbalancedness.
    pub fn penalized_nonlinearity() -> Self {
        Self::Nonlinearity {
            penalize_unbalancedness: true,
        }
    }

    /// Bent distance over every nonzero mask.
    pub fn bent_distance() -> Self {
        Self::BentDistance {
            include_unbalancedness: false,
        }
    }

    /// Checks that the criterion is defined for `num_vars` variables.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for the bent distance with an odd `num_vars`.
    pub fn validate(&self, num_vars: usize) -> Result<()> {
        if let Self::BentDistance { .. } = self {
            if num_vars % 2 != 0 {
                return Err(GeneticError::Configuration(format!(
                    "bent distance requires an even number of variables, got {}",
                    num_vars
                )));
            }
        }
        Ok(())
    }
}

impl Default for FitnessFunction {
    fn default() -> Self {
        Self::nonlinearity()
    }
}

impl Challenge for FitnessFunction {
    fn objective(&self) -> Objective {
        match self {
            Self::Nonlinearity { .. } => Objective::Maximize,
            Self::BentDistance { .. } => Objective::Minimize,
        }
    }

    fn score_coefficients(&self, coefficients: &[i32], num_vars: usize) -> f64 {
        match *self {
            Self::Nonlinearity {
                penalize_unbalancedness,
            } => {
                let nl = nonlinearity(spectral_radius_of(coefficients), num_vars);
                if penalize_unbalancedness {
                    let unbalancedness = coefficients.first().map_or(0, |c| c.abs());
                    f64::from(nl - unbalancedness)
                } else {
                    f64::from(nl)
                }
            }
            Self::BentDistance {
                include_unbalancedness,
            } => {
                let flat = f64::from(1i32 << (num_vars / 2));
                let start = if include_unbalancedness { 0 } else { 1 };
                coefficients
                    .iter()
                    .skip(start)
                    .map(|&c| {
                        let gap = flat - f64::from(c.abs());
                        gap * gap
                    })
                    .sum::<f64>()
                    .sqrt()
            }
        }
    }
}

impl fmt::Display for FitnessFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nonlinearity {
                penalize_unbalancedness: false,
            } => write!(f, "nonlinearity"),
            Self::Nonlinearity {
                penalize_unbalancedness: true,
            } => write!(f, "nonlinearity - unbalancedness"),
            Self::BentDistance {
                include_unbalancedness: false,
            } => write!(f, "bent distance"),
            Self::BentDistance {
                include_unbalancedness: true,
            } => write!(f, "bent distance with unbalancedness"),
        }
    }
}

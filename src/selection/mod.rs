//! # Selection and Replacement
//!
//! The steady-state loop picks two parents by tournament and decides where a
//! child lands with an elitist replacement rule. Both depend on the direction
//! of optimization, captured by [`Objective`].
//!
//! Every comparison is strict, so ties are settled by scan order alone. This
//! keeps runs reproducible from a seed.

pub mod replacement;
pub mod tournament;

use crate::error::{GeneticError, Result};

pub use replacement::{select_for_death, ElitistReplacement, ReplacementOutcome};
pub use tournament::TournamentSelection;

/// Direction of optimization.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Objective {
    Maximize,
    Minimize,
}

impl Objective {
    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(&self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }

    /// Position of the best fitness in a population.
    ///
    /// When maximizing the last maximum wins; when minimizing the first minimum wins.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `fitness` is empty.
    pub fn best_position(&self, fitness: &[f64]) -> Result<usize> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }

        let mut best = 0;
        for (i, &value) in fitness.iter().enumerate().skip(1) {
            let replaces = match self {
                Objective::Maximize => value >= fitness[best],
                Objective::Minimize => value < fitness[best],
            };
            if replaces {
                best = i;
            }
        }
        Ok(best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_better_is_strict() {
        assert!(Objective::Maximize.is_better(2.0, 1.0));
        assert!(!Objective::Maximize.is_better(1.0, 1.0));
        assert!(Objective::Minimize.is_better(1.0, 2.0));
        assert!(!Objective::Minimize.is_better(1.0, 1.0));
    }

    #[test]
    fn test_best_position_tie_breaking() {
        let fitness = [3.0, 1.0, 3.0, 1.0];
        assert_eq!(Objective::Maximize.best_position(&fitness).unwrap(), 2);
        assert_eq!(Objective::Minimize.best_position(&fitness).unwrap(), 1);
    }

    #[test]
    fn test_best_position_empty() {
        assert_eq!(
            Objective::Maximize.best_position(&[]),
            Err(GeneticError::EmptyPopulation)
        );
    }
}

//! # Local Search
//!
//! Weight-preserving local search on truth tables. A neighbour of a function is
//! obtained by swapping a one with a zero, and is scored from a spectrum
//! updated in `O(2^n)` rather than a full transform.
//!
//! ## Example
//!
//! ```rust
//! use walshga::boolfun::TruthTable;
//! use walshga::evolution::FitnessFunction;
//! use walshga::local_search::{LocalSearchMode, SearchSolution, SwapNeighborhoodSearch};
//!
//! let challenge = FitnessFunction::nonlinearity();
//! let table = TruthTable::from_binary_str("0000000011111111").unwrap();
//! let solution = SearchSolution::evaluate(table, &challenge);
//!
//! let search = SwapNeighborhoodSearch::new(LocalSearchMode::HillClimb);
//! let outcome = search.improve(solution, &challenge, usize::MAX).unwrap();
//! assert_eq!(outcome.solution.fitness(), 4.0);
//! ```

pub mod hill_climbing;
pub mod incremental;
pub mod neighborhood;

use std::fmt;

use crate::boolfun::walsh::WalshSpectrum;
use crate::boolfun::TruthTable;
use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;

pub use hill_climbing::hill_climb;
pub use incremental::update_spectrum_swap;
pub use neighborhood::{
    best_neighbor, best_neighbor_parallel, find_improving_neighbor,
    find_improving_neighbor_parallel, neighbor_count,
};

/// A truth table with its spectrum and score, kept consistent with each other.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSolution {
    table: TruthTable,
    spectrum: WalshSpectrum,
    fitness: f64,
}

impl SearchSolution {
    /// Computes the spectrum and score of a truth table.
    pub fn evaluate<C: Challenge + ?Sized>(table: TruthTable, challenge: &C) -> Self {
        let (spectrum, fitness) = challenge.evaluate(&table);
        Self {
            table,
            spectrum,
            fitness,
        }
    }

    /// Assembles a solution from precomputed parts.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::LocalSearch` if the spectrum was not computed for
    /// a function of the same number of variables.
    pub fn from_parts(table: TruthTable, spectrum: WalshSpectrum, fitness: f64) -> Result<Self> {
        if table.num_vars() != spectrum.num_vars() {
            return Err(GeneticError::LocalSearch(format!(
                "spectrum of a {}-variable function paired with a {}-variable table",
                spectrum.num_vars(),
                table.num_vars()
            )));
        }
        Ok(Self {
            table,
            spectrum,
            fitness,
        })
    }

    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    pub fn spectrum(&self) -> &WalshSpectrum {
        &self.spectrum
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn num_vars(&self) -> usize {
        self.table.num_vars()
    }

    pub fn into_parts(self) -> (TruthTable, WalshSpectrum, f64) {
        (self.table, self.spectrum, self.fitness)
    }
}

/// How far the search walks from its starting point.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LocalSearchMode {
    /// A single scan, moving to the best neighbour if it improves.
    #[default]
    BestNeighbor,
    /// Repeated scans until a local optimum or the budget is reached.
    HillClimb,
}

/// Configuration of the swap-neighbourhood search applied to children.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SwapNeighborhoodSearch {
    mode: LocalSearchMode,
    parallel: bool,
}

/// The result of [`SwapNeighborhoodSearch::improve`].
#[derive(Debug, Clone, PartialEq)]
pub struct LocalSearchOutcome {
    pub solution: SearchSolution,
    /// Neighbours evaluated, one unit each.
    pub evaluations: usize,
}

impl SwapNeighborhoodSearch {
    pub fn new(mode: LocalSearchMode) -> Self {
        Self {
            mode,
            parallel: false,
        }
    }

    /// Scans rows of the neighbourhood on the rayon pool. Results are unchanged.
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn mode(&self) -> LocalSearchMode {
        self.mode
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Improves `solution`, evaluating at most `max_evaluations` neighbours.
    ///
    /// A scan that would not fit in the remaining evaluations is not started,
    /// so the solution may come back unchanged with zero evaluations spent.
    ///
    /// # Arguments
    ///
    /// * `solution` - The starting point, usually a freshly evaluated child.
    /// * `challenge` - The criterion being optimized.
    /// * `max_evaluations` - The evaluation allowance.
    ///
    /// # Errors
    ///
    /// Only fails if the solution is internally inconsistent.
    pub fn improve<C: Challenge + ?Sized>(
        &self,
        solution: SearchSolution,
        challenge: &C,
        max_evaluations: usize,
    ) -> Result<LocalSearchOutcome> {
        let steepest = self.mode == LocalSearchMode::HillClimb;
        let (solution, evaluations) =
            hill_climbing::climb(solution, challenge, self.parallel, steepest, max_evaluations)?;
        Ok(LocalSearchOutcome {
            solution,
            evaluations,
        })
    }
}

impl fmt::Display for SwapNeighborhoodSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = match self.mode {
            LocalSearchMode::BestNeighbor => "best neighbour",
            LocalSearchMode::HillClimb => "hill climbing",
        };
        if self.parallel {
            write!(f, "{} (parallel)", mode)
        } else {
            write!(f, "{}", mode)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::FitnessFunction;

    fn start() -> SearchSolution {
        let table = TruthTable::from_binary_str("0000000011111111").unwrap();
        SearchSolution::evaluate(table, &FitnessFunction::nonlinearity())
    }

    #[test]
    fn test_best_neighbor_mode_makes_one_move() {
        let challenge = FitnessFunction::nonlinearity();
        let search = SwapNeighborhoodSearch::new(LocalSearchMode::BestNeighbor);
        let outcome = search.improve(start(), &challenge, usize::MAX).unwrap();

        assert_eq!(outcome.evaluations, 64);
        assert_eq!(
            outcome.solution,
            best_neighbor(&start(), &challenge).unwrap()
        );
    }

    #[test]
    fn test_parallel_flag_does_not_change_result() {
        let challenge = FitnessFunction::nonlinearity();
        let sequential = SwapNeighborhoodSearch::new(LocalSearchMode::HillClimb);
        let parallel = sequential.parallel(true);

        assert_eq!(
            sequential.improve(start(), &challenge, usize::MAX).unwrap(),
            parallel.improve(start(), &challenge, usize::MAX).unwrap()
        );
    }

    #[test]
    fn test_zero_allowance() {
        let search = SwapNeighborhoodSearch::new(LocalSearchMode::HillClimb);
        let outcome = search
            .improve(start(), &FitnessFunction::nonlinearity(), 0)
            .unwrap();
        assert_eq!(outcome.evaluations, 0);
        assert_eq!(outcome.solution, start());
    }

    #[test]
    fn test_from_parts_rejects_mismatch() {
        let table = TruthTable::from_binary_str("0110").unwrap();
        let spectrum = WalshSpectrum::of(&TruthTable::from_binary_str("01101001").unwrap());
        assert!(SearchSolution::from_parts(table, spectrum, 0.0).is_err());
    }

    #[test]
    fn test_display() {
        let search = SwapNeighborhoodSearch::new(LocalSearchMode::HillClimb).parallel(true);
        assert_eq!(search.to_string(), "hill climbing (parallel)");
    }
}

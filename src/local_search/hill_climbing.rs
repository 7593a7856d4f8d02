//! # Hill Climbing
//!
//! Steepest-ascent hill climbing over the swap neighbourhood: repeatedly move
//! to the best strictly improving neighbour until none exists. Every scan
//! evaluates `weight * (len - weight)` neighbours, and swaps keep the weight,
//! so each scan has the same cost.

use tracing::trace;

use super::neighborhood::{find_improving_neighbor, find_improving_neighbor_parallel, neighbor_count};
use super::SearchSolution;
use crate::error::Result;
use crate::evolution::Challenge;

/// Climbs until a local optimum is reached.
///
/// Each step strictly improves the fitness, so the climb terminates.
///
/// # Arguments
///
/// * `solution` - The starting point.
/// * `challenge` - The criterion being optimized.
///
/// # Errors
///
/// Only fails if the solution is internally inconsistent.
pub fn hill_climb<C: Challenge + ?Sized>(solution: SearchSolution, challenge: &C) -> Result<SearchSolution> {
    let (solution, _) = climb(solution, challenge, false, true, usize::MAX)?;
    Ok(solution)
}

/// Runs scans while the next one still fits in `budget` evaluations.
///
/// With `steepest` unset a single scan is made. Returns the final solution
/// and the number of evaluations spent.
pub(crate) fn climb<C: Challenge + ?Sized>(
    mut current: SearchSolution,
    challenge: &C,
    parallel: bool,
    steepest: bool,
    budget: usize,
) -> Result<(SearchSolution, usize)> {
    let cost = neighbor_count(&current);
    let mut spent = 0usize;

    while cost > 0 && spent.saturating_add(cost) <= budget {
        spent += cost;
        let next = if parallel {
            find_improving_neighbor_parallel(&current, challenge)?
        } else {
            find_improving_neighbor(&current, challenge)?
        };

        match next {
            Some(better) => {
                trace!(
                    from = current.fitness(),
                    to = better.fitness(),
                    "Local search improvement"
                );
                current = better;
                if !steepest {
                    break;
                }
            }
            None => break,
        }
    }

    Ok((current, spent))
}

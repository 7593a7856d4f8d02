//! Best-neighbour scan over the swap neighbourhood.
//!
//! The neighbours of a truth table are the tables obtained by exchanging a one
//! with a zero, scanned in the order `(i, j)` with `i < j`. Every neighbour is
//! scored from an incrementally updated spectrum.

use std::cell::RefCell;

use rayon::prelude::*;
use thread_local::ThreadLocal;

use super::incremental::swap_update_into;
use super::SearchSolution;
use crate::boolfun::walsh::WalshSpectrum;
use crate::error::Result;
use crate::evolution::Challenge;

/// Number of neighbours of a truth table: `weight * (len - weight)`.
pub fn neighbor_count(solution: &SearchSolution) -> usize {
    let weight = solution.table().weight();
    weight * (solution.table().len() - weight)
}

// The first neighbour in row `i` reaching the best score of the row, if that
// score is strictly better than `threshold`.
fn scan_row<C: Challenge + ?Sized>(
    solution: &SearchSolution,
    challenge: &C,
    i: usize,
    threshold: f64,
    scratch: &mut [i32],
) -> Option<(usize, usize, f64)> {
    let bits = solution.table().bits();
    let coefficients = solution.spectrum().coefficients();
    let num_vars = solution.num_vars();
    let objective = challenge.objective();

    let mut best: Option<(usize, usize, f64)> = None;
    let mut best_fitness = threshold;
    for j in i + 1..bits.len() {
        if bits[i] == bits[j] {
            continue;
        }
        swap_update_into(bits, coefficients, i, j, scratch);
        let fitness = challenge.score_coefficients(scratch, num_vars);
        if objective.is_better(fitness, best_fitness) {
            best_fitness = fitness;
            best = Some((i, j, fitness));
        }
    }
    best
}

fn materialize(solution: &SearchSolution, y: usize, z: usize, fitness: f64) -> Result<SearchSolution> {
    let table = solution.table().with_swapped(y, z)?;
    let mut coefficients = vec![0; table.len()];
    swap_update_into(
        solution.table().bits(),
        solution.spectrum().coefficients(),
        y,
        z,
        &mut coefficients,
    );
    let spectrum = WalshSpectrum::from_coefficients(coefficients, solution.num_vars())?;
    SearchSolution::from_parts(table, spectrum, fitness)
}

/// Returns the best strictly improving swap neighbour, or `None` at a local optimum.
///
/// Ties are settled in scan order: the first neighbour reaching the best score wins.
///
/// # Errors
///
/// Only fails if the solution is internally inconsistent.
pub fn find_improving_neighbor<C: Challenge + ?Sized>(
    solution: &SearchSolution,
    challenge: &C,
) -> Result<Option<SearchSolution>> {
    let length = solution.table().len();
    let mut scratch = vec![0; length];
    let objective = challenge.objective();

    let mut best: Option<(usize, usize, f64)> = None;
    let mut best_fitness = solution.fitness();
    for i in 0..length {
        if let Some(candidate) = scan_row(solution, challenge, i, best_fitness, &mut scratch) {
            if objective.is_better(candidate.2, best_fitness) {
                best_fitness = candidate.2;
                best = Some(candidate);
            }
        }
    }

    best.map(|(y, z, fitness)| materialize(solution, y, z, fitness))
        .transpose()
}

/// Parallel variant of [`find_improving_neighbor`] with identical results.
///
/// Rows of the scan are spread over the rayon pool, each worker thread
/// reusing one scratch spectrum. Row winners are then reduced serially in row
/// order, which reproduces the sequential tie-breaking.
///
/// # Errors
///
/// Only fails if the solution is internally inconsistent.
pub fn find_improving_neighbor_parallel<C: Challenge + ?Sized>(
    solution: &SearchSolution,
    challenge: &C,
) -> Result<Option<SearchSolution>> {
    let length = solution.table().len();
    let original = solution.fitness();
    let scratch: ThreadLocal<RefCell<Vec<i32>>> = ThreadLocal::new();

    let rows: Vec<Option<(usize, usize, f64)>> = (0..length)
        .into_par_iter()
        .map(|i| {
            let cell = scratch.get_or(|| RefCell::new(vec![0; length]));
            let mut buffer = cell.borrow_mut();
            scan_row(solution, challenge, i, original, &mut buffer)
        })
        .collect();

    let objective = challenge.objective();
    let mut best: Option<(usize, usize, f64)> = None;
    let mut best_fitness = original;
    for candidate in rows.into_iter().flatten() {
        if objective.is_better(candidate.2, best_fitness) {
            best_fitness = candidate.2;
            best = Some(candidate);
        }
    }

    best.map(|(y, z, fitness)| materialize(solution, y, z, fitness))
        .transpose()
}

/// The best strictly improving neighbour, or a copy of `solution` if none improves.
///
/// # Errors
///
/// Only fails if the solution is internally inconsistent.
pub fn best_neighbor<C: Challenge + ?Sized>(
    solution: &SearchSolution,
    challenge: &C,
) -> Result<SearchSolution> {
    Ok(find_improving_neighbor(solution, challenge)?.unwrap_or_else(|| solution.clone()))
}

/// Parallel variant of [`best_neighbor`].
///
/// # Errors
///
/// Only fails if the solution is internally inconsistent.
pub fn best_neighbor_parallel<C: Challenge + ?Sized>(
    solution: &SearchSolution,
    challenge: &C,
) -> Result<SearchSolution> {
    Ok(find_improving_neighbor_parallel(solution, challenge)?
        .unwrap_or_else(|| solution.clone()))
}

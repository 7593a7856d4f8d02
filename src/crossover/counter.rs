//! Counter-based crossovers.
//!
//! The child is filled one position at a time from a coin-chosen parent while
//! the ones and zeros copied so far are counted. As soon as one side reaches its
//! quota the other value is forced, which is what keeps the weight exact.

use crate::boolfun::combinatorics::fill_order;
use crate::error::{check_probability, Result};
use crate::rng::RandomSource;

use super::check_parents;

/// Counter crossover producing a child of Hamming weight exactly `weight`.
///
/// At step `i` a zero is forced once `weight` ones were written, a one is forced
/// once `len - weight` zeros were written, and otherwise a fair coin picks the
/// parent (`false` selects `parent1`) whose bit `i` is copied. Forced steps draw
/// no randomness. The value lands at position `i` of the fill order.
///
/// # Errors
///
/// Returns an error if the parents are empty, differ in length, or `weight`
/// exceeds their length.
pub fn balanced_counter_crossover<R: RandomSource + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    weight: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<bool>> {
    check_parents(parent1, parent2, weight)?;

    let length = parent1.len();
    let zero_quota = length - weight;
    let positions = fill_order(length, shuffle, rng);
    let mut child = vec![false; length];
    let (mut ones, mut zeros) = (0, 0);

    for i in 0..length {
        let value = if ones == weight {
            false
        } else if zeros == zero_quota {
            true
        } else {
            let value = pick_parent(parent1, parent2, i, rng);
            if value {
                ones += 1;
            } else {
                zeros += 1;
            }
            value
        };
        child[positions[i]] = value;
    }

    Ok(child)
}

/// Counter crossover whose child may overshoot the target weight.
///
/// Bits are copied from coin-chosen parents until either the ones reach `weight`
/// or the zeros reach `len - weight`. The saturated value keeps being written
/// while a draw falls below `unbalance_p`, and the opposite value completes the
/// child. With `unbalance_p == 0` the child has weight exactly `weight`.
///
/// # Errors
///
/// Returns an error if the parents are invalid or `unbalance_p` is not a probability.
pub fn unbalanced_counter_crossover<R: RandomSource + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    weight: usize,
    shuffle: bool,
    unbalance_p: f64,
    rng: &mut R,
) -> Result<Vec<bool>> {
    check_parents(parent1, parent2, weight)?;
    check_probability(unbalance_p, "unbalancedness probability")?;

    let length = parent1.len();
    let zero_quota = length - weight;
    let positions = fill_order(length, shuffle, rng);
    let mut child = vec![false; length];
    let (mut ones, mut zeros) = (0, 0);

    let mut i = 0;
    while ones != weight && zeros != zero_quota {
        let value = pick_parent(parent1, parent2, i, rng);
        if value {
            ones += 1;
        } else {
            zeros += 1;
        }
        child[positions[i]] = value;
        i += 1;
    }

    let saturated = ones == weight;
    while i < length && rng.next_f64() < unbalance_p {
        child[positions[i]] = saturated;
        i += 1;
    }
    while i < length {
        child[positions[i]] = !saturated;
        i += 1;
    }

    Ok(child)
}

fn pick_parent<R: RandomSource + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    index: usize,
    rng: &mut R,
) -> bool {
    if rng.next_bool() {
        parent2[index]
    } else {
        parent1[index]
    }
}

//! Uniform crossover on the positions of ones.

use crate::boolfun::combinatorics::fill_order;
use crate::boolfun::ones_map;
use crate::error::Result;
use crate::rng::RandomSource;

use super::check_parents;
use super::zero_lengths::check_parent_weight;

/// One-map crossover producing a child of Hamming weight exactly `weight`.
///
/// The child's ones are drawn one at a time from the union of the parents'
/// ones positions. While both maps are non-empty a fair coin picks a map
/// (`false` selects `parent1`) and a uniform entry of it is taken; the value is
/// removed from both maps so no position is used twice. Once one map is empty
/// the other is drained from the front without drawing.
///
/// # Errors
///
/// Returns an error if the parents are invalid or either parent does not have
/// Hamming weight `weight`.
pub fn one_map_crossover<R: RandomSource + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    weight: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<bool>> {
    check_parents(parent1, parent2, weight)?;
    check_parent_weight(parent1, weight)?;
    check_parent_weight(parent2, weight)?;

    let mut map1 = ones_map(parent1);
    let mut map2 = ones_map(parent2);
    let positions = fill_order(weight, shuffle, rng);
    let mut child_map = vec![0; weight];

    for &slot in &positions {
        let value = if map1.is_empty() {
            map2.remove(0)
        } else if map2.is_empty() {
            map1.remove(0)
        } else if rng.next_bool() {
            take_shared(&mut map2, &mut map1, rng)
        } else {
            take_shared(&mut map1, &mut map2, rng)
        };
        child_map[slot] = value;
    }

    let mut child = vec![false; parent1.len()];
    for position in child_map {
        child[position] = true;
    }
    Ok(child)
}

// Takes a uniform entry of `chosen` and drops it from `other` as well.
fn take_shared<R: RandomSource + ?Sized>(
    chosen: &mut Vec<usize>,
    other: &mut Vec<usize>,
    rng: &mut R,
) -> usize {
    let value = chosen.remove(rng.next_index(chosen.len()));
    if let Ok(index) = other.binary_search(&value) {
        other.remove(index);
    }
    value
}

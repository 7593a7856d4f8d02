//! Crossover on the zero-run-length representation.
//!
//! A bitstring of weight `w` is described by `w + 1` run lengths: the zeros
//! preceding each one and the zeros after the last one. Recombining run lengths
//! while capping their sum at the number of zeros yields a child with exactly
//! `w` ones.

use crate::boolfun::combinatorics::fill_order;
use crate::boolfun::{hamming_weight, zero_lengths_map};
use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;

use super::check_parents;

/// Zero-lengths crossover producing a child of Hamming weight exactly `weight`.
///
/// For each of the first `weight` slots, a fair coin picks the parent
/// (`false` selects `parent1`) whose run length is copied, clamped to the zeros
/// still available; once all zeros are spent the remaining slots get zero
/// without drawing. The last filled slot absorbs the leftover zeros.
///
/// # Errors
///
/// Returns an error if the parents are invalid or either parent does not have
/// Hamming weight `weight`.
pub fn zero_lengths_crossover<R: RandomSource + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    weight: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<bool>> {
    check_parents(parent1, parent2, weight)?;
    check_parent_weight(parent1, weight)?;
    check_parent_weight(parent2, weight)?;

    let length = parent1.len();
    let zero_budget = length - weight;
    let map_len = weight + 1;

    let positions = fill_order(map_len, shuffle, rng);
    let map1 = zero_lengths_map(parent1, map_len)?;
    let map2 = zero_lengths_map(parent2, map_len)?;

    let mut child_map = vec![0; map_len];
    let mut zeros = 0;
    for i in 0..weight {
        if zeros == zero_budget {
            child_map[positions[i]] = 0;
            continue;
        }

        let run = if rng.next_bool() { map2[i] } else { map1[i] };
        let run = run.min(zero_budget - zeros);
        child_map[positions[i]] = run;
        zeros += run;
    }
    child_map[positions[weight]] = zero_budget - zeros;

    let mut child = vec![false; length];
    let mut index = 0;
    for &run in &child_map[..weight] {
        index += run;
        child[index] = true;
        index += 1;
    }

    Ok(child)
}

pub(crate) fn check_parent_weight(parent: &[bool], weight: usize) -> Result<()> {
    let actual = hamming_weight(parent);
    if actual != weight {
        return Err(GeneticError::Crossover(format!(
            "parent has weight {} but the target weight is {}",
            actual, weight
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolfun::combinatorics::random_fixed_weight;
    use crate::rng::testing::ScriptedSource;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_clamped_run_length() {
        // Run lengths: parent1 [1, 0, 1, 2, 0], parent2 [0, 0, 4, 0, 0].
        let parent1 = [false, true, true, false, true, false, false, true];
        let parent2 = [true, true, false, false, false, false, true, true];
        let mut rng = ScriptedSource::new().with_bools(&[false, true, true]);

        let child = zero_lengths_crossover(&parent1, &parent2, 4, false, &mut rng).unwrap();

        // The third slot asks for 4 zeros but only 3 remain.
        assert_eq!(
            child,
            vec![false, true, true, false, false, false, true, true]
        );
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_identical_parents_reproduce_parent() {
        let parent = [false, false, true, false, true, true, false, false];
        let mut rng = ScriptedSource::new().with_bools(&[true, false, true]);

        let child = zero_lengths_crossover(&parent, &parent, 3, false, &mut rng).unwrap();
        assert_eq!(child, parent.to_vec());
    }

    #[test]
    fn test_zero_weight() {
        let parent = [false; 4];
        let mut rng = ScriptedSource::new();
        let child = zero_lengths_crossover(&parent, &parent, 0, false, &mut rng).unwrap();
        assert_eq!(child, vec![false; 4]);
    }

    #[test]
    fn test_weight_invariant_with_shuffle() {
        let mut rng = RandomNumberGenerator::from_seed(8);
        for _ in 0..200 {
            let parent1 = random_fixed_weight(32, 12, &mut rng).unwrap();
            let parent2 = random_fixed_weight(32, 12, &mut rng).unwrap();
            let child = zero_lengths_crossover(&parent1, &parent2, 12, true, &mut rng).unwrap();
            assert_eq!(hamming_weight(&child), 12);
        }
    }

    #[test]
    fn test_rejects_parent_with_wrong_weight() {
        let parent1 = [true, true, false, false];
        let parent2 = [true, true, true, false];
        let mut rng = ScriptedSource::new();
        let result = zero_lengths_crossover(&parent1, &parent2, 2, false, &mut rng);
        assert!(matches!(result, Err(GeneticError::Crossover(_))));
    }
}

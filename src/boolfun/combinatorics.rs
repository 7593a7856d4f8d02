//! # Combinatorial Generators
//!
//! Random permutations, fixed-weight bitstrings and balanced matrices used to
//! seed populations and to shuffle the fill order of the crossover operators.

use crate::error::{check_probability, GeneticError, Result};
use crate::rng::RandomSource;

/// Draws a uniformly random permutation of `0..length` (inside-out Fisher-Yates).
pub fn random_permutation<R: RandomSource + ?Sized>(length: usize, rng: &mut R) -> Vec<usize> {
    let mut permutation = vec![0; length];
    for i in 1..length {
        let j = rng.next_index(i + 1);
        permutation[i] = permutation[j];
        permutation[j] = i;
    }
    permutation
}

/// The order in which child positions are filled: identity, or a random permutation.
pub fn fill_order<R: RandomSource + ?Sized>(length: usize, shuffle: bool, rng: &mut R) -> Vec<usize> {
    if shuffle {
        random_permutation(length, rng)
    } else {
        (0..length).collect()
    }
}

/// A bitstring of exactly `weight` ones at uniformly chosen positions.
///
/// # Errors
///
/// Returns `GeneticError::WeightOutOfRange` if `weight > length`.
pub fn random_fixed_weight<R: RandomSource + ?Sized>(
    length: usize,
    weight: usize,
    rng: &mut R,
) -> Result<Vec<bool>> {
    if weight > length {
        return Err(GeneticError::WeightOutOfRange { weight, length });
    }

    let mut bits = vec![false; length];
    let mut free: Vec<usize> = (0..length).collect();
    for _ in 0..weight {
        let pick = rng.next_index(free.len());
        bits[free.remove(pick)] = true;
    }
    Ok(bits)
}

/// A balanced bitstring (weight `length / 2`).
pub fn random_balanced<R: RandomSource + ?Sized>(length: usize, rng: &mut R) -> Result<Vec<bool>> {
    random_fixed_weight(length, length / 2, rng)
}

/// A bitstring whose bits are independent fair coins.
pub fn random_unbalanced<R: RandomSource + ?Sized>(length: usize, rng: &mut R) -> Vec<bool> {
    (0..length).map(|_| rng.next_bool()).collect()
}

/// A bitstring aimed at `weight` ones that may overshoot one side with probability `unbalance_p`.
///
/// Fair coins fill the positions until either the ones or the zeros reach
/// their quota. The saturated value then keeps being emitted while a draw falls
/// below `unbalance_p`, after which the other value completes the string.
///
/// # Errors
///
/// Returns an error if `weight > length` or `unbalance_p` is not a probability.
pub fn partially_unbalanced<R: RandomSource + ?Sized>(
    length: usize,
    weight: usize,
    unbalance_p: f64,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<bool>> {
    if weight > length {
        return Err(GeneticError::WeightOutOfRange { weight, length });
    }
    check_probability(unbalance_p, "unbalancedness probability")?;

    let positions = fill_order(length, shuffle, rng);
    let mut bits = vec![false; length];
    let zero_quota = length - weight;
    let (mut ones, mut zeros) = (0, 0);

    let mut i = 0;
    while ones != weight && zeros != zero_quota {
        let value = rng.next_bool();
        bits[positions[i]] = value;
        if value {
            ones += 1;
        } else {
            zeros += 1;
        }
        i += 1;
    }

    let saturated = ones == weight;
    while i < length && rng.next_f64() < unbalance_p {
        bits[positions[i]] = saturated;
        i += 1;
    }
    while i < length {
        bits[positions[i]] = !saturated;
        i += 1;
    }

    Ok(bits)
}

/// A `rows x cols` matrix whose columns are independent balanced bitstrings.
///
/// # Errors
///
/// Returns `GeneticError::Configuration` if either dimension is zero.
pub fn random_balanced_matrix<R: RandomSource + ?Sized>(
    rows: usize,
    cols: usize,
    rng: &mut R,
) -> Result<Vec<Vec<bool>>> {
    if rows == 0 || cols == 0 {
        return Err(GeneticError::Configuration(format!(
            "matrix dimensions must be positive, got {}x{}",
            rows, cols
        )));
    }

    let columns = (0..cols)
        .map(|_| random_balanced(rows, rng))
        .collect::<Result<Vec<_>>>()?;
    crate::crossover::matrix::transpose(&columns)
}

/// Hamming weight `2^(n-1) - 2^(n/2-1)` of a bent function of `n` variables.
///
/// # Errors
///
/// Returns `GeneticError::Configuration` if `n` is zero or odd.
pub fn bent_weight(num_vars: usize) -> Result<usize> {
    if num_vars == 0 || num_vars % 2 != 0 {
        return Err(GeneticError::Configuration(format!(
            "bent functions exist only for a positive even number of variables, got {}",
            num_vars
        )));
    }
    Ok((1usize << (num_vars - 1)) - (1usize << (num_vars / 2 - 1)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolfun::hamming_weight;
    use crate::rng::testing::ScriptedSource;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_random_permutation_is_permutation() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        for length in [0, 1, 2, 7, 64] {
            let mut permutation = random_permutation(length, &mut rng);
            permutation.sort_unstable();
            assert_eq!(permutation, (0..length).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_random_permutation_scripted() {
        // i=1: j=0 -> [1,0,_]; i=2: j=2 -> [1,0,2]
        let mut rng = ScriptedSource::new().with_indices(&[0, 2]);
        assert_eq!(random_permutation(3, &mut rng), vec![1, 0, 2]);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_random_permutation_can_be_identity() {
        let mut rng = ScriptedSource::new().with_indices(&[1, 2, 3]);
        assert_eq!(random_permutation(4, &mut rng), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_fill_order_identity() {
        let mut rng = ScriptedSource::new();
        assert_eq!(fill_order(4, false, &mut rng), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_random_fixed_weight() {
        let mut rng = RandomNumberGenerator::from_seed(5);
        for weight in 0..=16 {
            let bits = random_fixed_weight(16, weight, &mut rng).unwrap();
            assert_eq!(bits.len(), 16);
            assert_eq!(hamming_weight(&bits), weight);
        }
        assert!(random_fixed_weight(4, 5, &mut rng).is_err());
    }

    #[test]
    fn test_random_balanced() {
        let mut rng = RandomNumberGenerator::from_seed(9);
        let bits = random_balanced(32, &mut rng).unwrap();
        assert_eq!(hamming_weight(&bits), 16);
    }

    #[test]
    fn test_partially_unbalanced_zero_probability_is_exact() {
        let mut rng = RandomNumberGenerator::from_seed(13);
        for _ in 0..50 {
            let bits = partially_unbalanced(32, 16, 0.0, true, &mut rng).unwrap();
            assert_eq!(hamming_weight(&bits), 16);
        }
    }

    #[test]
    fn test_partially_unbalanced_scripted_overshoot() {
        // Two ones saturate weight 2, one extra one is allowed, then zeros.
        let mut rng = ScriptedSource::new()
            .with_bools(&[true, true])
            .with_floats(&[0.1, 0.9]);
        let bits = partially_unbalanced(6, 2, 0.5, false, &mut rng).unwrap();
        assert_eq!(bits, vec![true, true, true, false, false, false]);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_partially_unbalanced_rejects_bad_probability() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        assert!(partially_unbalanced(8, 4, 1.5, false, &mut rng).is_err());
    }

    #[test]
    fn test_random_balanced_matrix_columns() {
        let mut rng = RandomNumberGenerator::from_seed(17);
        let matrix = random_balanced_matrix(8, 5, &mut rng).unwrap();
        assert_eq!(matrix.len(), 8);
        for col in 0..5 {
            let weight = matrix.iter().filter(|row| row[col]).count();
            assert_eq!(weight, 4);
        }
    }

    #[test]
    fn test_bent_weight() {
        assert_eq!(bent_weight(2).unwrap(), 1);
        assert_eq!(bent_weight(4).unwrap(), 6);
        assert_eq!(bent_weight(8).unwrap(), 120);
        assert!(bent_weight(5).is_err());
        assert!(bent_weight(0).is_err());
    }
}

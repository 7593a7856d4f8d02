//! # Mutation Operators
//!
//! In-place mutations of bitstrings and binary matrices. The flip operators
//! change the Hamming weight and pair with one-point crossover; the swap
//! operators exchange a one with a zero, preserving the weight established by
//! the weight-preserving crossovers.
//!
//! Every probability test draws `u` uniformly from `[0, 1)` and mutates when
//! `u < probability`.
//!
//! ## Example
//!
//! ```rust
//! use walshga::boolfun::hamming_weight;
//! use walshga::mutation::MutationOperator;
//! use walshga::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let mut bits = vec![true, true, false, false, true, false, false, true];
//!
//! MutationOperator::SwapAll.apply(&mut bits, 0.5, &mut rng).unwrap();
//! assert_eq!(hamming_weight(&bits), 4);
//! ```

use std::fmt;

use crate::boolfun::{ones_map, zeros_map};
use crate::crossover::CrossoverOperator;
use crate::error::{check_probability, GeneticError, Result};
use crate::rng::RandomSource;

/// The available bitstring mutation operators.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MutationOperator {
    /// With the given probability, complement one uniformly chosen bit.
    Flip,
    /// Complement each bit independently with the given probability.
    FlipAll,
    /// With the given probability, exchange a random one with a random zero.
    Swap,
    /// For each one, with the given probability, exchange it with a random zero.
    SwapAll,
}

impl MutationOperator {
    /// The mutation paired with a crossover operator when none is configured:
    /// flip for one-point crossover, swap for every other operator.
    pub fn default_for(crossover: &CrossoverOperator) -> Self {
        match crossover {
            CrossoverOperator::OnePoint => Self::Flip,
            _ => Self::Swap,
        }
    }

    /// Whether the operator leaves the Hamming weight unchanged.
    pub fn preserves_weight(&self) -> bool {
        matches!(self, Self::Swap | Self::SwapAll)
    }

    /// Mutates `bits` in place.
    ///
    /// # Errors
    ///
    /// Returns an error if `probability` is not in `[0, 1]`, or if a flip
    /// mutation is applied to an empty bitstring.
    pub fn apply<R: RandomSource + ?Sized>(
        &self,
        bits: &mut [bool],
        probability: f64,
        rng: &mut R,
    ) -> Result<()> {
        check_probability(probability, "mutation probability")?;
        match self {
            Self::Flip => flip(bits, probability, rng),
            Self::FlipAll => {
                flip_all(bits, probability, rng);
                Ok(())
            }
            Self::Swap => {
                swap(bits, probability, rng);
                Ok(())
            }
            Self::SwapAll => {
                swap_all(bits, probability, rng);
                Ok(())
            }
        }
    }
}

impl fmt::Display for MutationOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flip => "flip",
            Self::FlipAll => "flip-all",
            Self::Swap => "swap",
            Self::SwapAll => "swap-all",
        };
        f.write_str(name)
    }
}

/// With probability `probability`, complements one uniformly chosen bit.
///
/// # Errors
///
/// Returns `GeneticError::Mutation` if `bits` is empty.
pub fn flip<R: RandomSource + ?Sized>(bits: &mut [bool], probability: f64, rng: &mut R) -> Result<()> {
    if bits.is_empty() {
        return Err(GeneticError::Mutation(
            "cannot flip a bit of an empty bitstring".to_string(),
        ));
    }
    if rng.next_f64() < probability {
        let position = rng.next_index(bits.len());
        bits[position] = !bits[position];
    }
    Ok(())
}

/// Complements each bit independently with probability `probability`.
pub fn flip_all<R: RandomSource + ?Sized>(bits: &mut [bool], probability: f64, rng: &mut R) {
    for bit in bits.iter_mut() {
        if rng.next_f64() < probability {
            *bit = !*bit;
        }
    }
}

/// With probability `probability`, moves a uniformly chosen one onto a uniformly chosen zero.
///
/// A constant bitstring has nothing to exchange and is left untouched, although
/// the probability draw is still consumed.
pub fn swap<R: RandomSource + ?Sized>(bits: &mut [bool], probability: f64, rng: &mut R) {
    if rng.next_f64() >= probability {
        return;
    }

    let ones = ones_map(bits);
    let zeros = zeros_map(bits);
    if ones.is_empty() || zeros.is_empty() {
        return;
    }

    let one = ones[rng.next_index(ones.len())];
    let zero = zeros[rng.next_index(zeros.len())];
    bits[one] = false;
    bits[zero] = true;
}

/// For each one of the original bitstring, with probability `probability`,
/// exchanges it with a uniformly chosen zero.
///
/// The maps are updated after every exchange, so a zero that received a one
/// can later be picked as a one and vice versa. No draw happens when the
/// bitstring has no zeros.
pub fn swap_all<R: RandomSource + ?Sized>(bits: &mut [bool], probability: f64, rng: &mut R) {
    let mut ones = ones_map(bits);
    let mut zeros = zeros_map(bits);
    if zeros.is_empty() {
        return;
    }

    for one_slot in 0..ones.len() {
        if rng.next_f64() < probability {
            let zero_slot = rng.next_index(zeros.len());
            let (one, zero) = (ones[one_slot], zeros[zero_slot]);
            bits[one] = false;
            bits[zero] = true;
            ones[one_slot] = zero;
            zeros[zero_slot] = one;
        }
    }
}

/// Mutates a binary matrix column by column.
///
/// With `flip` set, every entry is complemented independently with probability
/// `probability`, columns visited first. Otherwise each column, with probability
/// `probability`, exchanges the entries of two uniformly chosen rows (which may
/// coincide), leaving the column weight unchanged.
///
/// # Errors
///
/// Returns an error if `probability` is not in `[0, 1]` or the matrix is not
/// rectangular and non-empty.
pub fn mutate_matrix<R: RandomSource + ?Sized>(
    matrix: &mut [Vec<bool>],
    probability: f64,
    flip: bool,
    rng: &mut R,
) -> Result<()> {
    check_probability(probability, "mutation probability")?;
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(GeneticError::Mutation("cannot mutate an empty matrix".to_string()));
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != cols) {
        return Err(GeneticError::LengthMismatch {
            expected: cols,
            actual: row.len(),
        });
    }

    for j in 0..cols {
        if flip {
            for row in matrix.iter_mut() {
                if rng.next_f64() < probability {
                    row[j] = !row[j];
                }
            }
        } else if rng.next_f64() < probability {
            let first = rng.next_index(rows);
            let second = rng.next_index(rows);
            let temp = matrix[first][j];
            matrix[first][j] = matrix[second][j];
            matrix[second][j] = temp;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolfun::hamming_weight;
    use crate::rng::testing::ScriptedSource;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_default_for_crossover() {
        assert_eq!(
            MutationOperator::default_for(&CrossoverOperator::OnePoint),
            MutationOperator::Flip
        );
        assert_eq!(
            MutationOperator::default_for(&CrossoverOperator::OneMap),
            MutationOperator::Swap
        );
        assert_eq!(
            MutationOperator::default_for(&CrossoverOperator::UnbalancedCounter { unbalance_p: 0.1 }),
            MutationOperator::Swap
        );
    }

    #[test]
    fn test_flip_scripted() {
        let mut bits = vec![false; 4];
        let mut rng = ScriptedSource::new().with_floats(&[0.05]).with_indices(&[2]);
        flip(&mut bits, 0.1, &mut rng).unwrap();
        assert_eq!(bits, vec![false, false, true, false]);
    }

    #[test]
    fn test_flip_skipped_when_draw_equals_probability() {
        let mut bits = vec![false; 4];
        let mut rng = ScriptedSource::new().with_floats(&[0.1]);
        flip(&mut bits, 0.1, &mut rng).unwrap();
        assert_eq!(bits, vec![false; 4]);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_flip_rejects_empty() {
        let mut rng = ScriptedSource::new();
        assert!(flip(&mut [], 0.5, &mut rng).is_err());
    }

    #[test]
    fn test_flip_all_scripted() {
        let mut bits = vec![true, false, true];
        let mut rng = ScriptedSource::new().with_floats(&[0.1, 0.9, 0.2]);
        flip_all(&mut bits, 0.5, &mut rng);
        assert_eq!(bits, vec![false, false, false]);
    }

    #[test]
    fn test_swap_scripted() {
        // Ones at [0, 3], zeros at [1, 2]; move the one at 3 onto the zero at 1.
        let mut bits = vec![true, false, false, true];
        let mut rng = ScriptedSource::new().with_floats(&[0.0]).with_indices(&[1, 0]);
        swap(&mut bits, 0.5, &mut rng);
        assert_eq!(bits, vec![true, true, false, false]);
    }

    #[test]
    fn test_swap_constant_string_is_noop() {
        let mut bits = vec![true; 4];
        let mut rng = ScriptedSource::new().with_floats(&[0.0]);
        swap(&mut bits, 1.0, &mut rng);
        assert_eq!(bits, vec![true; 4]);
        assert!(rng.is_exhausted());
    }

    #[test]
    fn test_swap_all_updates_maps() {
        // Ones [0, 1], zeros [2, 3]. The first one moves to 2; the second one moves
        // to zero slot 0, which now holds position 0.
        let mut bits = vec![true, true, false, false];
        let mut rng = ScriptedSource::new()
            .with_floats(&[0.0, 0.0])
            .with_indices(&[0, 0]);
        swap_all(&mut bits, 0.5, &mut rng);
        assert_eq!(bits, vec![true, false, true, false]);
    }

    #[test]
    fn test_swap_operators_preserve_weight() {
        let mut rng = RandomNumberGenerator::from_seed(12);
        for _ in 0..100 {
            let mut bits = crate::boolfun::combinatorics::random_fixed_weight(32, 11, &mut rng).unwrap();
            MutationOperator::Swap.apply(&mut bits, 0.9, &mut rng).unwrap();
            MutationOperator::SwapAll.apply(&mut bits, 0.3, &mut rng).unwrap();
            assert_eq!(hamming_weight(&bits), 11);
        }
    }

    #[test]
    fn test_apply_rejects_bad_probability() {
        let mut rng = ScriptedSource::new();
        let mut bits = vec![true, false];
        assert!(MutationOperator::FlipAll.apply(&mut bits, 1.1, &mut rng).is_err());
    }

    #[test]
    fn test_mutate_matrix_swap_keeps_column_weights() {
        let mut rng = RandomNumberGenerator::from_seed(6);
        let mut matrix =
            crate::boolfun::combinatorics::random_balanced_matrix(8, 3, &mut rng).unwrap();
        mutate_matrix(&mut matrix, 1.0, false, &mut rng).unwrap();
        for col in 0..3 {
            assert_eq!(matrix.iter().filter(|row| row[col]).count(), 4);
        }
    }

    #[test]
    fn test_mutate_matrix_flip_scripted() {
        let mut matrix = vec![vec![false, false], vec![false, false]];
        // Column 0 visits rows 0 and 1, then column 1.
        let mut rng = ScriptedSource::new().with_floats(&[0.9, 0.1, 0.1, 0.9]);
        mutate_matrix(&mut matrix, 0.5, true, &mut rng).unwrap();
        assert_eq!(matrix, vec![vec![false, true], vec![true, false]]);
    }
}

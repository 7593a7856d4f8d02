//! Classic one-point crossover.

use crate::error::Result;
use crate::rng::RandomSource;

use super::check_parents;

/// Cuts both parents at a uniform point `c` in `[0, len)` and swaps the tails.
///
/// The first child is `parent1[..c] ++ parent2[c..]`, the second the complement
/// recombination. No weight is preserved.
///
/// # Errors
///
/// Returns an error if the parents are empty or differ in length.
pub fn one_point_crossover<R: RandomSource + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> Result<(Vec<bool>, Vec<bool>)> {
    check_parents(parent1, parent2, 0)?;

    let cut = rng.next_index(parent1.len());

    let mut first = Vec::with_capacity(parent1.len());
    first.extend_from_slice(&parent1[..cut]);
    first.extend_from_slice(&parent2[cut..]);

    let mut second = Vec::with_capacity(parent1.len());
    second.extend_from_slice(&parent2[..cut]);
    second.extend_from_slice(&parent1[cut..]);

    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::ScriptedSource;

    #[test]
    fn test_cut_in_the_middle() {
        let parent1 = vec![true, true, true, true];
        let parent2 = vec![false, false, false, false];
        let mut rng = ScriptedSource::new().with_indices(&[1]);

        let (first, second) = one_point_crossover(&parent1, &parent2, &mut rng).unwrap();
        assert_eq!(first, vec![true, false, false, false]);
        assert_eq!(second, vec![false, true, true, true]);
    }

    #[test]
    fn test_cut_at_zero_swaps_parents() {
        let parent1 = vec![true, false];
        let parent2 = vec![false, true];
        let mut rng = ScriptedSource::new().with_indices(&[0]);

        let (first, second) = one_point_crossover(&parent1, &parent2, &mut rng).unwrap();
        assert_eq!(first, parent2);
        assert_eq!(second, parent1);
    }

    #[test]
    fn test_empty_parents_rejected() {
        let mut rng = ScriptedSource::new();
        assert!(one_point_crossover(&[], &[], &mut rng).is_err());
    }
}

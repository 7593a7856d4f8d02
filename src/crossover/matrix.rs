//! Column-wise crossover of binary matrices.
//!
//! Candidate orthogonal arrays are `N x k` binary matrices whose columns are
//! the unit of recombination. Parents are transposed so each column becomes a
//! row, the rows are crossed pairwise, and the child is transposed back.

use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;

use super::CrossoverOperator;

/// Returns the transpose of a rectangular matrix.
///
/// # Errors
///
/// Returns `GeneticError::Configuration` if the matrix or its first row is empty,
/// and `GeneticError::LengthMismatch` if the rows differ in length.
pub fn transpose(matrix: &[Vec<bool>]) -> Result<Vec<Vec<bool>>> {
    let cols = matrix.first().map_or(0, Vec::len);
    if cols == 0 {
        return Err(GeneticError::Configuration(
            "cannot transpose an empty matrix".to_string(),
        ));
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != cols) {
        return Err(GeneticError::LengthMismatch {
            expected: cols,
            actual: row.len(),
        });
    }

    Ok((0..cols)
        .map(|j| matrix.iter().map(|row| row[j]).collect())
        .collect())
}

/// Crosses two matrices column by column with the given operator.
///
/// Column `j` of the child is `operator.cross(column j of parent1, column j of
/// parent2, column_weight, ..)`, processed in column order with a single random
/// source.
///
/// # Errors
///
/// Returns an error if the parents are not rectangular, differ in shape, or
/// if any column crossover fails.
pub fn cross_matrix<R: RandomSource + ?Sized>(
    operator: &CrossoverOperator,
    parent1: &[Vec<bool>],
    parent2: &[Vec<bool>],
    column_weight: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<Vec<bool>>> {
    if parent1.len() != parent2.len() {
        return Err(GeneticError::LengthMismatch {
            expected: parent1.len(),
            actual: parent2.len(),
        });
    }

    let columns1 = transpose(parent1)?;
    let columns2 = transpose(parent2)?;
    if columns1.len() != columns2.len() {
        return Err(GeneticError::LengthMismatch {
            expected: columns1.len(),
            actual: columns2.len(),
        });
    }

    let child_columns = columns1
        .iter()
        .zip(&columns2)
        .map(|(column1, column2)| operator.cross(column1, column2, column_weight, shuffle, rng))
        .collect::<Result<Vec<_>>>()?;

    transpose(&child_columns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boolfun::combinatorics::random_balanced_matrix;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_transpose() {
        let matrix = vec![vec![true, false, true], vec![false, false, true]];
        let transposed = transpose(&matrix).unwrap();
        assert_eq!(
            transposed,
            vec![vec![true, false], vec![false, false], vec![true, true]]
        );
        assert_eq!(transpose(&transposed).unwrap(), matrix);
    }

    #[test]
    fn test_transpose_rejects_ragged_and_empty() {
        assert!(transpose(&[]).is_err());
        assert!(transpose(&[vec![]]).is_err());
        assert!(transpose(&[vec![true, false], vec![true]]).is_err());
    }

    #[test]
    fn test_cross_matrix_keeps_columns_balanced() {
        let mut rng = RandomNumberGenerator::from_seed(31);
        let parent1 = random_balanced_matrix(16, 4, &mut rng).unwrap();
        let parent2 = random_balanced_matrix(16, 4, &mut rng).unwrap();

        for operator in [
            CrossoverOperator::BalancedCounter,
            CrossoverOperator::ZeroLengths,
            CrossoverOperator::OneMap,
        ] {
            let child = cross_matrix(&operator, &parent1, &parent2, 8, true, &mut rng).unwrap();
            assert_eq!(child.len(), 16);
            for col in 0..4 {
                assert_eq!(child.iter().filter(|row| row[col]).count(), 8);
            }
        }
    }

    #[test]
    fn test_cross_matrix_shape_mismatch() {
        let mut rng = RandomNumberGenerator::from_seed(2);
        let parent1 = vec![vec![true, false]; 4];
        let parent2 = vec![vec![true, false, true]; 4];
        let result = cross_matrix(
            &CrossoverOperator::OnePoint,
            &parent1,
            &parent2,
            2,
            false,
            &mut rng,
        );
        assert!(result.is_err());
    }
}

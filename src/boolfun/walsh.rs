//! # Walsh Transform Engine
//!
//! The Walsh spectrum of `f` is `W_f(a) = Σ_x (-1)^(f(x) XOR a·x)` for every mask
//! `a`. It is computed in place over the polar form of the truth table with the
//! recursive Fast Walsh Transform in `O(N log N)`, `N = 2^n`.
//!
//! The spectral radius `max_a |W_f(a)|` gives the nonlinearity of the function,
//! `NL(f) = 2^(n-1) - radius / 2`, and `|W_f(0)|` measures its unbalancedness.
//!
//! ## Example
//!
//! ```rust
//! use walshga::boolfun::{walsh::{fast_walsh_transform, nonlinearity}, TruthTable};
//!
//! // f = x1 x2 XOR x3
//! let table = TruthTable::from_binary_str("00011110").unwrap();
//! let mut values = table.to_polar();
//! let radius = fast_walsh_transform(&mut values).unwrap();
//!
//! assert_eq!(radius, 4);
//! assert_eq!(nonlinearity(radius, 3), 2);
//! ```

use crate::boolfun::{num_vars_for_length, TruthTable};
use crate::error::{GeneticError, Result};

/// Transforms `values` into its Walsh spectrum in place and returns the spectral radius.
///
/// The input is destroyed. Callers must not keep another view of the buffer
/// for the duration of the call, which the exclusive borrow enforces.
///
/// # Errors
///
/// Returns `GeneticError::InvalidTruthTable` if the length is not a power of two of at least 2.
pub fn fast_walsh_transform(values: &mut [i32]) -> Result<i32> {
    num_vars_for_length(values.len())?;
    let length = values.len();
    Ok(transform_range(values, 0, length))
}

// Butterfly over [start, start + length): v0 += v1, v1 = old v0 - v1, then both halves.
fn transform_range(values: &mut [i32], start: usize, length: usize) -> i32 {
    let half = length / 2;

    for i in start..start + half {
        let temp = values[i];
        values[i] += values[i + half];
        values[i + half] = temp - values[i + half];
    }

    if half > 1 {
        let left = transform_range(values, start, half);
        let right = transform_range(values, start + half, half);
        left.max(right)
    } else {
        values[start].abs().max(values[start + half].abs())
    }
}

/// Nonlinearity `2^(n-1) - radius / 2` of an `n`-variable function.
pub fn nonlinearity(spectral_radius: i32, num_vars: usize) -> i32 {
    (1i32 << (num_vars - 1)) - spectral_radius / 2
}

/// Largest absolute coefficient of a spectrum; zero for an empty slice.
pub fn spectral_radius_of(coefficients: &[i32]) -> i32 {
    coefficients.iter().map(|c| c.abs()).max().unwrap_or(0)
}

/// The Walsh spectrum of a truth table together with its spectral radius.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalshSpectrum {
    coefficients: Vec<i32>,
    radius: i32,
    num_vars: usize,
}

impl WalshSpectrum {
    /// Computes the spectrum of a truth table with the Fast Walsh Transform.
    pub fn of(table: &TruthTable) -> Self {
        let mut coefficients = table.to_polar();
        let length = coefficients.len();
        let radius = transform_range(&mut coefficients, 0, length);
        Self {
            coefficients,
            radius,
            num_vars: table.num_vars(),
        }
    }

    /// Wraps precomputed coefficients, recomputing the spectral radius by a scan.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::LengthMismatch` if `coefficients.len() != 2^num_vars`.
    pub fn from_coefficients(coefficients: Vec<i32>, num_vars: usize) -> Result<Self> {
        let expected = crate::boolfun::table_length(num_vars)?;
        if coefficients.len() != expected {
            return Err(GeneticError::LengthMismatch {
                expected,
                actual: coefficients.len(),
            });
        }
        let radius = spectral_radius_of(&coefficients);
        Ok(Self {
            coefficients,
            radius,
            num_vars,
        })
    }

    pub fn coefficients(&self) -> &[i32] {
        &self.coefficients
    }

    pub fn into_coefficients(self) -> Vec<i32> {
        self.coefficients
    }

    /// The coefficient `W_f(mask)`, or `None` if the mask is out of range.
    pub fn coefficient(&self, mask: usize) -> Option<i32> {
        self.coefficients.get(mask).copied()
    }

    pub fn spectral_radius(&self) -> i32 {
        self.radius
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn nonlinearity(&self) -> i32 {
        nonlinearity(self.radius, self.num_vars)
    }

    /// `|W_f(0)|`, the absolute excess of zeros over ones in the truth table.
    pub fn unbalancedness(&self) -> i32 {
        self.coefficients[0].abs()
    }
}

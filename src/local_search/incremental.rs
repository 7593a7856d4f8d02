//! Incremental Walsh spectrum update for a single swap.
//!
//! Exchanging the values at positions `y` and `z` of a truth table changes the
//! spectrum by
//!
//! ```text
//! W'(a) = W(a) + (pol f(z) - pol f(y)) * (pol(a·y) - pol(a·z))
//! ```
//!
//! where `pol(b) = 1 - 2b` and `a·y` is the parity of `a & y`. Each coefficient
//! costs a constant amount of work, so the update is `O(2^n)` against the
//! `O(n 2^n)` of a full transform.

use crate::boolfun::walsh::WalshSpectrum;
use crate::boolfun::TruthTable;
use crate::error::{GeneticError, Result};

#[inline]
fn polar(bit: bool) -> i32 {
    if bit {
        -1
    } else {
        1
    }
}

#[inline]
fn polar_dot(a: usize, x: usize) -> i32 {
    polar((a & x).count_ones() & 1 == 1)
}

/// Writes the spectrum of `bits` with `y` and `z` swapped into `out`.
///
/// `spectrum` must be the spectrum of `bits`, and all three slices must share
/// the same length. Swapping equal values leaves the spectrum unchanged.
pub(crate) fn swap_update_into(bits: &[bool], spectrum: &[i32], y: usize, z: usize, out: &mut [i32]) {
    let delta = polar(bits[z]) - polar(bits[y]);
    if delta == 0 {
        out.copy_from_slice(spectrum);
        return;
    }

    for (a, (updated, &coefficient)) in out.iter_mut().zip(spectrum).enumerate() {
        *updated = coefficient + delta * (polar_dot(a, y) - polar_dot(a, z));
    }
}

/// Returns the spectrum of `table` after swapping positions `y` and `z`.
///
/// # Errors
///
/// Returns `GeneticError::LengthMismatch` if the spectrum does not match the
/// table, and `GeneticError::LocalSearch` if a position is out of range.
pub fn update_spectrum_swap(
    table: &TruthTable,
    spectrum: &WalshSpectrum,
    y: usize,
    z: usize,
) -> Result<WalshSpectrum> {
    let length = table.len();
    if spectrum.coefficients().len() != length {
        return Err(GeneticError::LengthMismatch {
            expected: length,
            actual: spectrum.coefficients().len(),
        });
    }
    if y >= length || z >= length {
        return Err(GeneticError::LocalSearch(format!(
            "swap positions ({}, {}) out of range for length {}",
            y, z, length
        )));
    }

    let mut updated = vec![0; length];
    swap_update_into(table.bits(), spectrum.coefficients(), y, z, &mut updated);
    WalshSpectrum::from_coefficients(updated, table.num_vars())
}

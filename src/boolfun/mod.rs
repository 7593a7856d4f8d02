//! # Boolean Function Representations
//!
//! This module provides the truth-table representation of Boolean functions
//! and the bit-level primitives the search operators are built on: polar
//! conversion, Hamming weight, maps of ones and zeros, and zero-run-length maps.
//!
//! Truth tables are indexed least-significant-bit first: entry `x` holds `f(x)`
//! where bit `i` of `x` is the value of variable `x_{i+1}`.
//!
//! ## Example
//!
//! ```rust
//! use walshga::boolfun::TruthTable;
//!
//! // f(x1, x2, x3) = x1 XOR x2 XOR x3
//! let table = TruthTable::from_binary_str("01101001").unwrap();
//! assert_eq!(table.num_vars(), 3);
//! assert_eq!(table.weight(), 4);
//! assert!(table.is_balanced());
//! assert_eq!(table.to_polar(), vec![1, -1, -1, 1, -1, 1, 1, -1]);
//! ```

pub mod combinatorics;
pub mod walsh;

use std::fmt;

use crate::error::{GeneticError, Result};

/// Largest supported number of variables.
///
/// Walsh coefficients are stored as `i32`, which holds `±2^n` for every `n` up to this bound.
pub const MAX_VARS: usize = 30;

/// Returns the truth-table length `2^num_vars`.
///
/// # Errors
///
/// Returns `GeneticError::InvalidTruthTable` if `num_vars` is zero or larger than [`MAX_VARS`].
pub fn table_length(num_vars: usize) -> Result<usize> {
    if num_vars == 0 || num_vars > MAX_VARS {
        return Err(GeneticError::InvalidTruthTable(format!(
            "number of variables must be in 1..={}, got {}",
            MAX_VARS, num_vars
        )));
    }
    Ok(1usize << num_vars)
}

/// Returns `n` such that `length == 2^n`.
///
/// # Errors
///
/// Returns `GeneticError::InvalidTruthTable` if `length` is not a power of two of at least 2.
pub fn num_vars_for_length(length: usize) -> Result<usize> {
    if length < 2 || !length.is_power_of_two() {
        return Err(GeneticError::InvalidTruthTable(format!(
            "length must be a power of two of at least 2, got {}",
            length
        )));
    }
    let num_vars = length.trailing_zeros() as usize;
    table_length(num_vars)?;
    Ok(num_vars)
}

/// The truth table of a Boolean function of `n` variables.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TruthTable {
    bits: Vec<bool>,
    num_vars: usize,
}

impl TruthTable {
    /// Creates a truth table, deriving the number of variables from its length.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidTruthTable` if the length is not a power of two of at least 2.
    pub fn new(bits: Vec<bool>) -> Result<Self> {
        let num_vars = num_vars_for_length(bits.len())?;
        Ok(Self { bits, num_vars })
    }

    /// Creates a truth table for a declared number of variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_vars` is unsupported or `bits.len() != 2^num_vars`.
    pub fn with_num_vars(num_vars: usize, bits: Vec<bool>) -> Result<Self> {
        let expected = table_length(num_vars)?;
        if bits.len() != expected {
            return Err(GeneticError::LengthMismatch {
                expected,
                actual: bits.len(),
            });
        }
        Ok(Self { bits, num_vars })
    }

    /// Creates the constant-zero function of `num_vars` variables.
    pub fn zeros(num_vars: usize) -> Result<Self> {
        let length = table_length(num_vars)?;
        Ok(Self {
            bits: vec![false; length],
            num_vars,
        })
    }

    /// Parses a string of `0`/`1` characters, entry 0 first.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidTruthTable` on any other character or on an invalid length.
    pub fn from_binary_str(s: &str) -> Result<Self> {
        let bits = s
            .chars()
            .map(|c| match c {
                '0' => Ok(false),
                '1' => Ok(true),
                other => Err(GeneticError::InvalidTruthTable(format!(
                    "unexpected character '{}' in binary string",
                    other
                ))),
            })
            .collect::<Result<Vec<bool>>>()?;
        Self::new(bits)
    }

    pub fn num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Always `false`: a valid truth table has at least two entries.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn into_bits(self) -> Vec<bool> {
        self.bits
    }

    /// Returns `f(x)`, or `None` if `x` is outside the table.
    pub fn get(&self, x: usize) -> Option<bool> {
        self.bits.get(x).copied()
    }

    /// The Hamming weight (number of ones) of the table.
    pub fn weight(&self) -> usize {
        hamming_weight(&self.bits)
    }

    pub fn is_balanced(&self) -> bool {
        self.weight() * 2 == self.bits.len()
    }

    /// The polar form of the table (`false -> 1`, `true -> -1`).
    pub fn to_polar(&self) -> Vec<i32> {
        to_polar(&self.bits)
    }

    /// Returns a copy of the table with entries `y` and `z` exchanged.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::InvalidTruthTable` if either position is out of range.
    pub fn with_swapped(&self, y: usize, z: usize) -> Result<Self> {
        if y >= self.bits.len() || z >= self.bits.len() {
            return Err(GeneticError::InvalidTruthTable(format!(
                "swap positions ({}, {}) out of range for length {}",
                y,
                z,
                self.bits.len()
            )));
        }
        let mut bits = self.bits.clone();
        bits.swap(y, z);
        Ok(Self {
            bits,
            num_vars: self.num_vars,
        })
    }

    /// Hexadecimal rendering of the table read as a number whose bit `x` is `f(x)`.
    pub fn to_hex(&self) -> String {
        self.bits
            .chunks(4)
            .rev()
            .map(|nibble| {
                let value = nibble
                    .iter()
                    .enumerate()
                    .filter(|(_, &bit)| bit)
                    .fold(0u32, |acc, (i, _)| acc | (1 << i));
                std::char::from_digit(value, 16).unwrap_or('0')
            })
            .collect()
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl AsRef<[bool]> for TruthTable {
    fn as_ref(&self) -> &[bool] {
        &self.bits
    }
}

/// Counts the ones in a bitstring.
pub fn hamming_weight(bits: &[bool]) -> usize {
    bits.iter().filter(|&&bit| bit).count()
}

/// Converts a bitstring to polar form (`false -> 1`, `true -> -1`).
pub fn to_polar(bits: &[bool]) -> Vec<i32> {
    bits.iter().map(|&bit| if bit { -1 } else { 1 }).collect()
}

/// Converts a polar vector back to bits; negative entries become `true`.
pub fn from_polar(values: &[i32]) -> Vec<bool> {
    values.iter().map(|&value| value < 0).collect()
}

/// Ascending positions holding a one.
pub fn ones_map(bits: &[bool]) -> Vec<usize> {
    bits.iter()
        .enumerate()
        .filter_map(|(i, &bit)| bit.then_some(i))
        .collect()
}

/// Ascending positions holding a zero.
pub fn zeros_map(bits: &[bool]) -> Vec<usize> {
    bits.iter()
        .enumerate()
        .filter_map(|(i, &bit)| (!bit).then_some(i))
        .collect()
}

/// Run lengths of zeros preceding each one, with the trailing zeros in the last slot.
///
/// The map has `map_len` slots; a bitstring of weight `w` fills `w` of them with
/// the zeros counted before each one, and the last slot with the zeros after the
/// final one. Unused middle slots stay at zero.
///
/// # Errors
///
/// Returns `GeneticError::Crossover` if the bitstring holds more than `map_len - 1` ones.
pub fn zero_lengths_map(bits: &[bool], map_len: usize) -> Result<Vec<usize>> {
    let weight = hamming_weight(bits);
    if map_len == 0 || weight >= map_len {
        return Err(GeneticError::Crossover(format!(
            "a bitstring of weight {} does not fit a zero-lengths map of {} slots",
            weight, map_len
        )));
    }

    let mut map = vec![0; map_len];
    let mut run = 0;
    let mut slot = 0;
    for &bit in bits {
        if bit {
            map[slot] = run;
            run = 0;
            slot += 1;
        } else {
            run += 1;
        }
    }
    map[map_len - 1] = run;

    Ok(map)
}

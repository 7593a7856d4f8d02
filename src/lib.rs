//! Steady-state genetic algorithm and Walsh-spectrum local search for
//! cryptographic Boolean functions.
//!
//! Functions are represented by their truth tables and scored on their Walsh
//! spectrum. Weight-preserving crossovers keep the Hamming weight of every
//! child fixed, and the local search scores swap neighbours from an
//! incrementally updated spectrum.

pub mod boolfun;
pub mod crossover;
pub mod error;
pub mod evolution;
pub mod local_search;
pub mod mutation;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use boolfun::walsh::WalshSpectrum;
pub use boolfun::TruthTable;
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{EvolutionOptions, EvolutionResult, FitnessFunction, SteadyStateGa};

use crate::boolfun::walsh::WalshSpectrum;
use crate::boolfun::TruthTable;
use crate::selection::Objective;

/// A fitness criterion scored on the Walsh spectrum of a Boolean function.
///
/// Scoring from the spectrum alone is what lets the local search evaluate a
/// neighbour from an incrementally updated spectrum without rebuilding the
/// truth table or rerunning the transform.
pub trait Challenge: Send + Sync {
    /// Whether higher or lower scores are better.
    fn objective(&self) -> Objective;

    /// Scores a spectrum given as raw coefficients of an `num_vars`-variable function.
    fn score_coefficients(&self, coefficients: &[i32], num_vars: usize) -> f64;

    /// Scores a computed spectrum.
    fn score(&self, spectrum: &WalshSpectrum) -> f64 {
        self.score_coefficients(spectrum.coefficients(), spectrum.num_vars())
    }

    /// Runs the Fast Walsh Transform on a truth table and scores the result.
    fn evaluate(&self, table: &TruthTable) -> (WalshSpectrum, f64) {
        let spectrum = WalshSpectrum::of(table);
        let fitness = self.score(&spectrum);
        (spectrum, fitness)
    }
}

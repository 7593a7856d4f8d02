use crate::boolfun::walsh::WalshSpectrum;
use crate::boolfun::TruthTable;
use crate::error::{GeneticError, Result};
use crate::evolution::Challenge;
use crate::local_search::SearchSolution;
use crate::selection::Objective;

/// A truth table together with its cached fitness and, when available, its spectrum.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    table: TruthTable,
    fitness: f64,
    spectrum: Option<WalshSpectrum>,
}

impl Individual {
    /// Evaluates a truth table, keeping the computed spectrum.
    pub fn evaluate<C: Challenge + ?Sized>(table: TruthTable, challenge: &C) -> Self {
        let (spectrum, fitness) = challenge.evaluate(&table);
        Self {
            table,
            fitness,
            spectrum: Some(spectrum),
        }
    }

    /// Wraps an already scored truth table without a spectrum.
    pub fn new(table: TruthTable, fitness: f64) -> Self {
        Self {
            table,
            fitness,
            spectrum: None,
        }
    }

    pub fn table(&self) -> &TruthTable {
        &self.table
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn spectrum(&self) -> Option<&WalshSpectrum> {
        self.spectrum.as_ref()
    }

    pub fn weight(&self) -> usize {
        self.table.weight()
    }
}

impl From<SearchSolution> for Individual {
    fn from(solution: SearchSolution) -> Self {
        let (table, spectrum, fitness) = solution.into_parts();
        Self {
            table,
            fitness,
            spectrum: Some(spectrum),
        }
    }
}

/// Summary statistics of a population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub best_fitness: f64,
    pub average_fitness: f64,
    pub best_weight: usize,
    pub average_weight: f64,
}

/// A fixed-size population with a single designated best individual.
///
/// The best index only changes through [`Population::replace`], which is
/// how the steady-state loop keeps elitism under its own control.
#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    fitness: Vec<f64>,
    objective: Objective,
    best: usize,
}

impl Population {
    /// Creates a population and locates its best individual.
    ///
    /// When maximizing the last maximum is chosen, when minimizing the first minimum.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `individuals` is empty.
    pub fn new(individuals: Vec<Individual>, objective: Objective) -> Result<Self> {
        let fitness: Vec<f64> = individuals.iter().map(Individual::fitness).collect();
        let best = objective.best_position(&fitness)?;
        Ok(Self {
            individuals,
            fitness,
            objective,
            best,
        })
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn get(&self, index: usize) -> Option<&Individual> {
        self.individuals.get(index)
    }

    /// The fitness of every slot, in slot order.
    pub fn fitness(&self) -> &[f64] {
        &self.fitness
    }

    pub fn best_index(&self) -> usize {
        self.best
    }

    pub fn best(&self) -> &Individual {
        &self.individuals[self.best]
    }

    pub fn best_fitness(&self) -> f64 {
        self.fitness[self.best]
    }

    /// Overwrites `slot` with `individual`, making it the best if `new_best` is set.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Selection` if `slot` is out of range, or if the best
    /// slot is overwritten without `new_best`.
    pub fn replace(&mut self, slot: usize, individual: Individual, new_best: bool) -> Result<()> {
        if slot >= self.individuals.len() {
            return Err(GeneticError::Selection(format!(
                "replacement slot {} out of range for population size {}",
                slot,
                self.individuals.len()
            )));
        }
        if slot == self.best && !new_best {
            return Err(GeneticError::Selection(
                "the best individual can only be replaced by a new best".to_string(),
            ));
        }

        self.fitness[slot] = individual.fitness();
        self.individuals[slot] = individual;
        if new_best {
            self.best = slot;
        }
        Ok(())
    }

    /// Best and average fitness and Hamming weight.
    pub fn stats(&self) -> PopulationStats {
        let count = self.individuals.len() as f64;
        let average_fitness = self.fitness.iter().sum::<f64>() / count;
        let average_weight =
            self.individuals.iter().map(Individual::weight).sum::<usize>() as f64 / count;

        PopulationStats {
            best_fitness: self.best_fitness(),
            average_fitness,
            best_weight: self.best().weight(),
            average_weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evolution::FitnessFunction;

    fn individual(bits: &str) -> Individual {
        let table = TruthTable::from_binary_str(bits).unwrap();
        Individual::evaluate(table, &FitnessFunction::nonlinearity())
    }

    fn sample() -> Population {
        Population::new(
            vec![
                individual("01101001"),
                individual("00011110"),
                individual("00110101"),
            ],
            Objective::Maximize,
        )
        .unwrap()
    }

    #[test]
    fn test_best_is_last_maximum() {
        let population = sample();
        assert_eq!(population.fitness(), &[0.0, 2.0, 2.0]);
        assert_eq!(population.best_index(), 2);
        assert_eq!(population.best_fitness(), 2.0);
    }

    #[test]
    fn test_empty_population_rejected() {
        assert!(matches!(
            Population::new(vec![], Objective::Minimize),
            Err(GeneticError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_replace_updates_fitness_and_best() {
        let mut population = sample();
        population.replace(0, individual("00011110"), false).unwrap();
        assert_eq!(population.fitness()[0], 2.0);
        assert_eq!(population.best_index(), 2);

        let challenger = Individual::new(population.best().table().clone(), 9.0);
        population.replace(1, challenger, true).unwrap();
        assert_eq!(population.best_index(), 1);
        assert_eq!(population.best_fitness(), 9.0);
    }

    #[test]
    fn test_replace_protects_best() {
        let mut population = sample();
        assert!(population.replace(2, individual("01101001"), false).is_err());
        assert!(population.replace(3, individual("01101001"), true).is_err());
    }

    #[test]
    fn test_stats() {
        let stats = sample().stats();
        assert_eq!(stats.best_fitness, 2.0);
        assert!((stats.average_fitness - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.best_weight, 4);
        assert_eq!(stats.average_weight, 4.0);
    }

    #[test]
    fn test_individual_keeps_spectrum() {
        let ind = individual("00011110");
        assert_eq!(ind.spectrum().map(|s| s.spectral_radius()), Some(4));
        assert!(Individual::new(ind.table().clone(), 2.0).spectrum().is_none());
    }
}

//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct holds the configuration of a steady-state run:
//! the problem size, the population and budget, the variation operators, and
//! the optional extras (local search, cooling of the unbalancedness probability,
//! periodic reporting).
//!
//! ## Example
//!
//! ```rust
//! use walshga::crossover::CrossoverOperator;
//! use walshga::evolution::options::{EvolutionOptions, WeightTarget};
//!
//! let options = EvolutionOptions::builder()
//!     .num_vars(6)
//!     .population_size(30)
//!     .fitness_evaluations(2_000)
//!     .tournament_size(3)
//!     .mutation_probability(0.2)
//!     .crossover(CrossoverOperator::OneMap)
//!     .weight(WeightTarget::Balanced)
//!     .seed(42)
//!     .build();
//!
//! assert!(options.validate().is_ok());
//! assert_eq!(options.resolved_weight().unwrap(), 32);
//! ```
//!
//! Options that break a precondition are reported by [`EvolutionOptions::validate`]:
//!
//! ```rust
//! use walshga::evolution::options::EvolutionOptions;
//!
//! let options = EvolutionOptions::builder()
//!     .population_size(4)
//!     .tournament_size(5)
//!     .build();
//! assert!(options.validate().is_err());
//! ```

use crate::boolfun::combinatorics::bent_weight;
use crate::boolfun::{table_length, MAX_VARS};
use crate::crossover::CrossoverOperator;
use crate::error::{check_probability, GeneticError, Result};
use crate::evolution::FitnessFunction;
use crate::local_search::SwapNeighborhoodSearch;
use crate::mutation::MutationOperator;

/// The Hamming weight every individual is built with.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeightTarget {
    /// Half of the truth table.
    Balanced,
    /// The weight `2^(n-1) - 2^(n/2-1)` of a bent function; `n` must be even.
    Bent,
    /// An explicit weight, at most the truth-table length.
    Exact(usize),
}

impl WeightTarget {
    /// The concrete weight for `num_vars` variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_vars` is unsupported, if the bent weight is
    /// requested for an odd `num_vars`, or if an exact weight exceeds `2^num_vars`.
    pub fn resolve(&self, num_vars: usize) -> Result<usize> {
        let length = table_length(num_vars)?;
        match *self {
            WeightTarget::Balanced => Ok(length / 2),
            WeightTarget::Bent => bent_weight(num_vars),
            WeightTarget::Exact(weight) if weight <= length => Ok(weight),
            WeightTarget::Exact(weight) => Err(GeneticError::WeightOutOfRange { weight, length }),
        }
    }
}

impl Default for WeightTarget {
    fn default() -> Self {
        WeightTarget::Balanced
    }
}

/// Geometric decay of the unbalancedness probability of the unbalanced counter crossover.
///
/// Every `interval` iterations (never at iteration 0) the probability is multiplied by `factor`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoolingSchedule {
    pub factor: f64,
    pub interval: usize,
}

impl CoolingSchedule {
    pub fn new(factor: f64, interval: usize) -> Self {
        Self { factor, interval }
    }

    /// Whether the probability decays before `iteration` runs.
    pub fn is_due(&self, iteration: usize) -> bool {
        iteration > 0 && iteration % self.interval == 0
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    num_vars: usize,
    population_size: usize,
    fitness_evaluations: usize,
    tournament_size: usize,
    mutation_probability: f64,
    crossover: CrossoverOperator,
    shuffle: bool,
    seed: Option<u64>,
    weight: WeightTarget,
    fitness: Option<FitnessFunction>,
    mutation: Option<MutationOperator>,
    local_search: Option<SwapNeighborhoodSearch>,
    cooling: Option<CoolingSchedule>,
    report_interval: Option<usize>,
}

impl EvolutionOptions {
    /// Returns a builder for creating an `EvolutionOptions` instance.
    ///
    /// Unset fields take the values of [`EvolutionOptions::default`].
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }

    pub fn get_num_vars(&self) -> usize {
        self.num_vars
    }

    pub fn get_population_size(&self) -> usize {
        self.population_size
    }

    /// The number of child evaluations the run may spend, local search included.
    pub fn get_fitness_evaluations(&self) -> usize {
        self.fitness_evaluations
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn get_mutation_probability(&self) -> f64 {
        self.mutation_probability
    }

    pub fn get_crossover(&self) -> CrossoverOperator {
        self.crossover
    }

    pub fn get_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_weight(&self) -> WeightTarget {
        self.weight
    }

    pub fn get_local_search(&self) -> Option<&SwapNeighborhoodSearch> {
        self.local_search.as_ref()
    }

    pub fn get_cooling(&self) -> Option<CoolingSchedule> {
        self.cooling
    }

    pub fn get_report_interval(&self) -> Option<usize> {
        self.report_interval
    }

    /// Sets the number of fitness evaluations.
    pub fn set_fitness_evaluations(&mut self, fitness_evaluations: usize) {
        self.fitness_evaluations = fitness_evaluations;
    }

    /// Sets the seed.
    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// The length `2^n` of every truth table.
    ///
    /// # Errors
    ///
    /// Returns an error if `num_vars` is unsupported.
    pub fn table_length(&self) -> Result<usize> {
        table_length(self.num_vars)
    }

    /// The target weight for the configured number of variables.
    ///
    /// # Errors
    ///
    /// See [`WeightTarget::resolve`].
    pub fn resolved_weight(&self) -> Result<usize> {
        self.weight.resolve(self.num_vars)
    }

    /// The configured fitness function, or the default for the crossover:
    /// nonlinearity, penalized by unbalancedness when the crossover does not
    /// preserve weight.
    pub fn resolved_fitness(&self) -> FitnessFunction {
        self.fitness.unwrap_or(FitnessFunction::Nonlinearity {
            penalize_unbalancedness: !self.crossover.preserves_weight(),
        })
    }

    /// The configured mutation, or the default paired with the crossover.
    pub fn resolved_mutation(&self) -> MutationOperator {
        self.mutation
            .unwrap_or_else(|| MutationOperator::default_for(&self.crossover))
    }

    /// Checks every precondition of a run.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` describing the first violated precondition.
    pub fn validate(&self) -> Result<()> {
        if self.num_vars == 0 || self.num_vars > MAX_VARS {
            return Err(GeneticError::Configuration(format!(
                "Number of variables must be in 1..={}, got {}",
                MAX_VARS, self.num_vars
            )));
        }

        if self.population_size < 2 {
            return Err(GeneticError::Configuration(
                "Population size must be at least 2".to_string(),
            ));
        }

        if self.fitness_evaluations == 0 {
            return Err(GeneticError::Configuration(
                "Number of fitness evaluations cannot be zero".to_string(),
            ));
        }

        if self.tournament_size < 2 || self.tournament_size > self.population_size {
            return Err(GeneticError::Configuration(format!(
                "Tournament size must be between 2 and the population size {}, got {}",
                self.population_size, self.tournament_size
            )));
        }

        check_probability(self.mutation_probability, "mutation probability")
            .map_err(|e| GeneticError::Configuration(e.to_string()))?;

        if let Some(p) = self.crossover.unbalance_probability() {
            check_probability(p, "unbalancedness probability")
                .map_err(|e| GeneticError::Configuration(e.to_string()))?;
        }

        self.resolved_weight()
            .map_err(|e| GeneticError::Configuration(e.to_string()))?;

        self.resolved_fitness()
            .validate(self.num_vars)?;

        if let Some(cooling) = self.cooling {
            if !cooling.factor.is_finite() || !(0.0..=1.0).contains(&cooling.factor) {
                return Err(GeneticError::Configuration(format!(
                    "Cooling factor must be in [0, 1], got {}",
                    cooling.factor
                )));
            }
            if cooling.interval == 0 {
                return Err(GeneticError::Configuration(
                    "Cooling interval cannot be zero".to_string(),
                ));
            }
        }

        if self.report_interval == Some(0) {
            return Err(GeneticError::Configuration(
                "Report interval cannot be zero".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            num_vars: 6,
            population_size: 50,
            fitness_evaluations: 10_000,
            tournament_size: 3,
            mutation_probability: 0.1,
            crossover: CrossoverOperator::BalancedCounter,
            shuffle: false,
            seed: None,
            weight: WeightTarget::Balanced,
            fitness: None,
            mutation: None,
            local_search: None,
            cooling: None,
            report_interval: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    num_vars: Option<usize>,
    population_size: Option<usize>,
    fitness_evaluations: Option<usize>,
    tournament_size: Option<usize>,
    mutation_probability: Option<f64>,
    crossover: Option<CrossoverOperator>,
    shuffle: Option<bool>,
    seed: Option<u64>,
    weight: Option<WeightTarget>,
    fitness: Option<FitnessFunction>,
    mutation: Option<MutationOperator>,
    local_search: Option<SwapNeighborhoodSearch>,
    cooling: Option<CoolingSchedule>,
    report_interval: Option<usize>,
}

impl EvolutionOptionsBuilder {
    /// Sets the number of variables `n`; truth tables have length `2^n`.
    pub fn num_vars(mut self, value: usize) -> Self {
        self.num_vars = Some(value);
        self
    }

    /// Sets the population size.
    pub fn population_size(mut self, value: usize) -> Self {
        self.population_size = Some(value);
        self
    }

    /// Sets the evaluation budget.
    pub fn fitness_evaluations(mut self, value: usize) -> Self {
        self.fitness_evaluations = Some(value);
        self
    }

    /// Sets the tournament size.
    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    /// Sets the mutation probability.
    pub fn mutation_probability(mut self, value: f64) -> Self {
        self.mutation_probability = Some(value);
        self
    }

    /// Sets the crossover operator.
    pub fn crossover(mut self, value: CrossoverOperator) -> Self {
        self.crossover = Some(value);
        self
    }

    /// Sets whether crossovers fill the child in a random order.
    pub fn shuffle(mut self, value: bool) -> Self {
        self.shuffle = Some(value);
        self
    }

    /// Sets the seed; without one the generator is seeded from entropy.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Sets the target weight.
    pub fn weight(mut self, value: WeightTarget) -> Self {
        self.weight = Some(value);
        self
    }

    /// Overrides the fitness function.
    pub fn fitness(mut self, value: FitnessFunction) -> Self {
        self.fitness = Some(value);
        self
    }

    /// Overrides the mutation operator.
    pub fn mutation(mut self, value: MutationOperator) -> Self {
        self.mutation = Some(value);
        self
    }

    /// Enables local search on every child.
    pub fn local_search(mut self, value: SwapNeighborhoodSearch) -> Self {
        self.local_search = Some(value);
        self
    }

    /// Enables cooling of the unbalancedness probability.
    pub fn cooling(mut self, value: CoolingSchedule) -> Self {
        self.cooling = Some(value);
        self
    }

    /// Logs population statistics every `value` iterations.
    pub fn report_interval(mut self, value: usize) -> Self {
        self.report_interval = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            num_vars: self.num_vars.unwrap_or(defaults.num_vars),
            population_size: self.population_size.unwrap_or(defaults.population_size),
            fitness_evaluations: self
                .fitness_evaluations
                .unwrap_or(defaults.fitness_evaluations),
            tournament_size: self.tournament_size.unwrap_or(defaults.tournament_size),
            mutation_probability: self
                .mutation_probability
                .unwrap_or(defaults.mutation_probability),
            crossover: self.crossover.unwrap_or(defaults.crossover),
            shuffle: self.shuffle.unwrap_or(defaults.shuffle),
            seed: self.seed,
            weight: self.weight.unwrap_or(defaults.weight),
            fitness: self.fitness,
            mutation: self.mutation,
            local_search: self.local_search,
            cooling: self.cooling,
            report_interval: self.report_interval,
        }
    }
}

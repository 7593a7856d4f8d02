//! # Steady-State GA
//!
//! The evolution loop. Each iteration breeds exactly one child:
//!
//! 1. two parents are picked by tournament,
//! 2. crossed over and mutated,
//! 3. the child is evaluated and optionally improved by local search,
//! 4. elitist replacement decides whether and where it enters the population.
//!
//! The run ends when the evaluation budget is spent. Child evaluations and
//! local-search neighbour evaluations are charged against the budget; the
//! initial population is not.
//!
//! ## Example
//!
//! ```rust
//! use walshga::evolution::{EvolutionOptions, SteadyStateGa};
//!
//! let options = EvolutionOptions::builder()
//!     .num_vars(4)
//!     .population_size(10)
//!     .fitness_evaluations(200)
//!     .seed(7)
//!     .build();
//!
//! let mut ga = SteadyStateGa::new(options).unwrap();
//! let result = ga.run().unwrap();
//! assert_eq!(result.evaluations, 200);
//! assert_eq!(result.table.weight(), 8);
//! ```

use tracing::{debug, info};

use crate::boolfun::combinatorics::{partially_unbalanced, random_fixed_weight, random_unbalanced};
use crate::boolfun::TruthTable;
use crate::crossover::CrossoverOperator;
use crate::error::Result;
use crate::evolution::fitness::FitnessFunction;
use crate::evolution::options::EvolutionOptions;
use crate::evolution::population::{Individual, Population, PopulationStats};
use crate::evolution::Challenge;
use crate::local_search::SearchSolution;
use crate::mutation::MutationOperator;
use crate::rng::{RandomNumberGenerator, RandomSource};
use crate::selection::{ElitistReplacement, ReplacementOutcome, TournamentSelection};

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initialized,
    Iterating,
    Terminated,
}

/// The outcome of a run: the best function found and how it was reached.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The best truth table of the final population.
    pub table: TruthTable,
    /// Its fitness.
    pub score: f64,
    /// Evaluations charged against the budget.
    pub evaluations: usize,
    /// Children bred.
    pub iterations: usize,
    pub stats: PopulationStats,
}

/// A steady-state genetic algorithm over truth tables.
#[derive(Debug)]
pub struct SteadyStateGa<C = FitnessFunction, R = RandomNumberGenerator> {
    options: EvolutionOptions,
    challenge: C,
    rng: R,
    population: Population,
    selection: TournamentSelection,
    replacement: ElitistReplacement,
    crossover: CrossoverOperator,
    mutation: MutationOperator,
    weight: usize,
    evaluations: usize,
    iterations: usize,
    state: RunState,
}

impl SteadyStateGa<FitnessFunction, RandomNumberGenerator> {
    /// Creates a run using the configured fitness function and a generator
    /// seeded from the options (or from entropy without a seed).
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the options are invalid.
    pub fn new(options: EvolutionOptions) -> Result<Self> {
        let challenge = options.resolved_fitness();
        let rng = RandomNumberGenerator::from_optional_seed(options.get_seed());
        Self::with_challenge(options, challenge, rng)
    }
}

impl<C, R> SteadyStateGa<C, R>
where
    C: Challenge,
    R: RandomSource,
{
    /// Creates a run with an explicit challenge and random source, and
    /// evaluates the initial population.
    ///
    /// The fitness override in `options` is ignored; `challenge` is used instead.
    ///
    /// # Arguments
    ///
    /// * `options` - The run configuration.
    /// * `challenge` - The criterion being optimized.
    /// * `rng` - The random source; every draw of the run comes from it.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the options are invalid, or the
    /// error of the initial population generator.
    pub fn with_challenge(options: EvolutionOptions, challenge: C, mut rng: R) -> Result<Self> {
        options.validate()?;

        let num_vars = options.get_num_vars();
        let length = options.table_length()?;
        let weight = options.resolved_weight()?;
        let crossover = options.get_crossover();

        let individuals = (0..options.get_population_size())
            .map(|_| -> Result<Individual> {
                let bits = initial_bits(&crossover, length, weight, options.get_shuffle(), &mut rng)?;
                let table = TruthTable::with_num_vars(num_vars, bits)?;
                Ok(Individual::evaluate(table, &challenge))
            })
            .collect::<Result<Vec<_>>>()?;

        let objective = challenge.objective();
        let population = Population::new(individuals, objective)?;
        let selection = TournamentSelection::new(options.get_tournament_size(), objective)?;
        let mutation = options.resolved_mutation();

        Ok(Self {
            options,
            challenge,
            rng,
            population,
            selection,
            replacement: ElitistReplacement::new(objective),
            crossover,
            mutation,
            weight,
            evaluations: 0,
            iterations: 0,
            state: RunState::Initialized,
        })
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn challenge(&self) -> &C {
        &self.challenge
    }

    /// The crossover in use, with the unbalancedness probability as cooled so far.
    pub fn crossover(&self) -> CrossoverOperator {
        self.crossover
    }

    pub fn evaluations(&self) -> usize {
        self.evaluations
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Breeds one child and places it.
    ///
    /// Returns `None` once the budget is spent, otherwise where the child went.
    ///
    /// # Errors
    ///
    /// Propagates operator errors; with validated options none are expected.
    pub fn step(&mut self) -> Result<Option<ReplacementOutcome>> {
        let budget = self.options.get_fitness_evaluations();
        if self.state == RunState::Terminated || self.evaluations >= budget {
            self.state = RunState::Terminated;
            return Ok(None);
        }
        self.state = RunState::Iterating;

        self.cool();

        let (first, second) = self
            .selection
            .select_parents(self.population.fitness(), &mut self.rng)?;
        let parent_fitness = (
            self.population.fitness()[first],
            self.population.fitness()[second],
        );

        let individuals = self.population.individuals();
        let mut child = self.crossover.cross(
            individuals[first].table().bits(),
            individuals[second].table().bits(),
            self.weight,
            self.options.get_shuffle(),
            &mut self.rng,
        )?;
        self.mutation.apply(
            &mut child,
            self.options.get_mutation_probability(),
            &mut self.rng,
        )?;

        let table = TruthTable::with_num_vars(self.options.get_num_vars(), child)?;
        let mut solution = SearchSolution::evaluate(table, &self.challenge);
        self.evaluations += 1;

        if let Some(search) = self.options.get_local_search() {
            let remaining = budget.saturating_sub(self.evaluations);
            let outcome = search.improve(solution, &self.challenge, remaining)?;
            self.evaluations += outcome.evaluations;
            solution = outcome.solution;
        }

        let outcome = self.replacement.decide(
            solution.fitness(),
            parent_fitness,
            self.population.best_fitness(),
            self.population.best_index(),
            self.population.len(),
            &mut self.rng,
        )?;

        match outcome {
            ReplacementOutcome::Discarded => {}
            ReplacementOutcome::Replaced { slot } => {
                self.population.replace(slot, Individual::from(solution), false)?;
            }
            ReplacementOutcome::NewBest { slot } => {
                debug!(
                    iteration = self.iterations,
                    evaluations = self.evaluations,
                    fitness = solution.fitness(),
                    slot,
                    "New best individual"
                );
                self.population.replace(slot, Individual::from(solution), true)?;
            }
        }

        self.iterations += 1;
        if let Some(interval) = self.options.get_report_interval() {
            if self.iterations % interval == 0 {
                self.report();
            }
        }
        if self.evaluations >= budget {
            self.state = RunState::Terminated;
        }

        Ok(Some(outcome))
    }

    /// Steps until the budget is spent and returns the best individual.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by [`SteadyStateGa::step`].
    pub fn run(&mut self) -> Result<EvolutionResult> {
        info!(
            num_vars = self.options.get_num_vars(),
            population_size = self.population.len(),
            budget = self.options.get_fitness_evaluations(),
            weight = self.weight,
            crossover = %self.crossover,
            mutation = %self.mutation,
            "Starting steady-state run"
        );

        while self.step()?.is_some() {}

        let result = self.result();
        info!(
            best = result.score,
            evaluations = result.evaluations,
            iterations = result.iterations,
            table = %result.table.to_hex(),
            "Run finished"
        );
        self.report();
        Ok(result)
    }

    /// The best individual so far and the run counters.
    pub fn result(&self) -> EvolutionResult {
        let best = self.population.best();
        EvolutionResult {
            table: best.table().clone(),
            score: best.fitness(),
            evaluations: self.evaluations,
            iterations: self.iterations,
            stats: self.population.stats(),
        }
    }

    fn cool(&mut self) {
        let Some(cooling) = self.options.get_cooling() else {
            return;
        };
        if !cooling.is_due(self.iterations) {
            return;
        }
        if let Some(p) = self.crossover.unbalance_probability() {
            let cooled = p * cooling.factor;
            self.crossover = self.crossover.with_unbalance_probability(cooled);
            debug!(
                iteration = self.iterations,
                unbalance_p = cooled,
                "Cooled unbalancedness probability"
            );
        }
    }

    fn report(&self) {
        let stats = self.population.stats();
        info!(
            iteration = self.iterations,
            evaluations = self.evaluations,
            best_fitness = stats.best_fitness,
            average_fitness = stats.average_fitness,
            best_weight = stats.best_weight,
            average_weight = stats.average_weight,
            "Population statistics"
        );
    }
}

fn initial_bits<R: RandomSource + ?Sized>(
    crossover: &CrossoverOperator,
    length: usize,
    weight: usize,
    shuffle: bool,
    rng: &mut R,
) -> Result<Vec<bool>> {
    match *crossover {
        CrossoverOperator::OnePoint => Ok(random_unbalanced(length, rng)),
        CrossoverOperator::UnbalancedCounter { unbalance_p } => {
            partially_unbalanced(length, weight, unbalance_p, shuffle, rng)
        }
        _ => random_fixed_weight(length, weight, rng),
    }
}

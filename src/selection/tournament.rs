use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;
use crate::selection::Objective;

/// Parent selection by a single tournament returning two winners.
///
/// A pool of `tournament_size` population indices is drawn uniformly with
/// replacement. The two pool entries with the best fitness (highest when
/// maximizing, lowest when minimizing) become the parents.
///
/// Ties follow a fixed scan of the pool. The first two entries are ordered by a
/// strict comparison, the second winning ties. Each later entry then replaces
/// the leader if strictly better, and otherwise replaces the runner-up if
/// strictly better than it. A dethroned leader is not moved to runner-up.
///
/// # Examples
///
/// ```
/// use walshga::rng::RandomNumberGenerator;
/// use walshga::selection::{Objective, TournamentSelection};
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut rng = RandomNumberGenerator::from_seed(42);
///
/// let selection = TournamentSelection::new(3, Objective::Maximize).unwrap();
/// let (first, second) = selection.select_parents(&fitness, &mut rng).unwrap();
///
/// assert!(first < fitness.len() && second < fitness.len());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct TournamentSelection {
    tournament_size: usize,
    objective: Objective,
}

impl TournamentSelection {
    /// Creates a new tournament selection.
    ///
    /// # Arguments
    ///
    /// * `tournament_size` - The number of entries drawn into the pool. Must be at least 2.
    /// * `objective` - Whether higher or lower fitness wins.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `tournament_size` is below 2.
    pub fn new(tournament_size: usize, objective: Objective) -> Result<Self> {
        if tournament_size < 2 {
            return Err(GeneticError::Configuration(
                "Tournament size must be at least 2".to_string(),
            ));
        }

        Ok(Self {
            tournament_size,
            objective,
        })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Runs one tournament and returns the population indices of the two winners.
    ///
    /// The first index is the tournament leader. Both may refer to the same
    /// individual if it was drawn twice.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `fitness` is empty, and
    /// `GeneticError::Selection` if the tournament is larger than the population.
    pub fn select_parents<R: RandomSource + ?Sized>(
        &self,
        fitness: &[f64],
        rng: &mut R,
    ) -> Result<(usize, usize)> {
        if fitness.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        if self.tournament_size > fitness.len() {
            return Err(GeneticError::Selection(format!(
                "Tournament size {} exceeds population size {}",
                self.tournament_size,
                fitness.len()
            )));
        }

        let pool: Vec<usize> = (0..self.tournament_size)
            .map(|_| rng.next_index(fitness.len()))
            .collect();

        let better = |a: usize, b: usize| self.objective.is_better(fitness[a], fitness[b]);

        let (mut leader, mut runner_up) = if better(pool[0], pool[1]) {
            (pool[0], pool[1])
        } else {
            (pool[1], pool[0])
        };

        for &candidate in &pool[2..] {
            if better(candidate, leader) {
                leader = candidate;
            } else if better(candidate, runner_up) {
                runner_up = candidate;
            }
        }

        Ok((leader, runner_up))
    }
}

use crate::error::{GeneticError, Result};
use crate::rng::RandomSource;
use crate::selection::Objective;

/// Where a child ended up after elitist replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplacementOutcome {
    /// The child did not beat either parent and was dropped.
    Discarded,
    /// The child overwrote a slot other than the best one.
    Replaced { slot: usize },
    /// The child beat the current best, overwrote `slot`, and is now the best.
    NewBest { slot: usize },
}

impl ReplacementOutcome {
    /// The slot the child was written to, if any.
    pub fn slot(&self) -> Option<usize> {
        match self {
            ReplacementOutcome::Discarded => None,
            ReplacementOutcome::Replaced { slot } | ReplacementOutcome::NewBest { slot } => {
                Some(*slot)
            }
        }
    }
}

/// Draws the slot a child will overwrite.
///
/// With `replace_best` set the slot is uniform over the whole population.
/// Otherwise it is uniform over every slot except `best`, so the incumbent
/// best survives.
///
/// # Errors
///
/// Returns `GeneticError::Selection` if `best` is out of range or if the best
/// must be protected in a population of fewer than two slots.
pub fn select_for_death<R: RandomSource + ?Sized>(
    population_size: usize,
    replace_best: bool,
    best: usize,
    rng: &mut R,
) -> Result<usize> {
    if best >= population_size {
        return Err(GeneticError::Selection(format!(
            "best index {} out of range for population size {}",
            best, population_size
        )));
    }

    if replace_best {
        return Ok(rng.next_index(population_size));
    }

    if population_size < 2 {
        return Err(GeneticError::Selection(
            "no slot other than the best is available for replacement".to_string(),
        ));
    }

    let pick = rng.next_index(population_size - 1);
    Ok(if pick < best { pick } else { pick + 1 })
}

/// Elitist steady-state replacement.
///
/// A child enters the population only if it is strictly better than at least
/// one of its two parents. A child strictly better than the current best may
/// land anywhere, including on the best slot, and becomes the new best; any
/// other accepted child lands on a uniformly chosen non-best slot.
///
/// The acceptance test compares against the parents only. A child that beats
/// the worst individual of the population but neither of its parents is
/// still discarded.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElitistReplacement {
    objective: Objective,
}

impl ElitistReplacement {
    pub fn new(objective: Objective) -> Self {
        Self { objective }
    }

    pub fn objective(&self) -> Objective {
        self.objective
    }

    /// Decides the fate of a child. No randomness is drawn for a discarded child.
    ///
    /// # Arguments
    ///
    /// * `child_fitness` - Fitness of the evaluated child.
    /// * `parent_fitness` - Fitness of the two parents it was bred from.
    /// * `best_fitness` - Fitness of the current best individual.
    /// * `best` - Slot of the current best individual.
    /// * `population_size` - Number of slots in the population.
    /// * `rng` - The random source of the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot draw fails; see [`select_for_death`].
    pub fn decide<R: RandomSource + ?Sized>(
        &self,
        child_fitness: f64,
        parent_fitness: (f64, f64),
        best_fitness: f64,
        best: usize,
        population_size: usize,
        rng: &mut R,
    ) -> Result<ReplacementOutcome> {
        let beats_parent = self.objective.is_better(child_fitness, parent_fitness.0)
            || self.objective.is_better(child_fitness, parent_fitness.1);
        if !beats_parent {
            return Ok(ReplacementOutcome::Discarded);
        }

        if self.objective.is_better(child_fitness, best_fitness) {
            let slot = select_for_death(population_size, true, best, rng)?;
            Ok(ReplacementOutcome::NewBest { slot })
        } else {
            let slot = select_for_death(population_size, false, best, rng)?;
            Ok(ReplacementOutcome::Replaced { slot })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::testing::ScriptedSource;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_select_for_death_skips_best() {
        // Replaceable slots are [0, 1, 3, 4] when the best is 2.
        let mut rng = ScriptedSource::new().with_indices(&[1, 2, 3]);
        assert_eq!(select_for_death(5, false, 2, &mut rng).unwrap(), 1);
        assert_eq!(select_for_death(5, false, 2, &mut rng).unwrap(), 3);
        assert_eq!(select_for_death(5, false, 2, &mut rng).unwrap(), 4);
    }

    #[test]
    fn test_select_for_death_never_hits_best() {
        let mut rng = RandomNumberGenerator::from_seed(10);
        for _ in 0..500 {
            let slot = select_for_death(6, false, 0, &mut rng).unwrap();
            assert!(slot > 0 && slot < 6);
        }
    }

    #[test]
    fn test_select_for_death_can_hit_best_when_allowed() {
        let mut rng = ScriptedSource::new().with_indices(&[2]);
        assert_eq!(select_for_death(5, true, 2, &mut rng).unwrap(), 2);
    }

    #[test]
    fn test_select_for_death_errors() {
        let mut rng = ScriptedSource::new();
        assert!(select_for_death(1, false, 0, &mut rng).is_err());
        assert!(select_for_death(3, true, 3, &mut rng).is_err());
    }

    #[test]
    fn test_discarded_child_draws_nothing() {
        let replacement = ElitistReplacement::new(Objective::Maximize);
        let mut rng = ScriptedSource::new();
        let outcome = replacement
            .decide(2.0, (2.0, 3.0), 10.0, 0, 4, &mut rng)
            .unwrap();
        assert_eq!(outcome, ReplacementOutcome::Discarded);
        assert_eq!(outcome.slot(), None);
    }

    #[test]
    fn test_child_beating_a_parent_replaces_non_best() {
        let replacement = ElitistReplacement::new(Objective::Maximize);
        let mut rng = ScriptedSource::new().with_indices(&[0]);
        let outcome = replacement
            .decide(4.0, (2.0, 6.0), 10.0, 0, 4, &mut rng)
            .unwrap();
        assert_eq!(outcome, ReplacementOutcome::Replaced { slot: 1 });
    }

    #[test]
    fn test_child_beating_best_may_overwrite_best() {
        let replacement = ElitistReplacement::new(Objective::Minimize);
        let mut rng = ScriptedSource::new().with_indices(&[3]);
        let outcome = replacement
            .decide(0.5, (2.0, 6.0), 1.0, 3, 4, &mut rng)
            .unwrap();
        assert_eq!(outcome, ReplacementOutcome::NewBest { slot: 3 });
    }

    #[test]
    fn test_child_equal_to_best_is_not_new_best() {
        let replacement = ElitistReplacement::new(Objective::Maximize);
        let mut rng = ScriptedSource::new().with_indices(&[2]);
        let outcome = replacement
            .decide(10.0, (2.0, 6.0), 10.0, 1, 4, &mut rng)
            .unwrap();
        assert_eq!(outcome, ReplacementOutcome::Replaced { slot: 3 });
    }
}

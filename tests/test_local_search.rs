use proptest::prelude::*;
use walshga::boolfun::combinatorics::random_fixed_weight;
use walshga::boolfun::walsh::WalshSpectrum;
use walshga::boolfun::TruthTable;
use walshga::evolution::{Challenge, FitnessFunction};
use walshga::local_search::{
    best_neighbor, best_neighbor_parallel, find_improving_neighbor, hill_climb, neighbor_count,
    update_spectrum_swap, LocalSearchMode, SearchSolution, SwapNeighborhoodSearch,
};
use walshga::rng::RandomNumberGenerator;

fn table(num_vars: usize, weight: usize, seed: u64) -> TruthTable {
    let mut rng = RandomNumberGenerator::from_seed(seed);
    let bits = random_fixed_weight(1 << num_vars, weight, &mut rng).unwrap();
    TruthTable::with_num_vars(num_vars, bits).unwrap()
}

#[test]
fn test_incremental_update_matches_transform_for_every_swap() {
    let table = table(4, 7, 3);
    let spectrum = WalshSpectrum::of(&table);

    for y in 0..table.len() {
        for z in 0..table.len() {
            let updated = update_spectrum_swap(&table, &spectrum, y, z).unwrap();
            let expected = WalshSpectrum::of(&table.with_swapped(y, z).unwrap());
            assert_eq!(updated, expected, "swap ({}, {})", y, z);
        }
    }
}

proptest! {
    #[test]
    fn test_incremental_update_random_swaps(
        bits in prop::collection::vec(any::<bool>(), 64),
        y in 0usize..64,
        z in 0usize..64,
    ) {
        let table = TruthTable::new(bits).unwrap();
        let spectrum = WalshSpectrum::of(&table);
        let updated = update_spectrum_swap(&table, &spectrum, y, z).unwrap();
        prop_assert_eq!(updated, WalshSpectrum::of(&table.with_swapped(y, z).unwrap()));
    }
}

#[test]
fn test_hill_climb_reaches_fixed_point() {
    let challenges = [
        FitnessFunction::nonlinearity(),
        FitnessFunction::penalized_nonlinearity(),
        FitnessFunction::bent_distance(),
    ];

    for challenge in challenges {
        for seed in 0..4 {
            let start = SearchSolution::evaluate(table(6, 28, seed), &challenge);
            let result = hill_climb(start.clone(), &challenge).unwrap();

            assert!(!challenge.objective().is_better(start.fitness(), result.fitness()));
            assert_eq!(result.table().weight(), 28);
            assert_eq!(result.spectrum(), &WalshSpectrum::of(result.table()));
            assert_eq!(result.fitness(), challenge.score(result.spectrum()));
            assert!(find_improving_neighbor(&result, &challenge).unwrap().is_none());
            assert_eq!(best_neighbor(&result, &challenge).unwrap(), result);
        }
    }
}

#[test]
fn test_parallel_scan_is_deterministic() {
    let challenge = FitnessFunction::nonlinearity();
    for seed in 0..8 {
        let start = SearchSolution::evaluate(table(7, 64, seed), &challenge);
        assert_eq!(
            best_neighbor(&start, &challenge).unwrap(),
            best_neighbor_parallel(&start, &challenge).unwrap()
        );
    }
}

#[test]
fn test_search_allowance_is_honoured() {
    let challenge = FitnessFunction::nonlinearity();
    let start = SearchSolution::evaluate(table(5, 16, 1), &challenge);
    let scan = neighbor_count(&start);
    assert_eq!(scan, 256);

    let search = SwapNeighborhoodSearch::new(LocalSearchMode::HillClimb).parallel(true);
    for allowance in [0, scan - 1, scan, 2 * scan + 1, 10 * scan] {
        let outcome = search.improve(start.clone(), &challenge, allowance).unwrap();
        assert!(outcome.evaluations <= allowance);
        assert_eq!(outcome.evaluations % scan, 0);
    }
}

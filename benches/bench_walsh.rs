use criterion::{black_box, criterion_group, criterion_main, Criterion};
use walshga::{
    boolfun::{combinatorics::random_balanced, walsh::fast_walsh_transform, TruthTable},
    evolution::FitnessFunction,
    local_search::{best_neighbor, best_neighbor_parallel, update_spectrum_swap, SearchSolution},
    rng::RandomNumberGenerator,
    WalshSpectrum,
};

fn random_table(num_vars: usize, rng: &mut RandomNumberGenerator) -> TruthTable {
    let bits = random_balanced(1 << num_vars, rng).unwrap();
    TruthTable::with_num_vars(num_vars, bits).unwrap()
}

fn bench_transform(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(1);

    let mut group = c.benchmark_group("walsh_transform");
    for num_vars in [8, 12, 16].iter() {
        let table = random_table(*num_vars, &mut rng);
        group.bench_function(&format!("full_transform_{}", num_vars), |b| {
            b.iter(|| {
                let mut values = table.to_polar();
                fast_walsh_transform(black_box(&mut values)).unwrap()
            })
        });

        let spectrum = WalshSpectrum::of(&table);
        let (y, z) = (0, table.len() - 1);
        group.bench_function(&format!("swap_update_{}", num_vars), |b| {
            b.iter(|| update_spectrum_swap(black_box(&table), black_box(&spectrum), y, z).unwrap())
        });
    }
    group.finish();
}

fn bench_neighborhood(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(2);
    let challenge = FitnessFunction::nonlinearity();

    let mut group = c.benchmark_group("best_neighbor");
    group.sample_size(10);
    for num_vars in [6, 8].iter() {
        let start = SearchSolution::evaluate(random_table(*num_vars, &mut rng), &challenge);
        group.bench_function(&format!("sequential_{}", num_vars), |b| {
            b.iter(|| best_neighbor(black_box(&start), &challenge).unwrap())
        });
        group.bench_function(&format!("parallel_{}", num_vars), |b| {
            b.iter(|| best_neighbor_parallel(black_box(&start), &challenge).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transform, bench_neighborhood);
criterion_main!(benches);

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use cvrp_simulator::{
    problem::fleet::Fleet,
    random::seeded_rng::SeededRng,
    scenario::scenario_generator::ScenarioGenerator,
    solver::{
        algorithm::{AlgorithmId, AlgorithmParameters},
        comparison::compare_algorithms,
        simulation::SimulationEngine,
    },
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

fn rng_benchmark(c: &mut Criterion) {
    let mut seeded = SeededRng::new("bench");
    c.bench_function("seeded rng next_f64", |b| {
        b.iter(|| black_box(seeded.next_f64()))
    });

    let mut seeded = SeededRng::new("bench");
    c.bench_function("seeded rng as rand::Rng", |b| {
        b.iter(|| black_box(seeded.random::<f64>()))
    });

    let mut small = SmallRng::seed_from_u64(1);
    c.bench_function("small rng", |b| b.iter(|| black_box(small.random::<f64>())));
}

fn simulation_benchmark(c: &mut Criterion) {
    let generator = ScenarioGenerator::default();
    let engine = SimulationEngine::default();
    let parameters = AlgorithmParameters::new();
    let fleet = Fleet::uniform(4, 60);

    let city_grid = generator.create_instance("city-grid", "12345").unwrap();
    c.bench_function("simulate city-grid", |b| {
        b.iter(|| {
            engine.simulate(
                black_box(&city_grid),
                black_box(&fleet),
                AlgorithmId::Tabu,
                &parameters,
                "12345",
            )
        })
    });

    c.bench_function("create random instance", |b| {
        b.iter(|| generator.create_instance("random", black_box("12345")))
    });

    let random = generator.create_instance("random", "12345").unwrap();
    c.bench_function("compare algorithms", |b| {
        b.iter(|| compare_algorithms(&engine, black_box(&random), &fleet, "12345"))
    });
}

criterion_group!(benches, rng_benchmark, simulation_benchmark);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use trade_loop_engine::cycles::{enumerate_cycles, EnumerationConfig};
use trade_loop_engine::graph::trade_graph::TradeGraph;
use trade_loop_engine::period::{DefaultGenerator, ParticipantGenerator, StaticCatalog};

fn synthetic_participants(count: u32, seed: u64) -> Vec<trade_loop_engine::core::participant::Participant> {
    let mut rng = StdRng::seed_from_u64(seed);
    let catalog = StaticCatalog::synthetic(200, (500.0, 25000.0), &mut rng);
    DefaultGenerator.generate(count, 1, &catalog, &mut rng)
}

fn bench_enumerate_30_participants(c: &mut Criterion) {
    let participants = synthetic_participants(30, 1);
    let graph = TradeGraph::build(&participants).unwrap();
    let map: std::collections::HashMap<_, _> = participants
        .iter()
        .map(|p| (p.participant_id().clone(), p.clone()))
        .collect();
    let config = EnumerationConfig::default();

    c.bench_function("enumerate_cycles_30_participants", |b| {
        b.iter(|| enumerate_cycles(black_box(&graph), black_box(&map), black_box(&config)))
    });
}

fn bench_enumerate_100_participants(c: &mut Criterion) {
    let participants = synthetic_participants(100, 2);
    let graph = TradeGraph::build(&participants).unwrap();
    let map: std::collections::HashMap<_, _> = participants
        .iter()
        .map(|p| (p.participant_id().clone(), p.clone()))
        .collect();
    let config = EnumerationConfig::default();

    c.bench_function("enumerate_cycles_100_participants", |b| {
        b.iter(|| enumerate_cycles(black_box(&graph), black_box(&map), black_box(&config)))
    });
}

fn bench_enumerate_500_participants(c: &mut Criterion) {
    let participants = synthetic_participants(500, 3);
    let graph = TradeGraph::build(&participants).unwrap();
    let map: std::collections::HashMap<_, _> = participants
        .iter()
        .map(|p| (p.participant_id().clone(), p.clone()))
        .collect();
    let config = EnumerationConfig::default();

    c.bench_function("enumerate_cycles_500_participants", |b| {
        b.iter(|| enumerate_cycles(black_box(&graph), black_box(&map), black_box(&config)))
    });
}

fn bench_build_graph_500_participants(c: &mut Criterion) {
    let participants = synthetic_participants(500, 4);

    c.bench_function("build_trade_graph_500_participants", |b| {
        b.iter(|| TradeGraph::build(black_box(&participants)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_enumerate_30_participants,
    bench_enumerate_100_participants,
    bench_enumerate_500_participants,
    bench_build_graph_500_participants
);
criterion_main!(benches);

use criterion::{criterion_group, criterion_main, Criterion};
use sat_bcp::assignment::{Assignment, PackedAssignment, VecAssignment};
use sat_bcp::clause_store::ClauseStore;
use sat_bcp::generate::{random_3sat, random_ksat};
use sat_bcp::literal::{DimacsLiteral, Literal, PackedLiteral};
use sat_bcp::propagation::{EagerWatches, Propagator, Status, UnitSearch, WatchedLiterals};
use sat_bcp::trail::Trail;
use std::hint::black_box;
use std::time::Duration;

/// Random-polarity DPLL-style search, chronological backtracking, capped at
/// a fixed number of conflicts. Returns the conflict count so the whole run
/// has an observable result.
fn run_search<P, A, L>(store: &ClauseStore<L>, seed: u64, max_conflicts: u64) -> u64
where
    P: Propagator<L>,
    A: Assignment,
    L: Literal,
{
    let num_vars = u32::try_from(store.num_vars()).unwrap();
    let mut propagator = P::new(store);
    let mut assignment = A::new(store.num_vars());
    let mut trail = Trail::new(store.num_vars());
    let mut rng = fastrand::Rng::with_seed(seed);
    let mut trail_start = 0;
    let mut conflicts = 0;

    while conflicts < max_conflicts {
        let Some(var) = (1..=num_vars).find(|&v| !assignment.is_assigned(v)) else {
            break;
        };

        let mark = trail.len();
        assignment.assign(L::new(var, rng.bool()));
        trail.push(var);

        let (status, new_len) = propagator.propagate(store, &mut assignment, &mut trail, trail_start);

        match status {
            Status::Consistent => trail_start = new_len,
            Status::Conflict(_) => {
                conflicts += 1;
                trail.truncate(mark, &mut assignment);
                trail_start = mark;
            }
        }
    }

    conflicts
}

fn bench_engines(c: &mut Criterion) {
    let clauses = random_3sat(100, 426, 1);
    let store = ClauseStore::<PackedLiteral>::new(&clauses, 100).unwrap();

    let mut group = c.benchmark_group("propagation - engine");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Watched literals", |b| {
        b.iter(|| {
            black_box(run_search::<WatchedLiterals<PackedLiteral>, VecAssignment, _>(
                &store, 7, 500,
            ));
        });
    });

    group.bench_function("Eager watches", |b| {
        b.iter(|| {
            black_box(run_search::<EagerWatches<PackedLiteral>, VecAssignment, _>(
                &store, 7, 500,
            ));
        });
    });

    group.bench_function("Full scan", |b| {
        b.iter(|| {
            black_box(run_search::<UnitSearch, VecAssignment, _>(&store, 7, 500));
        });
    });

    group.finish();
}

fn bench_clause_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("propagation - clause width");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    for width in [3, 5, 8] {
        let clauses = random_ksat(80, 340, width, 2);
        let store = ClauseStore::<PackedLiteral>::new(&clauses, 80).unwrap();

        group.bench_function(format!("k = {width}"), |b| {
            b.iter(|| {
                black_box(run_search::<WatchedLiterals<PackedLiteral>, VecAssignment, _>(
                    &store, 7, 500,
                ));
            });
        });
    }

    group.finish();
}

fn bench_literal_layout(c: &mut Criterion) {
    let clauses = random_3sat(100, 426, 1);

    let mut group = c.benchmark_group("propagation - literal layout");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    let store = ClauseStore::<PackedLiteral>::new(&clauses, 100).unwrap();
    group.bench_function("Packed", |b| {
        b.iter(|| {
            black_box(run_search::<WatchedLiterals<PackedLiteral>, VecAssignment, _>(
                &store, 7, 500,
            ));
        });
    });

    let store = ClauseStore::<DimacsLiteral>::new(&clauses, 100).unwrap();
    group.bench_function("Signed", |b| {
        b.iter(|| {
            black_box(run_search::<WatchedLiterals<DimacsLiteral>, VecAssignment, _>(
                &store, 7, 500,
            ));
        });
    });

    group.finish();
}

fn bench_assignment_backing(c: &mut Criterion) {
    let clauses = random_3sat(100, 426, 1);
    let store = ClauseStore::<PackedLiteral>::new(&clauses, 100).unwrap();

    let mut group = c.benchmark_group("propagation - assignment backing");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("Vec", |b| {
        b.iter(|| {
            black_box(run_search::<WatchedLiterals<PackedLiteral>, VecAssignment, _>(
                &store, 7, 500,
            ));
        });
    });

    group.bench_function("Bit packed", |b| {
        b.iter(|| {
            black_box(run_search::<WatchedLiterals<PackedLiteral>, PackedAssignment, _>(
                &store, 7, 500,
            ));
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_engines,
    bench_clause_width,
    bench_literal_layout,
    bench_assignment_backing
);

criterion_main!(benches);

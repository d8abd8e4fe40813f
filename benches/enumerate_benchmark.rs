/*!
 * Enumeration Benchmarks
 *
 * Cost of a process-table snapshot and of a single memory probe.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hostproc::ProcessTable;

/// Benchmark: snapshot at several capacities
fn bench_list(c: &mut Criterion) {
    let table = ProcessTable::new();
    let mut group = c.benchmark_group("process/list");

    for capacity in [1usize, 16, 128, 1024].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            capacity,
            |b, &capacity| b.iter(|| black_box(table.list(capacity))),
        );
    }

    group.finish();
}

/// Benchmark: resident-memory probe of the current process
fn bench_memory_probe(c: &mut Criterion) {
    let table = ProcessTable::new();
    let me = std::process::id();

    c.bench_function("process/memory_of_self", |b| {
        b.iter(|| black_box(table.memory_of(black_box(me))))
    });
}

criterion_group!(benches, bench_list, bench_memory_probe);
criterion_main!(benches);

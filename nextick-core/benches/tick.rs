//! Clock and stream benchmarks.
//!
//! Measures the cost of advancing the clock with many live thunks and of
//! stepping composed streams.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nextick_core::{Runtime, Stream};

fn ints(rt: &Runtime, start: u64) -> Stream<u64> {
    let rt = rt.clone();
    Stream::unfold(move |n: u64| (n, rt.schedule(move || n + 1)), start)
}

fn bench_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("advance");

    for live in [16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::from_parameter(live), &live, |b, &live| {
            b.iter(|| {
                let rt = Runtime::new();
                let thunks: Vec<_> = (0..live).map(|i| rt.schedule(move || i)).collect();
                rt.advance();
                rt.advance();
                black_box(thunks);
            });
        });
    }

    group.finish();
}

fn bench_stream_step(c: &mut Criterion) {
    c.bench_function("stream_step_zip_map_100", |b| {
        b.iter(|| {
            let rt = Runtime::new();
            let mut xs = ints(&rt, 0).zip(ints(&rt, 1)).map(|(a, b)| a + b);
            for _ in 0..100 {
                rt.advance();
                xs = xs.step().expect("continuation forced on its tick");
            }
            black_box(*xs.value())
        });
    });
}

criterion_group!(benches, bench_advance, bench_stream_step);
criterion_main!(benches);

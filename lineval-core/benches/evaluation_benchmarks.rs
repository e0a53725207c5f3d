//! Performance benchmarks for line alignment and corpus evaluation
//!
//! Run with: cargo bench --bench evaluation_benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lineval_core::{align_str, EvaluatorConfig, ParallelEvaluator};
use std::hint::black_box;

/// Generate a line of the given length and a noisy copy of it
fn generate_pair(len: usize) -> (String, String) {
    let base = "The quick brown fox jumps over the lazy dog. ";
    let line: String = base.chars().cycle().take(len).collect();
    let noisy: String = line
        .chars()
        .enumerate()
        .filter_map(|(i, c)| match i % 17 {
            3 => None,
            9 => Some('e'),
            _ => Some(c),
        })
        .collect();
    (line, noisy)
}

/// Benchmark alignment cost for growing line lengths
fn bench_line_lengths(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_lengths");

    for len in [16, 64, 256, 1024] {
        let (gt, pred) = generate_pair(len);

        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::new("align", len), &(gt, pred), |b, (gt, pred)| {
            b.iter(|| align_str(black_box(gt), black_box(pred)));
        });
    }

    group.finish();
}

/// Benchmark corpus evaluation with different worker counts
fn bench_worker_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("worker_counts");

    let pairs: Vec<(String, String)> = (0..2_000).map(|i| generate_pair(40 + i % 80)).collect();
    let gt: Vec<&str> = pairs.iter().map(|(g, _)| g.as_str()).collect();
    let pred: Vec<&str> = pairs.iter().map(|(_, p)| p.as_str()).collect();

    for workers in [1, 2, 4, 8] {
        let config = EvaluatorConfig::builder()
            .worker_count(workers)
            .retain_lines(false)
            .build()
            .unwrap();
        let evaluator = ParallelEvaluator::new(config).unwrap();

        group.throughput(Throughput::Elements(gt.len() as u64));
        group.bench_with_input(BenchmarkId::new("workers", workers), &workers, |b, _| {
            b.iter(|| evaluator.evaluate_corpus(black_box(gt.as_slice()), black_box(pred.as_slice())).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_line_lengths, bench_worker_counts);
criterion_main!(benches);

//! Benchmarks for leg chaining and pattern validation.

use chartlegs::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Deterministic zigzag of `n` points
fn generate_points(n: usize) -> Vec<Point> {
  let mut points = Vec::with_capacity(n);
  let mut price = 100.0;
  let mut bar = 0i64;

  for i in 0..n {
    let swing = 1.0 + ((i * 7 + 13) % 10) as f64 / 5.0; // Deterministic "random"
    price += if i % 2 == 0 { swing } else { -swing };
    bar += 1 + ((i * 3) % 5) as i64;
    points.push(Point::new(bar, price));
  }

  points
}

fn bench_from_points(c: &mut Criterion) {
  let points = generate_points(5);

  c.bench_function("xabcd_from_points", |b| {
    b.iter(|| {
      let _ = black_box(make_pattern_from_points(
        black_box(&points),
        PatternType::Xabcd,
        PatternMeta::default(),
      ));
    })
  });
}

fn bench_zigzag_scaling(c: &mut Criterion) {
  let mut group = c.benchmark_group("zigzag_scaling");

  for size in [10, 100, 1000, 10000].iter() {
    let chain = LegChain::from_points(&generate_points(*size));

    group.bench_with_input(BenchmarkId::new("validate", size), size, |b, _| {
      b.iter(|| black_box(is_valid_for_type(PatternType::Zigzag, black_box(chain.as_slice()))))
    });
  }

  group.finish();
}

fn bench_chain_rebuild(c: &mut Criterion) {
  let points = generate_points(1000);

  c.bench_function("chain_from_1000_points", |b| {
    b.iter(|| black_box(LegChain::from_points(black_box(&points))))
  });
}

fn bench_price_at(c: &mut Criterion) {
  let chain = LegChain::from_points(&generate_points(1000));
  let last = chain.last().map(|l| l.b().x()).unwrap_or(0);

  c.bench_function("price_at_across_chain", |b| {
    b.iter(|| {
      for x in (0..last).step_by(7) {
        for leg in chain.iter() {
          black_box(leg.price_at(black_box(x)));
        }
      }
    })
  });
}

fn bench_parallel_build(c: &mut Criterion) {
  let sets: Vec<Vec<Point>> = (0..256).map(|i| generate_points(4 + i % 3)).collect();
  let keys: Vec<String> = (0..sets.len()).map(|i| format!("P{i}")).collect();
  let candidates: Vec<(&str, &[Point])> =
    keys.iter().map(String::as_str).zip(sets.iter().map(Vec::as_slice)).collect();

  let builder = PatternBuilder::new(PatternType::Xabcd);

  c.bench_function("parallel_build_256_candidates", |b| {
    b.iter(|| {
      let _ = black_box(build_parallel(black_box(&builder), black_box(candidates.clone())));
    })
  });
}

criterion_group!(
  benches,
  bench_from_points,
  bench_zigzag_scaling,
  bench_chain_rebuild,
  bench_price_at,
  bench_parallel_build,
);

criterion_main!(benches);

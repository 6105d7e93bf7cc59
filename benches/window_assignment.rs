use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use degree_window::core::config::{DecayConfig, LambdaScope};
use degree_window::stream::{StreamProcessor, SyntheticStream};
use degree_window::window::compute_theta;
use degree_window::Edge;

fn stream(n: usize) -> Vec<Edge> {
    SyntheticStream::seeded(n, (n as u64 / 2).max(2), 7)
        .expect("valid stream settings")
        .collect()
}

fn bench_assignment(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_stream");

    for &n in &[1_000usize, 10_000, 50_000] {
        let edges = stream(n);
        for scope in [LambdaScope::PerEdge, LambdaScope::Global, LambdaScope::PerWindow] {
            let params = DecayConfig {
                lambda_scope: scope,
                ..Default::default()
            };
            group.bench_with_input(BenchmarkId::new(format!("{:?}", scope), n), &edges, |b, edges| {
                b.iter(|| {
                    let mut processor = StreamProcessor::new(params.clone()).unwrap();
                    for edge in edges {
                        black_box(processor.process(edge).unwrap());
                    }
                    processor.windows().len()
                })
            });
        }
    }
    group.finish();
}

fn bench_theta(c: &mut Criterion) {
    c.bench_function("compute_theta", |b| {
        b.iter(|| compute_theta(black_box(1_234), black_box(56), black_box(1.5)))
    });
}

criterion_group!(benches, bench_assignment, bench_theta);
criterion_main!(benches);

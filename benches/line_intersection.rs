use criterion::{criterion_group, criterion_main, Criterion};
use geo_planar::line_intersection::line_intersection;
use geo_planar::{coord, Line};
use rand::{Rng, SeedableRng};

fn random_lines(count: usize) -> Vec<Line<f64>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            Line::new(
                coord! { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) },
                coord! { x: rng.gen_range(-100.0..100.0), y: rng.gen_range(-100.0..100.0) },
            )
        })
        .collect()
}

fn criterion_benchmark(c: &mut Criterion) {
    let lines = random_lines(256);

    c.bench_function("pairwise line intersections (256 random lines)", |bencher| {
        bencher.iter(|| {
            let mut crossings = 0usize;
            for (i, a) in lines.iter().enumerate() {
                for b in &lines[i + 1..] {
                    if line_intersection(*a, *b).is_some() {
                        crossings += 1;
                    }
                }
            }
            criterion::black_box(crossings)
        });
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

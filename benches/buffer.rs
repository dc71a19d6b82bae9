use criterion::{criterion_group, criterion_main, Criterion};
use geo_planar::buffer::{Buffer, BufferParams, EndCapStyle};
use geo_planar::{Coord, LineString, Polygon};

fn wavy_ring(vertices: usize) -> Polygon<f64> {
    let mut coords: Vec<Coord<f64>> = (0..vertices)
        .map(|i| {
            let theta = 2.0 * std::f64::consts::PI * i as f64 / vertices as f64;
            let radius = 100.0 + 10.0 * (8.0 * theta).sin();
            Coord {
                x: radius * theta.cos(),
                y: radius * theta.sin(),
            }
        })
        .collect();
    coords.push(coords[0]);
    Polygon::new(LineString::new(coords), vec![])
}

fn criterion_benchmark(c: &mut Criterion) {
    let small = wavy_ring(64);
    let large = wavy_ring(1024);

    c.bench_function("buffer wavy ring (64 vertices)", |bencher| {
        bencher.iter(|| criterion::black_box(small.buffer(5.0).unwrap()));
    });

    c.bench_function("buffer wavy ring (1024 vertices)", |bencher| {
        bencher.iter(|| criterion::black_box(large.buffer(5.0).unwrap()));
    });

    c.bench_function("negative buffer wavy ring (1024 vertices)", |bencher| {
        bencher.iter(|| criterion::black_box(large.buffer(-5.0).unwrap()));
    });

    let params = BufferParams::new()
        .with_quadrant_segments(16)
        .with_end_cap_style(EndCapStyle::Flat);
    c.bench_function("buffer wavy ring (high fillet resolution)", |bencher| {
        bencher.iter(|| criterion::black_box(small.buffer_with_params(5.0, &params).unwrap()));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

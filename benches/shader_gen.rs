//! Benchmarks for shader generation and CPU-side engine work.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use wisp::shader;
use wisp::textures::TextureConfig;
use wisp::trail::TrailEngine;

fn bench_shader_generation(c: &mut Criterion) {
    c.bench_function("render_shader", |b| {
        b.iter(|| black_box(shader::render_shader()))
    });
}

fn bench_engine_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine_tick");

    for capacity in [190usize, 1024, 8192] {
        group.bench_with_input(
            BenchmarkId::from_parameter(capacity),
            &capacity,
            |b, &capacity| {
                let mut engine = TrailEngine::new(capacity, 100.0);
                let mut now = 0.0f32;
                b.iter(|| {
                    // 16 ms frames against a 100 ms interval: a steady mix of
                    // zero-emit and one-emit ticks.
                    now += 0.016;
                    black_box(engine.tick(now, 16.0, false))
                });
            },
        );
    }

    group.finish();
}

fn bench_sprite_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("sprite_generation");

    group.bench_function("soft_circle_64", |b| {
        b.iter(|| black_box(TextureConfig::soft_circle(64)))
    });
    group.bench_function("cloud_64", |b| {
        b.iter(|| black_box(TextureConfig::cloud(64, 11)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_shader_generation,
    bench_engine_tick,
    bench_sprite_generation
);
criterion_main!(benches);

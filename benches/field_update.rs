//! Benchmarks for particle field generation and per-frame updates.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use orrery::generate::{generate, FieldRecipe};
use orrery::prelude::*;
use orrery::spawn::hex_to_rgb;
use orrery::SpawnContext;

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let mut ctx = SpawnContext::seeded(1);

    group.bench_function("asteroid_belt", |b| {
        let recipe = FieldRecipe::asteroid_belt();
        b.iter(|| black_box(generate(&recipe, &mut ctx)))
    });

    group.bench_function("starfield", |b| {
        let recipe = FieldRecipe::starfield();
        b.iter(|| black_box(generate(&recipe, &mut ctx)))
    });

    group.bench_function("accretion_disk", |b| {
        let recipe = FieldRecipe::accretion_disk(3.0, hex_to_rgb(0xffaa00));
        b.iter(|| black_box(generate(&recipe, &mut ctx)))
    });

    for count in [2_000u32, 8_000, 32_000] {
        group.bench_with_input(BenchmarkId::new("spiral_galaxy", count), &count, |b, &count| {
            let recipe = FieldRecipe::spiral_galaxy(count);
            b.iter(|| black_box(generate(&recipe, &mut ctx)))
        });
    }

    group.finish();
}

fn bench_field_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("field_update");
    let mut ctx = SpawnContext::seeded(2);

    for count in [2_000u32, 8_000, 32_000] {
        let mut field = generate(&FieldRecipe::spiral_galaxy(count), &mut ctx);
        group.bench_with_input(BenchmarkId::new("spiral_galaxy", count), &count, |b, _| {
            b.iter(|| field.update(black_box(1.0 / 60.0)))
        });
    }

    group.finish();
}

fn bench_scene_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_step");

    for mode in ViewMode::ALL {
        let mut scene = Scene::with_seed(SpaceConfig::default(), 3);
        scene.set_view_mode(mode);
        group.bench_function(mode.name(), |b| b.iter(|| black_box(scene.step(1.0 / 60.0))));
    }

    group.finish();
}

criterion_group!(benches, bench_generate, bench_field_update, bench_scene_step);
criterion_main!(benches);

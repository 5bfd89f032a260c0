use std::hint::black_box;

use confetti_fx::physics::{PhysicsConstants, step_all};
use confetti_fx::{
    EffectConfig, FOUNTAIN_PALETTE, RasterSurface, Renderer, Shape, SpawnParams, Viewport,
    spawn_burst,
};
use criterion::{Criterion, criterion_group, criterion_main};
use glam::Vec2;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_step(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(1);
    let particles = spawn_burst(
        Vec2::new(640.0, 650.0),
        220,
        &FOUNTAIN_PALETTE,
        &SpawnParams::fountain(),
        &mut rng,
    );
    let constants = PhysicsConstants::fountain();

    c.bench_function("step_220_fountain", |b| {
        b.iter(|| {
            let mut particles = particles.clone();
            for frame in 0..60 {
                black_box(step_all(&mut particles, &constants, frame as f32 * 16.7));
            }
        })
    });
}

fn bench_render(c: &mut Criterion) {
    let viewport = Viewport::new(390.0, 844.0, 3.0);
    let config = EffectConfig::fountain();
    let mut rng = StdRng::seed_from_u64(2);
    let particles = spawn_burst(
        config.launch.resolve(&viewport),
        config.particles_per_burst,
        &config.palette,
        &config.spawn,
        &mut rng,
    );
    let mut surface = RasterSurface::new(viewport);
    let renderer = Renderer::new(Shape::Disc);

    c.bench_function("render_220_discs_dpr3", |b| {
        b.iter(|| black_box(renderer.render(&mut surface, &particles)))
    });
}

criterion_group!(benches, bench_step, bench_render);
criterion_main!(benches);

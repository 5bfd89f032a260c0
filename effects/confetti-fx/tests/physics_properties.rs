//! Invariants of the stepper over arbitrary particles and constants

use confetti_fx::physics::{PhysicsConstants, Wind, step};
use confetti_fx::{CONFETTI_PALETTE, Particle, SpawnParams, spawn_burst};
use glam::Vec2;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn constants() -> impl Strategy<Value = PhysicsConstants> {
    (
        0.0f32..2.0,
        0.5f32..1.0,
        0.5f32..20.0,
        proptest::option::of((0.0f32..0.05, 0.0f32..0.01)),
        0.0f32..0.01,
        (0.0f32..1.0, 0.0f32..1.0),
    )
        .prop_map(|(gravity, drag, terminal_velocity, wind, tilt_drift, wobble)| PhysicsConstants {
            gravity,
            drag,
            terminal_velocity,
            wind: wind.map(|(amplitude, frequency)| Wind {
                amplitude,
                frequency,
            }),
            tilt_drift,
            wobble_amplitude: Vec2::new(wobble.0, wobble.1),
        })
}

fn particle() -> impl Strategy<Value = Particle> {
    (
        (-100.0f32..100.0, -100.0f32..100.0),
        (-50.0f32..50.0, -50.0f32..50.0),
        0.0001f32..0.05,
        -10.0f32..10.0,
        -10.0f32..10.0,
    )
        .prop_map(|(position, velocity, decay, wobble, tilt)| {
            let mut p = Particle::new(
                Vec2::new(position.0, position.1),
                Vec2::new(velocity.0, velocity.1),
                3.0,
                CONFETTI_PALETTE[0],
                decay,
            );
            p.wobble = wobble;
            p.wobble_speed = 0.05;
            p.tilt = tilt;
            p.tilt_speed = 0.03;
            p
        })
}

proptest! {
    #[test]
    fn vy_never_exceeds_terminal(
        constants in constants(),
        mut p in particle(),
        frames in 1usize..400,
    ) {
        for frame in 0..frames {
            step(&mut p, &constants, frame as f32 * 16.7);
            if !p.is_alive() {
                break;
            }
            prop_assert!(p.velocity.y <= constants.terminal_velocity);
        }
    }

    #[test]
    fn life_strictly_decreases_while_alive(
        constants in constants(),
        mut p in particle(),
    ) {
        let mut previous = p.life;
        prop_assert_eq!(previous, 1.0);
        while p.is_alive() {
            step(&mut p, &constants, 0.0);
            prop_assert!(p.life < previous);
            previous = p.life;
        }

        // Inert from here on
        let frozen = p.clone();
        step(&mut p, &constants, 1000.0);
        prop_assert_eq!(p, frozen);
    }

    #[test]
    fn round_robin_is_exact(count in 0usize..300, palette_len in 1usize..=6, seed in any::<u64>()) {
        let palette = &CONFETTI_PALETTE[..palette_len];
        let mut rng = StdRng::seed_from_u64(seed);
        let particles = spawn_burst(Vec2::ZERO, count, palette, &SpawnParams::fountain(), &mut rng);

        prop_assert_eq!(particles.len(), count);
        for (i, p) in particles.iter().enumerate() {
            prop_assert_eq!(p.color, palette[i % palette_len]);
            prop_assert_eq!(p.life, 1.0);
        }
    }
}

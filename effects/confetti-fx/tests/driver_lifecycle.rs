//! End-to-end runs of the animation driver against a recording surface

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use confetti_fx::{
    CONFETTI_PALETTE, Color, DrawCall, Driver, DriverState, EffectConfig, ManualHost, RecordingSurface,
    Viewport,
};
use glam::Vec2;
use pretty_assertions::assert_eq;

fn done_counter() -> (Rc<Cell<u32>>, impl FnOnce() + 'static) {
    let calls = Rc::new(Cell::new(0));
    let inner = Rc::clone(&calls);
    (calls, move || inner.set(inner.get() + 1))
}

#[test]
fn test_confetti_burst_runs_to_completion() {
    let _ = env_logger::try_init();
    let mut host = ManualHost::new(Viewport::new(800.0, 600.0, 2.0), 60);
    let mut surface = RecordingSurface::new();
    let (calls, on_done) = done_counter();

    let config = EffectConfig::confetti(Vec2::new(100.0, 100.0));
    let mut driver = Driver::new(config, &mut surface, &mut host)
        .with_seed(42)
        .on_done(on_done);
    driver.start(Duration::ZERO).unwrap();

    let particles = driver.particles();
    assert_eq!(particles.len(), 90);
    for (i, particle) in particles.iter().enumerate() {
        assert_eq!(particle.color, CONFETTI_PALETTE[i % 6]);
        assert_eq!(particle.life, 1.0);
        assert_eq!(particle.position, Vec2::new(100.0, 100.0));
    }

    let mut last_tick = Duration::ZERO;
    while let Some(now) = driver.host_mut().advance() {
        assert_eq!(calls.get(), 0, "completion fired before {now:?}");
        driver.tick(now);
        last_tick = now;
    }

    assert_eq!(driver.state(), DriverState::Done);
    assert_eq!(calls.get(), 1);
    assert!(last_tick >= Duration::from_millis(1400));
    assert!(driver.particles().is_empty());
    assert_eq!(driver.host().active_resize_watches(), 0);
    drop(driver);

    // The final operation leaves the surface empty
    assert_eq!(surface.calls().last(), Some(&DrawCall::Clear));
    assert_eq!(surface.calls()[0], DrawCall::Resize(Viewport::new(800.0, 600.0, 2.0)));
}

#[test]
fn test_teardown_before_duration() {
    let mut host = ManualHost::new(Viewport::default(), 50);
    let mut surface = RecordingSurface::new();
    let (calls, on_done) = done_counter();

    let mut driver = Driver::new(
        EffectConfig::confetti(Vec2::new(100.0, 100.0)),
        &mut surface,
        &mut host,
    )
    .on_done(on_done);
    driver.start(Duration::ZERO).unwrap();

    // 20 ms frames: ten ticks reach t = 200 ms
    for _ in 0..10 {
        let now = driver.host_mut().advance().unwrap();
        driver.tick(now);
    }
    assert_eq!(driver.elapsed_ms().round(), 200.0);
    let recorded = driver.surface().calls().len();

    driver.teardown();
    assert_eq!(driver.state(), DriverState::Cancelled);
    assert!(!driver.host().has_pending_frame());
    assert_eq!(driver.host().active_resize_watches(), 0);

    // Stray ticks after teardown draw nothing
    assert_eq!(driver.tick(Duration::from_millis(220)), DriverState::Cancelled);
    assert_eq!(driver.tick(Duration::from_secs(10)), DriverState::Cancelled);
    assert_eq!(driver.surface().calls().len(), recorded);

    driver.teardown();
    drop(driver);
    assert_eq!(calls.get(), 0);
    assert_eq!(surface.calls().len(), recorded);
    assert_eq!(host.frames_cancelled(), 1);
}

#[test]
fn test_zero_count_still_completes() {
    let mut surface = RecordingSurface::new();
    let (calls, on_done) = done_counter();
    let config = EffectConfig::confetti(Vec2::ZERO).with_count(0);
    let mut driver = Driver::new(config, &mut surface, ManualHost::default()).on_done(on_done);
    driver.start(Duration::ZERO).unwrap();
    assert!(driver.particles().is_empty());

    let mut ticks = 0;
    while let Some(now) = driver.host_mut().advance() {
        driver.tick(now);
        ticks += 1;
    }
    assert!(ticks >= 84);
    assert_eq!(calls.get(), 1);
    drop(driver);
    assert_eq!(surface.fill_count(), 0);
}

#[test]
fn test_empty_palette_is_a_no_op() {
    let (calls, on_done) = done_counter();
    let config = EffectConfig::fountain()
        .with_palette(Vec::<Color>::new())
        .with_duration_ms(50);
    let mut driver = Driver::new(config, RecordingSurface::new(), ManualHost::default()).on_done(on_done);
    driver.start(Duration::ZERO).unwrap();

    while let Some(now) = driver.host_mut().advance() {
        driver.tick(now);
    }
    assert_eq!(driver.surface().fill_count(), 0);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_dead_particles_never_drawn_again() {
    let config = EffectConfig::confetti(Vec2::new(200.0, 200.0)).with_duration_ms(3000);
    let mut driver = Driver::new(config, RecordingSurface::new(), ManualHost::default()).with_seed(9);
    driver.start(Duration::ZERO).unwrap();

    let mut previous_drawn = usize::MAX;
    while let Some(now) = driver.host_mut().advance() {
        driver.tick(now);
        if driver.state() != DriverState::Running {
            break;
        }
        let alive = driver.particles().iter().filter(|p| p.is_alive()).count();
        let drawn = driver
            .surface()
            .current_frame()
            .iter()
            .filter(|call| call.is_fill())
            .count();
        assert_eq!(drawn, alive);
        assert!(drawn <= previous_drawn);
        previous_drawn = drawn;
    }
    // Confetti decays within ~67 frames, well before three seconds
    assert_eq!(previous_drawn, 0);
}

#[test]
fn test_resize_keeps_particles() {
    let mut host = ManualHost::new(Viewport::new(400.0, 800.0, 1.0), 60);
    let mut driver = Driver::new(EffectConfig::fountain(), RecordingSurface::new(), &mut host).with_seed(3);
    driver.start(Duration::ZERO).unwrap();

    for _ in 0..5 {
        let now = driver.host_mut().advance().unwrap();
        driver.tick(now);
    }
    let before = driver.particles().to_vec();

    let resized = Viewport::new(800.0, 400.0, 2.0);
    assert!(driver.host_mut().set_viewport(resized));
    driver.handle_resize();

    assert_eq!(driver.particles(), before.as_slice());
    assert_eq!(driver.surface().calls().last(), Some(&DrawCall::Resize(resized)));
}

#[test]
fn test_fountain_uses_viewport_anchor() {
    let viewport = Viewport::new(400.0, 1000.0, 1.0);
    let mut driver = Driver::new(
        EffectConfig::fountain(),
        RecordingSurface::new(),
        ManualHost::new(viewport, 60),
    )
    .with_seed(5);
    driver.start(Duration::ZERO).unwrap();

    assert_eq!(driver.particles().len(), 220);
    for particle in driver.particles() {
        assert!((particle.position.x - 200.0).abs() <= 3.01);
        assert!((particle.position.y - 900.0).abs() <= 3.01);
    }
}

#[test]
fn test_concurrent_effects_are_independent() {
    let (first_calls, first_done) = done_counter();
    let (second_calls, second_done) = done_counter();

    let mut first = Driver::new(
        EffectConfig::confetti(Vec2::new(50.0, 50.0)).with_duration_ms(100),
        RecordingSurface::new(),
        ManualHost::default(),
    )
    .on_done(first_done);
    let mut second = Driver::new(
        EffectConfig::confetti(Vec2::new(300.0, 50.0)).with_duration_ms(500),
        RecordingSurface::new(),
        ManualHost::default(),
    )
    .on_done(second_done);

    first.start(Duration::ZERO).unwrap();
    second.start(Duration::ZERO).unwrap();

    while let Some(now) = first.host_mut().advance() {
        first.tick(now);
        if let Some(now) = second.host_mut().advance() {
            second.tick(now);
        }
    }
    assert_eq!(first_calls.get(), 1);
    assert_eq!(second_calls.get(), 0);
    assert_eq!(second.state(), DriverState::Running);
    assert_eq!(second.particles().len(), 90);

    second.teardown();
    assert_eq!(second_calls.get(), 0);
}

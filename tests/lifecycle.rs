//! Lifecycle and long-run behavior of the overlay engine, driven through
//! the public API with a seeded RNG so every run is reproducible.

use desksnow::{Bounds, OverlayConfig, OverlayEngine};
use rand::SeedableRng;
use rand::rngs::StdRng;

const BOUNDS: Bounds = Bounds {
    width: 1920.0,
    height: 1080.0,
};

fn seeded_engine(seed: u64) -> (OverlayEngine, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let engine = OverlayEngine::new(BOUNDS, &OverlayConfig::default(), &mut rng);
    (engine, rng)
}

#[test]
fn population_seeds_inside_the_spawn_band() {
    let (engine, _) = seeded_engine(42);
    assert_eq!(engine.flakes().len(), 80);
    for flake in engine.flakes() {
        assert!(flake.x >= 0.0 && flake.x <= BOUNDS.width);
        assert!(flake.y >= -100.0 && flake.y <= 0.0);
        assert!(flake.radius >= 1 && flake.radius <= 3);
        assert!(flake.speed >= 0.5 && flake.speed <= 2.0);
    }
}

#[test]
fn thousand_ticks_wrap_and_bound_drift() {
    let (mut engine, mut rng) = seeded_engine(42);
    engine.show();

    let speeds: Vec<f32> = engine.flakes().iter().map(|f| f.speed).collect();
    let mut prev_y: Vec<f32> = engine.flakes().iter().map(|f| f.y).collect();
    let mut prev_x: Vec<f32> = engine.flakes().iter().map(|f| f.x).collect();
    let mut wraps = vec![0u32; speeds.len()];

    // Lateral motion per tick is wind plus the 0.5-scaled sine term, with
    // a little slack for f32 rounding of positions up to the surface width.
    let drift_bound = 0.2 + 0.5 + 1e-3;

    for _ in 0..1000 {
        engine.tick(&mut rng);

        for (i, flake) in engine.flakes().iter().enumerate() {
            if flake.y < prev_y[i] {
                // y only ever decreases at a recycle, which re-enters above
                // the top edge from a random x.
                wraps[i] += 1;
                assert!(flake.y >= -100.0 && flake.y <= -10.0);
                assert!(flake.x >= 0.0 && flake.x <= BOUNDS.width);
            } else {
                assert!((flake.x - prev_x[i]).abs() <= drift_bound);
            }
            prev_y[i] = flake.y;
            prev_x[i] = flake.x;
        }
    }

    for (i, speed) in speeds.iter().enumerate() {
        // Anything fast enough to cross the full height plus the spawn band
        // must have been recycled at least once.
        if speed * 1000.0 > BOUNDS.height + 100.0 {
            assert!(wraps[i] >= 1, "flake {i} with speed {speed} never wrapped");
        }
        // Speed is immutable across the whole run.
        assert_eq!(engine.flakes()[i].speed, *speed);
    }
}

#[test]
fn double_toggle_restores_the_original_state() {
    let (mut engine, _) = seeded_engine(7);

    // From stopped.
    engine.toggle();
    engine.toggle();
    assert!(!engine.is_running());

    // From running.
    engine.show();
    engine.toggle();
    engine.toggle();
    assert!(engine.is_running());
}

#[test]
fn repeated_show_ticks_exactly_once_per_tick() {
    let (mut engine, mut rng) = seeded_engine(8);
    engine.show();
    engine.show();

    let before: Vec<f32> = engine.flakes().iter().map(|f| f.y).collect();
    engine.tick(&mut rng);
    for (flake, y0) in engine.flakes().iter().zip(before) {
        assert!((flake.y - (y0 + flake.speed)).abs() < 1e-4);
    }
}

#[test]
fn lifecycle_calls_after_quit_are_noops() {
    let (mut engine, mut rng) = seeded_engine(9);
    engine.show();
    engine.quit();

    engine.show();
    engine.hide();
    assert!(!engine.toggle());
    engine.tick(&mut rng);
    engine.apply_config(OverlayConfig::default(), &mut rng);
    engine.quit();

    assert!(engine.is_destroyed());
    assert!(!engine.is_running());
    assert!(engine.flakes().is_empty());
}

#[test]
fn hide_freezes_the_simulation_where_it_stands() {
    let (mut engine, mut rng) = seeded_engine(10);
    engine.show();
    for _ in 0..10 {
        engine.tick(&mut rng);
    }

    engine.hide();
    let frozen: Vec<(f32, f32)> = engine.flakes().iter().map(|f| (f.x, f.y)).collect();
    for _ in 0..10 {
        engine.tick(&mut rng);
    }
    let after: Vec<(f32, f32)> = engine.flakes().iter().map(|f| (f.x, f.y)).collect();
    assert_eq!(frozen, after);

    // Resuming picks up from the frozen positions.
    engine.show();
    engine.tick(&mut rng);
    for (flake, (_, y0)) in engine.flakes().iter().zip(frozen) {
        assert!(flake.y >= y0);
    }
}

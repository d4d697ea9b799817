use crate::config::{OverlayConfig, TICK_INTERVAL};
use crate::flake::{Bounds, Snowflake};
use rand::Rng;

/// Lifecycle of an overlay instance. Construction leaves the engine
/// `Stopped`; `Destroyed` is terminal and every operation on a destroyed
/// engine is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Stopped,
    Running,
    Destroyed,
}

/// The simulation half of the overlay: a fixed population of flakes, the
/// surface bounds, a 30 ms tick clock, and the show/hide/toggle/quit state
/// machine. Owns no windowing resources, so hosts and tests can drive it
/// directly; the layer surface lives in [`crate::overlay`].
pub struct OverlayEngine {
    flakes: Vec<Snowflake>,
    bounds: Bounds,
    config: OverlayConfig,
    elapsed: f32,
    phase: Phase,
}

impl OverlayEngine {
    /// Seeds `config.count` flakes inside `bounds`. The engine starts
    /// stopped; nothing moves until [`show`](Self::show).
    pub fn new(bounds: Bounds, config: &OverlayConfig, rng: &mut impl Rng) -> Self {
        let flakes = (0..config.count)
            .map(|_| Snowflake::new(bounds, config, rng))
            .collect();

        Self {
            flakes,
            bounds,
            config: config.clone(),
            elapsed: 0.0,
            phase: Phase::Stopped,
        }
    }

    /// Start (or resume) the animation. Idempotent: the tick timer is keyed
    /// on [`is_running`](Self::is_running), so a repeated show cannot stack
    /// a second loop.
    pub fn show(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        if self.phase != Phase::Running {
            log::debug!("overlay running");
            self.phase = Phase::Running;
        }
    }

    /// Stop the animation. The pending tick sees the stopped phase and the
    /// timer is dropped at the next subscription diff.
    pub fn hide(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        if self.phase != Phase::Stopped {
            log::debug!("overlay stopped");
            self.phase = Phase::Stopped;
        }
    }

    /// Hide if running, show otherwise. Returns the new running state,
    /// `false` forever once destroyed.
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.hide();
        } else {
            self.show();
        }
        self.is_running()
    }

    /// Tear down the simulation. Terminal: releases the flake storage and
    /// turns every later operation, tick included, into a no-op.
    pub fn quit(&mut self) {
        if self.phase == Phase::Destroyed {
            return;
        }
        log::debug!("overlay destroyed");
        self.phase = Phase::Destroyed;
        self.flakes = Vec::new();
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_destroyed(&self) -> bool {
        self.phase == Phase::Destroyed
    }

    /// One simulation step: advance the clock by the nominal tick interval
    /// and every flake by one tick. A tick that lands while stopped or after
    /// destruction aborts silently.
    pub fn tick(&mut self, rng: &mut impl Rng) {
        if self.phase != Phase::Running {
            return;
        }

        self.elapsed += TICK_INTERVAL.as_secs_f32();
        for flake in &mut self.flakes {
            flake.advance(self.elapsed, self.bounds, rng);
        }
    }

    /// Live reconfiguration: grow the population with freshly seeded flakes
    /// or truncate it. Updated ranges only shape flakes seeded from now on;
    /// existing flakes keep their attributes.
    pub fn apply_config(&mut self, new_config: OverlayConfig, rng: &mut impl Rng) {
        if self.phase == Phase::Destroyed {
            return;
        }

        let old_count = self.config.count;
        let new_count = new_config.count;
        self.config = new_config;

        if new_count > old_count {
            for _ in old_count..new_count {
                self.flakes
                    .push(Snowflake::new(self.bounds, &self.config, rng));
            }
        } else if new_count < old_count {
            self.flakes.truncate(new_count);
        }
    }

    pub fn flakes(&self) -> &[Snowflake] {
        &self.flakes
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }
}

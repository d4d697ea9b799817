use crate::config::{
    OSC_FREQ_MAX, OSC_FREQ_MIN, OverlayConfig, RADIUS_MAX, RADIUS_MIN, RESPAWN_GAP, SPAWN_ABOVE,
};
use rand::{Rng, RngExt};

/// Dimensions of the overlay surface in pixels, captured once at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

/// One snowflake. Only `x` and `y` ever change after construction; the rest
/// is fixed for the life of the engine and the flake is recycled in place.
#[derive(Debug, Clone)]
pub struct Snowflake {
    pub x: f32,
    pub y: f32,
    pub radius: u8,
    pub speed: f32,
    pub wind: f32,
    pub frequency: f32,
    pub phase: f32,
}

impl Snowflake {
    pub fn new(bounds: Bounds, config: &OverlayConfig, rng: &mut impl Rng) -> Self {
        Self {
            x: rng.random_range(0.0..bounds.width),
            y: rng.random_range(-SPAWN_ABOVE..0.0),
            radius: rng.random_range(RADIUS_MIN..=RADIUS_MAX),
            speed: rng.random_range(config.speed_min..config.speed_max),
            // wind = 0 is a valid "calm" setting, not a samplable range
            wind: if config.wind > 0.0 {
                rng.random_range(-config.wind..config.wind)
            } else {
                0.0
            },
            frequency: rng.random_range(OSC_FREQ_MIN..OSC_FREQ_MAX),
            phase: rng.random_range(0.0..std::f32::consts::TAU),
        }
    }

    /// Advance one tick: fall by `speed`, drift by wind plus a sine term
    /// whose 0.5 scale keeps oscillation below the bulk wind contribution.
    /// Past the bottom edge the flake re-enters from a random point above
    /// the top, never its previous x, so no vertical lanes form. x is left
    /// unclamped at the sides; a flake re-centers at its next recycle.
    pub fn advance(&mut self, elapsed: f32, bounds: Bounds, rng: &mut impl Rng) {
        self.y += self.speed;

        let oscillation = (elapsed * self.frequency + self.phase).sin() * 0.5;
        self.x += self.wind + oscillation;

        if self.y > bounds.height {
            self.y = rng.random_range(-SPAWN_ABOVE..-RESPAWN_GAP);
            self.x = rng.random_range(0.0..bounds.width);
        }
    }
}

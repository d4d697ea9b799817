use crate::flake::Bounds;
use hyprland::data::{Monitor, Monitors};
use hyprland::prelude::*;

/// Full resolution of the active output. Falls back to the first monitor,
/// then to 1920x1080 when the compositor cannot be queried; the overlay
/// still runs, it just guesses the surface size.
pub fn active_output_bounds() -> Bounds {
    match Monitor::get_active() {
        Ok(monitor) => Bounds {
            width: monitor.width as f32,
            height: monitor.height as f32,
        },
        Err(_) => match Monitors::get() {
            Ok(monitors) => monitors
                .iter()
                .next()
                .map(|m| Bounds {
                    width: m.width as f32,
                    height: m.height as f32,
                })
                .unwrap_or_else(fallback_bounds),
            Err(_) => fallback_bounds(),
        },
    }
}

fn fallback_bounds() -> Bounds {
    log::warn!("could not query outputs, assuming 1920x1080");
    Bounds {
        width: 1920.0,
        height: 1080.0,
    }
}

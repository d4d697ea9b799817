use crate::cli::Args;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

/// Nominal simulation period. One tick advances every flake once.
pub const TICK_INTERVAL: Duration = Duration::from_millis(30);

/// How often a hidden overlay checks for control commands and config reloads.
pub const CONTROL_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Flake radius in pixels, inclusive on both ends.
pub const RADIUS_MIN: u8 = 1;
pub const RADIUS_MAX: u8 = 3;

/// Side-to-side oscillation frequency range.
pub const OSC_FREQ_MIN: f32 = 0.01;
pub const OSC_FREQ_MAX: f32 = 0.05;

/// Flakes seed with y in [-SPAWN_ABOVE, 0) so the first frames are not empty.
pub const SPAWN_ABOVE: f32 = 100.0;

/// A recycled flake re-enters no closer than this to the top edge.
pub const RESPAWN_GAP: f32 = 10.0;

#[derive(Debug, Clone)]
pub struct OverlayConfig {
    pub enabled: bool,
    pub count: usize,
    pub speed_min: f32,
    pub speed_max: f32,
    pub wind: f32,
}

#[derive(Debug, Clone)]
pub enum ConfigEvent {
    ConfigChanged(OverlayConfig),
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            count: 80,
            speed_min: 0.5,
            speed_max: 2.0,
            wind: 0.2,
        }
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    let config_home = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_default();
            PathBuf::from(home).join(".config")
        });

    let config_file = config_home.join("hypr").join("desksnow.conf");
    if config_file.exists() {
        Some(config_file)
    } else {
        None
    }
}

pub fn load_config() -> OverlayConfig {
    let path = match get_config_path() {
        Some(p) => p,
        None => return OverlayConfig::default(),
    };

    let mut config = hyprlang::Config::new();
    if config.parse_file(&path).is_err() {
        log::warn!("failed to parse {}, using defaults", path.display());
        return OverlayConfig::default();
    }

    let defaults = OverlayConfig::default();
    let mut loaded = OverlayConfig {
        enabled: config
            .get_int("general:enabled")
            .map(|v| v != 0)
            .unwrap_or(defaults.enabled),
        count: config
            .get_int("general:count")
            .map(|v| v.clamp(1, 1000) as usize)
            .unwrap_or(defaults.count),
        speed_min: config
            .get_float("general:speed_min")
            .map(|v| v as f32)
            .unwrap_or(defaults.speed_min),
        speed_max: config
            .get_float("general:speed_max")
            .map(|v| v as f32)
            .unwrap_or(defaults.speed_max),
        wind: config
            .get_float("general:wind")
            .map(|v| (v as f32).abs())
            .unwrap_or(defaults.wind),
    };
    sanitize(&mut loaded);
    loaded
}

/// Repairs degenerate ranges that would otherwise panic the sampler.
/// Fall speed must stay positive (a flake that never falls never recycles).
fn sanitize(config: &mut OverlayConfig) {
    if config.speed_min <= 0.0 {
        config.speed_min = 0.1;
    }
    if config.speed_max <= config.speed_min {
        config.speed_max = config.speed_min + 0.1;
    }
}

pub fn apply_cli_overrides(config: &mut OverlayConfig, args: &Args) {
    if let Some(v) = args.count {
        config.count = v as usize;
    }
    if let Some(v) = args.speed_min {
        config.speed_min = v;
    }
    if let Some(v) = args.speed_max {
        config.speed_max = v;
    }
    if let Some(v) = args.wind {
        config.wind = v.abs();
    }
    if args.hidden {
        config.enabled = false;
    }
    sanitize(config);
}

/// Watches the config file and emits a reloaded [`OverlayConfig`] on change.
/// An `enabled` flip in the file is how an external process shows or hides a
/// running overlay without touching its event loop.
pub fn spawn_config_watcher() -> mpsc::Receiver<ConfigEvent> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let config_path = match get_config_path() {
            Some(p) => p,
            None => {
                log::warn!("no config file found, hot reload disabled");
                return;
            }
        };

        let watch_dir = match config_path.parent() {
            Some(p) => p.to_path_buf(),
            None => return,
        };

        let config_filename = config_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("desksnow.conf")
            .to_string();

        let tx_clone = tx.clone();
        let last_reload = std::sync::Arc::new(std::sync::Mutex::new(Instant::now()));
        let last_reload_clone = last_reload.clone();
        let debounce_duration = Duration::from_millis(100);

        let mut watcher = match notify::recommended_watcher(move |res: Result<Event, _>| {
            if let Ok(event) = res {
                match event.kind {
                    EventKind::Modify(_) | EventKind::Create(_) => {
                        let is_config_file = event
                            .paths
                            .iter()
                            .any(|p| p.file_name().and_then(|n| n.to_str()) == Some(&config_filename));

                        if is_config_file {
                            // Debounce: editors fire several events per save
                            let mut last = last_reload_clone.lock().unwrap();
                            if last.elapsed() > debounce_duration {
                                *last = Instant::now();
                                drop(last);
                                let new_config = load_config();
                                let _ = tx_clone.send(ConfigEvent::ConfigChanged(new_config));
                            }
                        }
                    }
                    _ => {}
                }
            }
        }) {
            Ok(w) => w,
            Err(e) => {
                log::warn!("failed to create file watcher: {}", e);
                return;
            }
        };

        if let Err(e) = watcher.watch(&watch_dir, RecursiveMode::NonRecursive) {
            log::warn!("failed to watch config directory: {}", e);
            return;
        }

        // Keep thread alive - watcher is dropped when thread ends
        loop {
            thread::park();
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Args;

    #[test]
    fn defaults_match_documented_constants() {
        let config = OverlayConfig::default();
        assert!(config.enabled);
        assert_eq!(config.count, 80);
        assert_eq!(config.speed_min, 0.5);
        assert_eq!(config.speed_max, 2.0);
        assert_eq!(config.wind, 0.2);
    }

    #[test]
    fn cli_overrides_replace_defaults() {
        let mut config = OverlayConfig::default();
        let args = Args {
            count: Some(120),
            speed_min: Some(1.0),
            speed_max: Some(3.0),
            wind: Some(-0.4),
            hidden: true,
        };
        apply_cli_overrides(&mut config, &args);
        assert_eq!(config.count, 120);
        assert_eq!(config.speed_min, 1.0);
        assert_eq!(config.speed_max, 3.0);
        // Wind is a magnitude; a negative override is normalized.
        assert_eq!(config.wind, 0.4);
        assert!(!config.enabled);
    }

    #[test]
    fn degenerate_speed_ranges_are_repaired() {
        let mut config = OverlayConfig::default();
        let args = Args {
            count: None,
            speed_min: Some(-1.0),
            speed_max: Some(-2.0),
            wind: None,
            hidden: false,
        };
        apply_cli_overrides(&mut config, &args);
        assert!(config.speed_min > 0.0);
        assert!(config.speed_max > config.speed_min);
    }

    #[test]
    fn partial_overrides_leave_the_rest() {
        let mut config = OverlayConfig::default();
        let args = Args {
            count: None,
            speed_min: None,
            speed_max: None,
            wind: None,
            hidden: false,
        };
        apply_cli_overrides(&mut config, &args);
        assert_eq!(config.count, 80);
        assert!(config.enabled);
    }
}

//! Transparent click-through snowfall overlay for Wayland/Hyprland.
//!
//! The crate splits into a pure simulation core and a thin layer-shell
//! surface around it:
//!
//! - [`flake`]: a single snowflake and its per-tick update rule.
//! - [`engine`]: the particle population plus the show/hide/toggle/quit
//!   lifecycle, with no windowing attached.
//! - [`overlay`]: the iced layer-shell application that draws the engine on
//!   a full-screen surface behind ordinary windows.
//! - [`control`]: a command channel for driving an embedded overlay from a
//!   host application's own thread.
//!
//! Standalone use is the `desksnow` binary. Embedded use:
//!
//! ```no_run
//! let (handle, rx) = desksnow::control::channel();
//! std::thread::spawn(move || {
//!     let _ = desksnow::overlay::run(desksnow::OverlayConfig::default(), Some(rx));
//! });
//! handle.toggle();
//! ```

pub mod cli;
pub mod config;
pub mod control;
pub mod engine;
pub mod flake;
pub mod output;
pub mod overlay;

pub use config::OverlayConfig;
pub use control::{Command, OverlayHandle, channel};
pub use engine::OverlayEngine;
pub use flake::{Bounds, Snowflake};

use thiserror::Error as ThisError;

/// Failures the overlay can surface. Only surface allocation at startup is
/// reported; a surface lost mid-flight ends the loop quietly instead.
#[derive(Debug, ThisError)]
pub enum Error {
    #[error("layer surface could not be created: {0}")]
    Surface(#[from] iced_layershell::Error),
}

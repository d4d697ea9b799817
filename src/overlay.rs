use crate::config::{
    CONTROL_POLL_INTERVAL, ConfigEvent, OverlayConfig, TICK_INTERVAL, spawn_config_watcher,
};
use crate::control::{Command, ControlReceiver};
use crate::engine::OverlayEngine;
use crate::output;
use iced::mouse::Cursor;
use iced::widget::canvas::{self, Canvas, Frame, Geometry, Path};
use iced::{Color, Element, Length, Point, Rectangle, Renderer, Subscription, Task, Theme};
use iced_layershell::reexport::{Anchor, KeyboardInteractivity, Layer};
use iced_layershell::settings::LayerShellSettings;
use iced_layershell::to_layer_message;
use std::sync::{Mutex, mpsc};
use std::time::Instant;

/// The layer-surface half of the overlay: binds an [`OverlayEngine`] to a
/// transparent, input-transparent surface and pumps it from the iced loop.
pub struct Overlay {
    engine: OverlayEngine,
    control_rx: Option<ControlReceiver>,
    config_rx: mpsc::Receiver<ConfigEvent>,
    cache: canvas::Cache,
}

#[to_layer_message]
#[derive(Debug, Clone)]
pub enum Message {
    Tick(Instant),
    Poll(Instant),
}

impl Overlay {
    /// Drains pending control commands. Returns true once `Quit` was seen;
    /// the engine is already destroyed at that point.
    fn drain_control(&mut self) -> bool {
        let Some(rx) = &self.control_rx else {
            return false;
        };

        let mut quit = false;
        while let Ok(command) = rx.try_recv() {
            match command {
                Command::Show => self.engine.show(),
                Command::Hide => self.engine.hide(),
                Command::Toggle => {
                    self.engine.toggle();
                }
                Command::Quit => {
                    self.engine.quit();
                    quit = true;
                }
            }
        }
        quit
    }

    /// Drains config reloads. A flipped `enabled` shows or hides the
    /// overlay; count and range changes reshape the population in place.
    fn drain_config(&mut self) {
        let mut rng = rand::rng();
        while let Ok(ConfigEvent::ConfigChanged(new_config)) = self.config_rx.try_recv() {
            if new_config.enabled != self.engine.is_running() {
                if new_config.enabled {
                    self.engine.show();
                } else {
                    self.engine.hide();
                }
            }
            self.engine.apply_config(new_config, &mut rng);
        }
    }
}

/// Boot function - initializes the engine against the active output
pub fn boot(config: OverlayConfig, control_rx: Option<ControlReceiver>) -> (Overlay, Task<Message>) {
    let mut rng = rand::rng();
    let bounds = output::active_output_bounds();
    let mut engine = OverlayEngine::new(bounds, &config, &mut rng);
    if config.enabled {
        engine.show();
    }

    let config_rx = spawn_config_watcher();

    (
        Overlay {
            engine,
            control_rx,
            config_rx,
            cache: canvas::Cache::default(),
        },
        Task::none(),
    )
}

/// Update function - handles messages and updates state
pub fn update(state: &mut Overlay, message: Message) -> Task<Message> {
    match message {
        Message::Tick(_now) => {
            if state.drain_control() {
                state.cache.clear();
                return iced::exit();
            }
            state.drain_config();

            let mut rng = rand::rng();
            state.engine.tick(&mut rng);

            // Clear the previous frame's circles; the canvas redraws every
            // flake at its new position.
            state.cache.clear();
        }
        Message::Poll(_now) => {
            // Keeps a hidden overlay responsive to show/quit commands while
            // the tick timer is stopped.
            if state.drain_control() {
                state.cache.clear();
                return iced::exit();
            }
            let was_running = state.engine.is_running();
            state.drain_config();
            if state.engine.is_running() != was_running {
                state.cache.clear();
            }
        }
        _ => {}
    }

    Task::none()
}

/// View function - renders the flakes
pub fn view(state: &Overlay) -> Element<'_, Message, Theme, Renderer> {
    Canvas::new(state)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

/// Subscription function - a repeating tick timer that exists only while
/// running (dropping it is the stop contract), plus a slow always-on poll
/// for control and config
pub fn subscription(state: &Overlay) -> Subscription<Message> {
    let poll = iced::time::every(CONTROL_POLL_INTERVAL).map(Message::Poll);

    if state.engine.is_running() {
        Subscription::batch([poll, iced::time::every(TICK_INTERVAL).map(Message::Tick)])
    } else {
        poll
    }
}

impl canvas::Program<Message> for &Overlay {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: Cursor,
    ) -> Vec<Geometry> {
        let geometry = self
            .cache
            .draw(renderer, bounds.size(), |frame: &mut Frame| {
                if !self.engine.is_running() {
                    // Hidden: an empty frame on a transparent surface.
                    return;
                }

                for flake in self.engine.flakes() {
                    let circle =
                        Path::circle(Point::new(flake.x, flake.y), f32::from(flake.radius));
                    frame.fill(&circle, Color::WHITE);
                }
            });

        vec![geometry]
    }
}

/// Runs the overlay until `Quit` arrives or the process is interrupted.
///
/// Standalone callers pass `None` for `control` and drive visibility through
/// the config file; an embedding host passes the receiver from
/// [`crate::control::channel`] and keeps the handle. Surface allocation
/// failure is the one error surfaced here; everything after boot degrades
/// silently per the overlay's contract.
pub fn run(config: OverlayConfig, control: Option<ControlReceiver>) -> Result<(), crate::Error> {
    let layer_settings = LayerShellSettings {
        size: Some((0, 0)),
        exclusive_zone: -1,
        anchor: Anchor::Top | Anchor::Bottom | Anchor::Left | Anchor::Right,
        layer: Layer::Bottom,
        keyboard_interactivity: KeyboardInteractivity::None,
        events_transparent: true,
        ..Default::default()
    };

    // The boot closure is re-callable by the runtime's signature but runs
    // once; the receiver moves in through a take.
    let control = Mutex::new(control);

    iced_layershell::application(
        move || boot(config.clone(), control.lock().unwrap().take()),
        "desksnow",
        update,
        view,
    )
    .antialiasing(false)
    .style(|_state, _theme| iced::theme::Style {
        background_color: iced::Color::TRANSPARENT,
        text_color: iced::Color::WHITE,
    })
    .subscription(subscription)
    .layer_settings(layer_settings)
    .run()
    .map_err(crate::Error::from)
}

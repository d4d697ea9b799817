use std::sync::mpsc;

/// Lifecycle commands a host can send to a running overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Show,
    Hide,
    Toggle,
    Quit,
}

/// Receiving end of the control channel, handed to [`crate::overlay::run`].
pub type ControlReceiver = mpsc::Receiver<Command>;

/// Cloneable handle a host keeps to drive an overlay from its own thread.
///
/// Sends are fire-and-forget: the overlay drains pending commands between
/// ticks, and a command sent to an overlay that has already shut down is
/// dropped rather than reported, matching the contract that lifecycle calls
/// on a destroyed engine never raise.
#[derive(Debug, Clone)]
pub struct OverlayHandle {
    tx: mpsc::Sender<Command>,
}

impl OverlayHandle {
    pub fn show(&self) {
        let _ = self.tx.send(Command::Show);
    }

    pub fn hide(&self) {
        let _ = self.tx.send(Command::Hide);
    }

    /// Fire-and-forget; the resulting running state is observable on the
    /// engine, not across the channel.
    pub fn toggle(&self) {
        let _ = self.tx.send(Command::Toggle);
    }

    pub fn quit(&self) {
        let _ = self.tx.send(Command::Quit);
    }
}

/// Creates the control channel pair for an embedded overlay.
pub fn channel() -> (OverlayHandle, ControlReceiver) {
    let (tx, rx) = mpsc::channel();
    (OverlayHandle { tx }, rx)
}

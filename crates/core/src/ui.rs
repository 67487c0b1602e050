//! UI adapter seam.

use crate::state::SessionEvent;

/// The two callbacks the session is allowed to drive on the UI side.
///
/// Implementations live on the UI thread; the session never calls them from
/// its own task, only through [`apply_event`] on the UI loop.
pub trait UiAdapter {
    fn set_status_text(&mut self, text: &str);
    fn set_input_enabled(&mut self, enabled: bool);
}

/// Apply one session event to a UI adapter.
///
/// Returns the close reason when the event ends the session.
pub fn apply_event<U: UiAdapter + ?Sized>(ui: &mut U, event: SessionEvent) -> Option<String> {
    match event {
        SessionEvent::StatusText(text) => {
            ui.set_status_text(&text);
            None
        }
        SessionEvent::InputEnabled(enabled) => {
            ui.set_input_enabled(enabled);
            None
        }
        SessionEvent::Closed { reason } => {
            ui.set_input_enabled(false);
            ui.set_status_text(&format!("Disconnected: {}", reason));
            Some(reason)
        }
    }
}

//! Key mapping from terminal events to form actions.

use crate::types::FormAction;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to form actions.
///
/// Printable characters always map to [`FormAction::Input`]; the form decides
/// whether the focused field accepts text.
pub fn handle_key_event(key: KeyEvent) -> Option<FormAction> {
    if should_quit(key) {
        return Some(FormAction::Quit);
    }

    match key.code {
        // Focus
        KeyCode::Tab | KeyCode::Down => Some(FormAction::NextField),
        KeyCode::BackTab | KeyCode::Up => Some(FormAction::PrevField),

        // Selections
        KeyCode::Left => Some(FormAction::SelectPrev),
        KeyCode::Right => Some(FormAction::SelectNext),

        // Text
        KeyCode::Backspace => Some(FormAction::Backspace),
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            Some(FormAction::Input(c))
        }

        KeyCode::Enter => Some(FormAction::Submit),

        _ => None,
    }
}

/// Check if key should quit the client.
///
/// Letters are never quit keys since they are valid name input.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_focus_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Tab)),
            Some(FormAction::NextField)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Down)),
            Some(FormAction::NextField)
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT)),
            Some(FormAction::PrevField)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Up)),
            Some(FormAction::PrevField)
        );
    }

    #[test]
    fn test_selection_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Left)),
            Some(FormAction::SelectPrev)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Right)),
            Some(FormAction::SelectNext)
        );
    }

    #[test]
    fn test_text_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('q'))),
            Some(FormAction::Input('q'))
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT)),
            Some(FormAction::Input('A'))
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Backspace)),
            Some(FormAction::Backspace)
        );
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::ALT)),
            None
        );
    }

    #[test]
    fn test_submit_key() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Enter)),
            Some(FormAction::Submit)
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Esc)),
            Some(FormAction::Quit)
        );
    }
}

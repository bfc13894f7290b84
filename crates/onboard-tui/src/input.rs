use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    DragBack,    // h / Left: move the finger toward the previous page
    DragForward, // l / Right: move the finger toward the next page
    Release,     // Space: lift the finger
    Next,
    Previous,
    Skip,
    Finish,
    Reset,      // Simulates the host screen coming back to the foreground
    CycleStyle, // Tab / Shift+Tab
    CycleStyleBack,
    CycleShape,
    ToggleHelp,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,

        // Dragging
        (KeyCode::Char('h'), KeyModifiers::NONE) => Action::DragBack,
        (KeyCode::Left, KeyModifiers::NONE) => Action::DragBack,
        (KeyCode::Char('l'), KeyModifiers::NONE) => Action::DragForward,
        (KeyCode::Right, KeyModifiers::NONE) => Action::DragForward,
        (KeyCode::Char(' '), _) => Action::Release,

        // Buttons
        (KeyCode::Char('n'), KeyModifiers::NONE) => Action::Next,
        (KeyCode::Enter, _) => Action::Next,
        (KeyCode::Char('p'), KeyModifiers::NONE) => Action::Previous,
        (KeyCode::Backspace, _) => Action::Previous,
        (KeyCode::Char('s'), KeyModifiers::NONE) => Action::Skip,
        (KeyCode::Char('f'), KeyModifiers::NONE) => Action::Finish,

        // Preview controls
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::Reset,
        (KeyCode::Tab, _) => Action::CycleStyle,
        (KeyCode::BackTab, _) => Action::CycleStyleBack,
        (KeyCode::Char('c'), KeyModifiers::NONE) => Action::CycleShape,
        (KeyCode::Char('?'), _) => Action::ToggleHelp,

        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_vim_and_arrow_keys_drag() {
        assert_eq!(handle_key_event(key(KeyCode::Char('h'))), Action::DragBack);
        assert_eq!(handle_key_event(key(KeyCode::Left)), Action::DragBack);
        assert_eq!(handle_key_event(key(KeyCode::Char('l'))), Action::DragForward);
        assert_eq!(handle_key_event(key(KeyCode::Right)), Action::DragForward);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(handle_key_event(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(handle_key_event(key(KeyCode::Esc)), Action::Quit);
        assert_eq!(
            handle_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Action::Quit
        );
        // Plain 'c' cycles the shape
        assert_eq!(handle_key_event(key(KeyCode::Char('c'))), Action::CycleShape);
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(handle_key_event(key(KeyCode::Char('z'))), Action::None);
    }
}

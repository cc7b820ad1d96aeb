use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn key(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

pub fn ctrl(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
}

/// `q` or Ctrl+C, accepted in every mode.
pub fn is_quit_key(event: &KeyEvent) -> bool {
    *event == key('q') || *event == ctrl('c')
}

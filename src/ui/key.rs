//! Logical key events
//!
//! Raw terminal codes are reduced to the small alphabet every screen
//! understands. Screens never see ncurses codes.

use ncurses::{KEY_BACKSPACE, KEY_DOWN, KEY_ENTER, KEY_LEFT, KEY_RIGHT, KEY_UP};

pub const KEY_CTRL_C: i32 = 3;
pub const KEY_CTRL_H: i32 = 8;
pub const KEY_LF: i32 = 10;
pub const KEY_CR: i32 = 13;
pub const KEY_ESC: i32 = 27;
pub const KEY_SPACE: i32 = 32;
pub const KEY_DEL: i32 = 127;

/// One logical key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Backspace,
    Char(char),
    Interrupt,
}

impl KeyEvent {
    /// Enter and Space both activate the focused element
    pub fn is_activate(self) -> bool {
        matches!(self, KeyEvent::Enter | KeyEvent::Space)
    }
}

/// Source of logical key events
pub trait KeySource {
    /// Wait up to one poll interval for a key. `None` means nothing arrived.
    fn next_event(&mut self) -> Option<KeyEvent>;
}

/// Map an ncurses key code to a logical event
pub fn decode_key(ch: i32) -> Option<KeyEvent> {
    match ch {
        KEY_UP => Some(KeyEvent::Up),
        KEY_DOWN => Some(KeyEvent::Down),
        KEY_LEFT | KEY_ESC => Some(KeyEvent::Left),
        KEY_RIGHT => Some(KeyEvent::Right),
        KEY_LF | KEY_CR | KEY_ENTER => Some(KeyEvent::Enter),
        KEY_SPACE => Some(KeyEvent::Space),
        KEY_BACKSPACE | KEY_DEL | KEY_CTRL_H => Some(KeyEvent::Backspace),
        KEY_CTRL_C => Some(KeyEvent::Interrupt),
        0x21..=0x7e => char::from_u32(ch as u32).map(KeyEvent::Char),
        _ => None,
    }
}

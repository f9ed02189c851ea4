use serde::{Deserialize, Serialize};

use crate::Point;

/// Input events delivered to the application, already in window pixels.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    MousePressed {
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
    },
    MouseReleased {
        button: MouseButton,
        position: Point,
        modifiers: Modifiers,
    },
    MouseMoved {
        position: Point,
        modifiers: Modifiers,
    },
    /// Positive `delta` scrolls up / away from the user.
    MouseWheel {
        delta: f32,
        position: Point,
        modifiers: Modifiers,
    },
    KeyPressed {
        key: Key,
        modifiers: Modifiers,
        repeat: bool,
    },
    KeyReleased { key: Key, modifiers: Modifiers },
    /// Cursor left the window; pressed buttons are considered released.
    CursorLeft,
    Resized { width: u32, height: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other(u16),
}

/// Keyboard keys (the set the editor binds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Printable character, lowercased.
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Space,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub fn is_empty(&self) -> bool {
        !(self.shift || self.ctrl || self.alt || self.meta)
    }

    pub(crate) fn from_winit(state: winit::keyboard::ModifiersState) -> Self {
        Self {
            shift: state.shift_key(),
            ctrl: state.control_key(),
            alt: state.alt_key(),
            meta: state.super_key(),
        }
    }
}

impl Key {
    pub(crate) fn from_winit(key: &winit::keyboard::Key) -> Option<Self> {
        use winit::keyboard::{Key as WinitKey, NamedKey};

        match key {
            WinitKey::Named(named) => match named {
                NamedKey::Enter => Some(Key::Enter),
                NamedKey::Escape => Some(Key::Escape),
                NamedKey::Backspace => Some(Key::Backspace),
                NamedKey::Delete => Some(Key::Delete),
                NamedKey::Tab => Some(Key::Tab),
                NamedKey::Space => Some(Key::Space),
                NamedKey::ArrowUp => Some(Key::Up),
                NamedKey::ArrowDown => Some(Key::Down),
                NamedKey::ArrowLeft => Some(Key::Left),
                NamedKey::ArrowRight => Some(Key::Right),
                NamedKey::Home => Some(Key::Home),
                NamedKey::End => Some(Key::End),
                NamedKey::PageUp => Some(Key::PageUp),
                NamedKey::PageDown => Some(Key::PageDown),
                _ => None,
            },
            WinitKey::Character(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(' '), None) => Some(Key::Space),
                    (Some(c), None) => c.to_lowercase().next().map(Key::Char),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl MouseButton {
    pub(crate) fn from_winit(button: winit::event::MouseButton) -> Option<Self> {
        use winit::event::MouseButton as WinitButton;

        match button {
            WinitButton::Left => Some(MouseButton::Left),
            WinitButton::Right => Some(MouseButton::Right),
            WinitButton::Middle => Some(MouseButton::Middle),
            WinitButton::Other(n) => Some(MouseButton::Other(n)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::{Key as WinitKey, NamedKey};

    #[test]
    fn test_named_keys_map() {
        assert_eq!(Key::from_winit(&WinitKey::Named(NamedKey::Space)), Some(Key::Space));
        assert_eq!(Key::from_winit(&WinitKey::Named(NamedKey::PageUp)), Some(Key::PageUp));
        assert_eq!(Key::from_winit(&WinitKey::Named(NamedKey::F1)), None);
    }

    #[test]
    fn test_characters_are_lowercased() {
        assert_eq!(Key::from_winit(&WinitKey::Character("M".into())), Some(Key::Char('m')));
        assert_eq!(Key::from_winit(&WinitKey::Character("ab".into())), None);
    }

    #[test]
    fn test_modifiers_empty() {
        assert!(Modifiers::NONE.is_empty());
        let ctrl = Modifiers {
            ctrl: true,
            ..Default::default()
        };
        assert!(!ctrl.is_empty());
    }
}

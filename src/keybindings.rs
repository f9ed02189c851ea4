//! Customizable keyboard shortcuts.
//!
//! Bindings are stored in the config file; see [`crate::config`].

use aie_ui::{Key, Modifiers};
use serde::{Deserialize, Serialize};

use crate::tools::ToolKind;

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    SelectTool(ToolKind),
    Import,
    FitView,
    DeleteSelected,
    RaiseSelected,
    LowerSelected,
    CancelImport,
}

/// A key plus the exact modifier set that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: Key,
    #[serde(default)]
    pub modifiers: Modifiers,
}

impl KeyBinding {
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub const fn ctrl(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers {
                shift: false,
                ctrl: true,
                alt: false,
                meta: false,
            },
        }
    }

    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == key && self.modifiers == modifiers
    }

    /// Human readable form, e.g. `Ctrl+I`.
    pub fn display(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if self.modifiers.ctrl {
            parts.push("Ctrl".into());
        }
        if self.modifiers.alt {
            parts.push("Alt".into());
        }
        if self.modifiers.shift {
            parts.push("Shift".into());
        }
        if self.modifiers.meta {
            parts.push("Meta".into());
        }
        parts.push(key_to_string(self.key));
        parts.join("+")
    }
}

/// Keybinding configuration for the editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub tool_move: KeyBinding,
    pub tool_crop: KeyBinding,
    pub import: KeyBinding,
    pub fit_view: KeyBinding,
    pub delete: KeyBinding,
    pub raise: KeyBinding,
    pub lower: KeyBinding,
    pub cancel_import: KeyBinding,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            tool_move: KeyBinding::new(Key::Char('m')),
            tool_crop: KeyBinding::new(Key::Char('c')),
            import: KeyBinding::ctrl(Key::Char('i')),
            fit_view: KeyBinding::new(Key::Char('f')),
            delete: KeyBinding::new(Key::Delete),
            raise: KeyBinding::new(Key::PageUp),
            lower: KeyBinding::new(Key::PageDown),
            cancel_import: KeyBinding::new(Key::Escape),
        }
    }
}

impl KeyBindings {
    pub fn new() -> Self {
        Self::default()
    }

    fn table(&self) -> [(KeyBinding, EditorAction); 8] {
        [
            (self.tool_move, EditorAction::SelectTool(ToolKind::Move)),
            (self.tool_crop, EditorAction::SelectTool(ToolKind::Crop)),
            (self.import, EditorAction::Import),
            (self.fit_view, EditorAction::FitView),
            (self.delete, EditorAction::DeleteSelected),
            (self.raise, EditorAction::RaiseSelected),
            (self.lower, EditorAction::LowerSelected),
            (self.cancel_import, EditorAction::CancelImport),
        ]
    }

    /// The action bound to a key press, if any. First match wins.
    pub fn action_for(&self, key: Key, modifiers: Modifiers) -> Option<EditorAction> {
        self.table()
            .into_iter()
            .find(|(binding, _)| binding.matches(key, modifiers))
            .map(|(_, action)| action)
    }

    /// Hotkey for a tool, for tooltips.
    pub fn binding_for_tool(&self, tool: ToolKind) -> KeyBinding {
        match tool {
            ToolKind::Move => self.tool_move,
            ToolKind::Crop => self.tool_crop,
        }
    }

    /// The action already bound to `binding`, ignoring `exclude`.
    pub fn conflict(&self, binding: KeyBinding, exclude: Option<EditorAction>) -> Option<EditorAction> {
        self.table()
            .into_iter()
            .find(|(b, action)| *b == binding && Some(*action) != exclude)
            .map(|(_, action)| action)
    }
}

/// Convert a Key to a display string.
pub fn key_to_string(key: Key) -> String {
    match key {
        Key::Char(' ') | Key::Space => "Space".into(),
        Key::Char(c) => c.to_uppercase().collect(),
        Key::Enter => "Enter".into(),
        Key::Escape => "Esc".into(),
        Key::Backspace => "Backspace".into(),
        Key::Delete => "Delete".into(),
        Key::Tab => "Tab".into(),
        Key::Up => "Up".into(),
        Key::Down => "Down".into(),
        Key::Left => "Left".into(),
        Key::Right => "Right".into(),
        Key::Home => "Home".into(),
        Key::End => "End".into(),
        Key::PageUp => "PageUp".into(),
        Key::PageDown => "PageDown".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_actions() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.action_for(Key::Char('m'), Modifiers::NONE),
            Some(EditorAction::SelectTool(ToolKind::Move))
        );
        assert_eq!(
            bindings.action_for(Key::Char('c'), Modifiers::NONE),
            Some(EditorAction::SelectTool(ToolKind::Crop))
        );
        assert_eq!(
            bindings.action_for(Key::PageUp, Modifiers::NONE),
            Some(EditorAction::RaiseSelected)
        );
        assert_eq!(
            bindings.action_for(Key::Escape, Modifiers::NONE),
            Some(EditorAction::CancelImport)
        );
    }

    #[test]
    fn test_modifiers_must_match_exactly() {
        let bindings = KeyBindings::default();
        let ctrl = Modifiers {
            ctrl: true,
            ..Modifiers::NONE
        };
        assert_eq!(bindings.action_for(Key::Char('i'), ctrl), Some(EditorAction::Import));
        assert_eq!(bindings.action_for(Key::Char('i'), Modifiers::NONE), None);
        assert_eq!(bindings.action_for(Key::Char('m'), ctrl), None);
    }

    #[test]
    fn test_display() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.import.display(), "Ctrl+I");
        assert_eq!(bindings.binding_for_tool(ToolKind::Move).display(), "M");
        assert_eq!(bindings.lower.display(), "PageDown");
    }

    #[test]
    fn test_conflict_detection() {
        let bindings = KeyBindings::default();
        let f = KeyBinding::new(Key::Char('f'));
        assert_eq!(bindings.conflict(f, None), Some(EditorAction::FitView));
        assert_eq!(bindings.conflict(f, Some(EditorAction::FitView)), None);
        assert_eq!(bindings.conflict(KeyBinding::new(Key::Char('q')), None), None);
    }
}

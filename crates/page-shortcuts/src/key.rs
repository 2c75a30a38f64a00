//! Keydown event type.

use crate::dom::ElementRef;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::Cell;
use std::fmt;

/// Key names that on their own only change the meaning of the next key.
pub const PURE_MODIFIERS: [&str; 3] = ["Alt", "Control", "Shift"];

/// A keydown event as delivered to the document.
pub struct KeyInput {
    /// Native key name (`"g"`, `"Escape"`, `"ArrowUp"`, `"Shift"`, ...)
    pub key: String,
    /// Modifier flags held during the press
    pub modifiers: KeyModifiers,
    /// Element the event was aimed at; `None` means the document body
    pub target: Option<ElementRef>,
    default_prevented: Cell<bool>,
}

impl KeyInput {
    /// Create a keydown with the given modifiers, aimed at the document body.
    pub fn new(key: impl Into<String>, modifiers: KeyModifiers) -> Self {
        Self {
            key: key.into(),
            modifiers,
            target: None,
            default_prevented: Cell::new(false),
        }
    }

    /// Create a keydown with no modifiers.
    pub fn key(key: impl Into<String>) -> Self {
        Self::new(key, KeyModifiers::NONE)
    }

    /// Aim the event at an element.
    pub fn with_target(mut self, target: ElementRef) -> Self {
        self.target = Some(target);
        self
    }

    /// Meta (Cmd / Windows) key held.
    pub fn meta(&self) -> bool {
        self.modifiers.intersects(KeyModifiers::SUPER | KeyModifiers::META)
    }

    /// Alt (Option) key held.
    pub fn alt(&self) -> bool {
        self.modifiers.contains(KeyModifiers::ALT)
    }

    /// Control key held.
    pub fn ctrl(&self) -> bool {
        self.modifiers.contains(KeyModifiers::CONTROL)
    }

    /// Whether the pressed key is itself a bare Alt, Control or Shift.
    pub fn is_pure_modifier(&self) -> bool {
        PURE_MODIFIERS.iter().any(|m| *m == self.key)
    }

    /// Ask the host not to run the browser's default action for this key.
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    /// Whether a handler called [`prevent_default`](Self::prevent_default).
    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

impl fmt::Debug for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyInput")
            .field("key", &self.key)
            .field("modifiers", &self.modifiers)
            .field("target", &self.target.as_ref().map(|t| t.tag_name()))
            .field("default_prevented", &self.default_prevented.get())
            .finish()
    }
}

/// Map a terminal key event onto browser key names so a crossterm front end
/// can drive the same dispatcher.
impl From<KeyEvent> for KeyInput {
    fn from(event: KeyEvent) -> Self {
        let key = match event.code {
            KeyCode::Char(' ') => " ".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Esc => "Escape".to_string(),
            KeyCode::Tab | KeyCode::BackTab => "Tab".to_string(),
            KeyCode::Backspace => "Backspace".to_string(),
            KeyCode::Delete => "Delete".to_string(),
            KeyCode::Insert => "Insert".to_string(),
            KeyCode::Up => "ArrowUp".to_string(),
            KeyCode::Down => "ArrowDown".to_string(),
            KeyCode::Left => "ArrowLeft".to_string(),
            KeyCode::Right => "ArrowRight".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
            KeyCode::PageUp => "PageUp".to_string(),
            KeyCode::PageDown => "PageDown".to_string(),
            KeyCode::F(n) => format!("F{}", n),
            KeyCode::Modifier(m) => modifier_key_name(m).to_string(),
            _ => "Unidentified".to_string(),
        };

        Self::new(key, event.modifiers)
    }
}

fn modifier_key_name(code: crossterm::event::ModifierKeyCode) -> &'static str {
    use crossterm::event::ModifierKeyCode as M;
    match code {
        M::LeftShift | M::RightShift => "Shift",
        M::LeftControl | M::RightControl => "Control",
        M::LeftAlt | M::RightAlt => "Alt",
        M::LeftSuper | M::RightSuper | M::LeftMeta | M::RightMeta => "Meta",
        M::LeftHyper | M::RightHyper => "Hyper",
        M::IsoLevel3Shift | M::IsoLevel5Shift => "AltGraph",
    }
}

//! Key descriptors: encoding keystrokes and parsing shortcut strings.

use crate::error::{Result, ShortcutError};
use crate::key::KeyInput;
use std::borrow::Borrow;
use std::fmt;

/// Modifier prefixes in canonical order.
pub const MODIFIER_PREFIXES: [&str; 3] = ["Meta+", "Alt+", "Control+"];

/// Canonical string naming one keystroke, e.g. `"Meta+Alt+Control+k"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyDescriptor(String);

impl KeyDescriptor {
    /// Wrap an already-canonical descriptor string.
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Encode a keydown event.
    ///
    /// The base key gets `Control+`, then `Alt+`, then `Meta+` prepended, so
    /// the prefix always reads Meta, Alt, Control whatever the press order.
    /// Shift is already reflected in the key name and is not encoded.
    pub fn encode(event: &KeyInput) -> Self {
        let mut descriptor = event.key.clone();
        if event.ctrl() {
            descriptor = format!("Control+{}", descriptor);
        }
        if event.alt() {
            descriptor = format!("Alt+{}", descriptor);
        }
        if event.meta() {
            descriptor = format!("Meta+{}", descriptor);
        }
        Self(descriptor)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Modifier names present in the prefix, in canonical order.
    pub fn modifiers(&self) -> Vec<&'static str> {
        self.split().0
    }

    /// The key name after the modifier prefix.
    pub fn base_key(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (Vec<&'static str>, &str) {
        let mut rest = self.0.as_str();
        let mut modifiers = Vec::new();
        for prefix in MODIFIER_PREFIXES {
            // "Control+" alone is the literal key "+" under Control
            if rest.len() > prefix.len() {
                if let Some(stripped) = rest.strip_prefix(prefix) {
                    modifiers.push(&prefix[..prefix.len() - 1]);
                    rest = stripped;
                }
            }
        }
        (modifiers, rest)
    }
}

impl fmt::Display for KeyDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for KeyDescriptor {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for KeyDescriptor {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for KeyDescriptor {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A validated shortcut: one keystroke or a two-key sequence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Shortcut {
    /// A single keystroke.
    Single(KeyDescriptor),
    /// Two keystrokes, older first.
    Sequence(KeyDescriptor, KeyDescriptor),
}

impl Shortcut {
    /// Parse a descriptor string, rejecting anything longer than two keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use page_shortcuts::Shortcut;
    ///
    /// assert!(matches!(Shortcut::parse("g g"), Ok(Shortcut::Sequence(..))));
    /// assert!(Shortcut::parse("g g g").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split_whitespace().collect();

        let check = |part: &str| -> Result<KeyDescriptor> {
            let descriptor = KeyDescriptor::from(part);
            // a trailing bare prefix like "Control+" names no key
            if MODIFIER_PREFIXES.iter().any(|p| *p == descriptor.base_key()) {
                return Err(ShortcutError::EmptyKey(part.to_string()));
            }
            Ok(descriptor)
        };

        match parts.as_slice() {
            [] => Err(ShortcutError::EmptyDescriptor),
            [single] => Ok(Self::Single(check(single)?)),
            [first, second] => Ok(Self::Sequence(check(first)?, check(second)?)),
            _ => Err(ShortcutError::SequenceTooLong {
                descriptor: s.to_string(),
                keys: parts.len(),
            }),
        }
    }

    /// Number of keystrokes.
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Sequence(..) => 2,
        }
    }

    /// The keystroke that completes this shortcut.
    pub fn last(&self) -> &KeyDescriptor {
        match self {
            Self::Single(key) | Self::Sequence(_, key) => key,
        }
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(key) => write!(f, "{}", key),
            Self::Sequence(first, second) => write!(f, "{} {}", first, second),
        }
    }
}

/// Count the space-separated keys in a raw descriptor string.
pub fn key_count(descriptor: &str) -> usize {
    descriptor.split_whitespace().count()
}

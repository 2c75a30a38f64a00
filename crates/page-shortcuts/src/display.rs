//! Shortcut label formatting for tooltips.

use crate::descriptor::KeyDescriptor;
use serde::{Deserialize, Serialize};

/// Format for displaying shortcut labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDisplayFormat {
    /// The descriptor exactly as written in the attribute: `Control+k`
    #[default]
    Text,
    /// Unicode symbols: ⌃K, ⌘⌥S, ⎋
    Symbolic,
}

impl KeyDisplayFormat {
    /// Label for a descriptor or two-key sequence.
    pub fn label(&self, descriptor: &str) -> String {
        match self {
            Self::Text => descriptor.to_string(),
            Self::Symbolic => descriptor
                .split_whitespace()
                .map(|part| symbolic_key(&KeyDescriptor::from(part)))
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

fn symbolic_key(descriptor: &KeyDescriptor) -> String {
    let mut label: String = descriptor
        .modifiers()
        .into_iter()
        .map(modifier_symbol)
        .collect();

    let key = descriptor.base_key();
    let glyph = match key {
        "Enter" => "\u{23ce}",
        "Escape" => "\u{238b}",
        "Tab" => "\u{21e5}",
        "Backspace" => "\u{232b}",
        "Delete" => "\u{2326}",
        " " => "\u{2423}",
        "ArrowUp" => "\u{2191}",
        "ArrowDown" => "\u{2193}",
        "ArrowLeft" => "\u{2190}",
        "ArrowRight" => "\u{2192}",
        "Home" => "\u{21f1}",
        "End" => "\u{21f2}",
        "PageUp" => "\u{21de}",
        "PageDown" => "\u{21df}",
        _ => key,
    };

    // single letters under a modifier read better upper-cased, bare keys
    // keep their case since Shift is part of the key name
    if label.is_empty() || glyph.chars().count() != 1 {
        label.push_str(glyph);
    } else {
        label.push_str(&glyph.to_uppercase());
    }
    label
}

fn modifier_symbol(name: &str) -> &'static str {
    match name {
        "Meta" => "\u{2318}",
        "Alt" => "\u{2325}",
        "Control" => "\u{2303}",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_format() {
        let format = KeyDisplayFormat::Text;
        assert_eq!(format.label("Control+k"), "Control+k");
        assert_eq!(format.label("g s"), "g s");
    }

    #[test]
    fn test_symbolic_format() {
        let format = KeyDisplayFormat::Symbolic;
        assert_eq!(format.label("Control+k"), "\u{2303}K");
        assert_eq!(format.label("Meta+Alt+s"), "\u{2318}\u{2325}S");
        assert_eq!(format.label("Escape"), "\u{238b}");
        assert_eq!(format.label("?"), "?");
    }

    #[test]
    fn test_symbolic_sequence_keeps_case() {
        let format = KeyDisplayFormat::Symbolic;
        assert_eq!(format.label("g G"), "g G");
        assert_eq!(format.label("Control+x Control+s"), "\u{2303}X \u{2303}S");
    }
}

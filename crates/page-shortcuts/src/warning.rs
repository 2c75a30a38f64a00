//! Soft diagnostics emitted while binding shortcuts.

use std::fmt;

/// A non-fatal problem noticed by [`crate::BindingTable::bind`].
///
/// The binding is installed regardless; warnings are returned to the caller
/// and logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindWarning {
    /// The descriptor has more keys than the dispatcher can ever match.
    SequenceTooLong {
        /// The descriptor as given
        descriptor: String,
        /// Number of space-separated keys
        keys: usize,
    },
    /// The descriptor already had a handler, which was replaced.
    Duplicate {
        /// The descriptor as given
        descriptor: String,
    },
}

impl BindWarning {
    /// The descriptor this warning is about.
    pub fn descriptor(&self) -> &str {
        match self {
            Self::SequenceTooLong { descriptor, .. } | Self::Duplicate { descriptor } => descriptor,
        }
    }
}

impl fmt::Display for BindWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SequenceTooLong { descriptor, keys } => write!(
                f,
                "Only key sequences of length <=2 are supported: '{}' ({} keys)",
                descriptor, keys
            ),
            Self::Duplicate { descriptor } => {
                write!(f, "Duplicate keyboard shortcut: '{}'", descriptor)
            }
        }
    }
}

/// Render a list of warnings one per line.
pub fn render(warnings: &[BindWarning]) -> String {
    if warnings.is_empty() {
        return "No warnings".to_string();
    }

    warnings
        .iter()
        .map(|w| format!("[WARNING] {}", w))
        .collect::<Vec<_>>()
        .join("\n")
}

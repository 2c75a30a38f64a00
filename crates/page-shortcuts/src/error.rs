//! Shortcut error types.

use thiserror::Error;

/// Errors raised by strict descriptor parsing and configuration loading.
///
/// The dispatch path itself never fails; see [`crate::BindWarning`] for the
/// soft diagnostics emitted while binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShortcutError {
    /// Descriptor was empty or only whitespace.
    #[error("empty shortcut descriptor")]
    EmptyDescriptor,

    /// A descriptor component had modifiers but no base key.
    #[error("descriptor '{0}' has no base key")]
    EmptyKey(String),

    /// More than two space-separated keys.
    #[error("only key sequences of length <= 2 are supported: '{descriptor}' has {keys} keys")]
    SequenceTooLong {
        /// The offending descriptor.
        descriptor: String,
        /// Number of keys it contains.
        keys: usize,
    },

    /// Configuration could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ShortcutError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// Result type for shortcut operations.
pub type Result<T> = std::result::Result<T, ShortcutError>;

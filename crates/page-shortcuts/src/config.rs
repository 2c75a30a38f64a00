//! Shortcut configuration.

use crate::display::KeyDisplayFormat;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// How descriptors longer than two keys are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SequencePolicy {
    /// Warn and bind anyway. Such bindings can never fire.
    #[default]
    Lenient,
    /// Reject malformed descriptors with an error.
    Strict,
}

/// Keyboard shortcut configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutConfig {
    /// Attribute that declares an element's shortcut.
    #[serde(default = "default_attribute")]
    pub attribute: String,
    /// Key that shows all shortcut tooltips.
    #[serde(default = "default_help_key")]
    pub help_key: String,
    /// Key that closes the open overlay.
    #[serde(default = "default_close_overlay_key")]
    pub close_overlay_key: String,
    /// Selector of a button revealed while tooltips are shown.
    #[serde(default = "default_reload_button")]
    pub reload_button: Option<String>,
    /// Treatment of over-long sequences.
    #[serde(default)]
    pub sequence_policy: SequencePolicy,
    /// Tooltip label format.
    #[serde(default)]
    pub tooltip_format: KeyDisplayFormat,
}

fn default_attribute() -> String {
    "data-key".to_string()
}

fn default_help_key() -> String {
    "?".to_string()
}

fn default_close_overlay_key() -> String {
    "Escape".to_string()
}

fn default_reload_button() -> Option<String> {
    Some("#reload-page".to_string())
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            attribute: default_attribute(),
            help_key: default_help_key(),
            close_overlay_key: default_close_overlay_key(),
            reload_button: default_reload_button(),
            sequence_policy: SequencePolicy::default(),
            tooltip_format: KeyDisplayFormat::default(),
        }
    }
}

impl ShortcutConfig {
    /// Parse configuration from TOML. Missing fields take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Use the strict sequence policy.
    pub fn strict(mut self) -> Self {
        self.sequence_policy = SequencePolicy::Strict;
        self
    }
}

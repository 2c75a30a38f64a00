//! Shortcut hint tooltips.

use crate::config::ShortcutConfig;
use crate::dom::{attribute_selector, Document, ElementRef};

/// Class toggled on the reload button while tooltips are hidden.
pub const HIDDEN_CLASS: &str = "hidden";

/// Renders tooltips next to elements. Placement is up to the implementation.
pub trait Tooltips {
    /// Show `label` next to `target`.
    fn show(&self, target: &ElementRef, label: &str);

    /// Remove every tooltip currently shown.
    fn remove_all(&self);
}

/// Show a tooltip for every element that declares a shortcut and reveal the
/// reload button.
pub fn show_tooltips(document: &dyn Document, tooltips: &dyn Tooltips, config: &ShortcutConfig) {
    if let Some(button) = reload_button(document, config) {
        button.remove_class(HIDDEN_CLASS);
    }

    let elements = document.select_all(&attribute_selector(&config.attribute));
    tracing::debug!(count = elements.len(), "showing keyboard shortcut tooltips");
    for element in &elements {
        let descriptor = element.attribute(&config.attribute).unwrap_or_default();
        tooltips.show(element, &config.tooltip_format.label(&descriptor));
    }
}

/// Remove all tooltips and hide the reload button again.
pub fn remove_tooltips(document: &dyn Document, tooltips: &dyn Tooltips, config: &ShortcutConfig) {
    if let Some(button) = reload_button(document, config) {
        button.add_class(HIDDEN_CLASS);
    }
    tooltips.remove_all();
}

fn reload_button(document: &dyn Document, config: &ShortcutConfig) -> Option<ElementRef> {
    config
        .reload_button
        .as_deref()
        .and_then(|selector| document.select(selector))
}

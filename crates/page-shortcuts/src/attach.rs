//! Attaching a global shortcut to a widget.

use crate::dom::{has_tag, tag, ElementRef};
use crate::key::KeyInput;
use crate::table::SharedTable;
use crate::warning::BindWarning;
use std::rc::Rc;

/// A shortcut bound on behalf of a widget. Unbinds when destroyed or dropped.
#[must_use = "dropping the attachment unbinds the shortcut"]
#[derive(Debug)]
pub struct ShortcutAttachment {
    binding: Option<(SharedTable, String)>,
    warnings: Vec<BindWarning>,
}

impl ShortcutAttachment {
    /// An attachment that bound nothing.
    pub fn inert() -> Self {
        Self {
            binding: None,
            warnings: Vec::new(),
        }
    }

    /// The attached descriptor, if any.
    pub fn descriptor(&self) -> Option<&str> {
        self.binding.as_ref().map(|(_, descriptor)| descriptor.as_str())
    }

    /// Warnings raised while binding.
    pub fn warnings(&self) -> &[BindWarning] {
        &self.warnings
    }

    /// Unbind the shortcut now.
    pub fn destroy(self) {}
}

impl Drop for ShortcutAttachment {
    fn drop(&mut self) {
        if let Some((table, descriptor)) = self.binding.take() {
            table.borrow_mut().unbind(&descriptor);
        }
    }
}

/// Bind `key` globally so that it activates `element`.
///
/// The element is tagged with `attribute` (so tooltips pick it up and page
/// sync treats the key as taken). Inputs are focused with the browser
/// default suppressed; everything else is clicked. With no key this does
/// nothing.
pub fn attach(
    table: &SharedTable,
    attribute: &str,
    element: ElementRef,
    key: Option<&str>,
) -> ShortcutAttachment {
    let Some(key) = key.filter(|k| !k.is_empty()) else {
        return ShortcutAttachment::inert();
    };

    element.set_attribute(attribute, key);
    let warnings = table.borrow_mut().bind(
        key,
        Rc::new(move |event: &KeyInput| {
            if has_tag(&*element, tag::INPUT) {
                event.prevent_default();
                element.focus();
            } else {
                element.click();
            }
        }),
    );

    ShortcutAttachment {
        binding: Some((table.clone(), key.to_string())),
        warnings,
    }
}

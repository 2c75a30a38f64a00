//! Page sync: auto-binding shortcuts declared by page elements.

use crate::config::SequencePolicy;
use crate::descriptor::Shortcut;
use crate::dom::{attribute_selector, has_tag, tag, Document, ElementRef};
use crate::key::KeyInput;
use crate::table::{Handler, SharedTable};
use std::rc::Rc;

/// Keeps auto-derived bindings in step with the rendered page.
///
/// Explicit bindings are never touched: a descriptor that is already bound
/// when the page loads is skipped.
pub struct PageSync {
    table: SharedTable,
    attribute: String,
    policy: SequencePolicy,
    auto_bound: Vec<String>,
}

impl PageSync {
    pub fn new(table: SharedTable, attribute: impl Into<String>, policy: SequencePolicy) -> Self {
        Self {
            table,
            attribute: attribute.into(),
            policy,
            auto_bound: Vec::new(),
        }
    }

    /// Descriptors currently bound from page elements, in DOM order.
    pub fn auto_bound(&self) -> &[String] {
        &self.auto_bound
    }

    /// Drop the previous page's bindings and bind the new page's elements.
    pub fn page_loaded(&mut self, document: &dyn Document) {
        let mut table = self.table.borrow_mut();
        for descriptor in self.auto_bound.drain(..) {
            table.unbind(&descriptor);
        }

        let mut skipped = 0;
        for element in document.select_all(&attribute_selector(&self.attribute)) {
            let Some(descriptor) = element.attribute(&self.attribute) else {
                continue;
            };
            if descriptor.trim().is_empty() {
                continue;
            }
            if self.policy == SequencePolicy::Strict {
                if let Err(err) = Shortcut::parse(&descriptor) {
                    tracing::warn!(%descriptor, %err, "skipping malformed element shortcut");
                    continue;
                }
            }
            if table.contains(&descriptor) {
                skipped += 1;
                continue;
            }

            table.bind(&descriptor, activate(element));
            self.auto_bound.push(descriptor);
        }

        tracing::debug!(
            bound = self.auto_bound.len(),
            skipped,
            "page shortcuts synchronized"
        );
    }
}

/// Handler performing an element's default activation: click for buttons
/// and links, focus for inputs.
fn activate(element: ElementRef) -> Handler {
    Rc::new(move |_: &KeyInput| {
        if has_tag(&*element, tag::BUTTON) || has_tag(&*element, tag::ANCHOR) {
            element.click();
        } else if has_tag(&*element, tag::INPUT) {
            element.focus();
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::BindingTable;
    use crate::testing::{FakeDocument, FakeElement};

    fn sync(table: &SharedTable) -> PageSync {
        PageSync::new(table.clone(), "data-key", SequencePolicy::Lenient)
    }

    fn fire(table: &SharedTable, descriptor: &str) {
        let handler = table.borrow().handler(descriptor).unwrap();
        handler(&KeyInput::key(descriptor));
    }

    #[test]
    fn test_binds_page_elements() {
        let table = BindingTable::shared();
        let mut page_sync = sync(&table);

        let button = FakeElement::new("BUTTON").with_attribute("data-key", "n");
        let link = FakeElement::new("A").with_attribute("data-key", "g j");
        let input = FakeElement::new("INPUT").with_attribute("data-key", "/");
        let document = FakeDocument::new(vec![button.clone(), link.clone(), input.clone()]);

        page_sync.page_loaded(&document);
        assert_eq!(page_sync.auto_bound(), ["n", "g j", "/"]);

        fire(&table, "n");
        fire(&table, "g j");
        fire(&table, "/");
        assert_eq!(button.clicks(), 1);
        assert_eq!(link.clicks(), 1);
        assert_eq!(input.focus_count(), 1);
        assert_eq!(input.clicks(), 0);
    }

    #[test]
    fn test_other_tags_do_nothing() {
        let table = BindingTable::shared();
        let mut page_sync = sync(&table);
        let div = FakeElement::new("DIV").with_attribute("data-key", "d");

        page_sync.page_loaded(&FakeDocument::new(vec![div.clone()]));
        fire(&table, "d");
        assert_eq!(div.clicks(), 0);
        assert_eq!(div.focus_count(), 0);
    }

    #[test]
    fn test_navigation_replaces_auto_bindings() {
        let table = BindingTable::shared();
        let mut page_sync = sync(&table);

        let first = FakeDocument::new(vec![
            FakeElement::new("BUTTON").with_attribute("data-key", "a"),
            FakeElement::new("BUTTON").with_attribute("data-key", "b"),
        ]);
        let second = FakeDocument::new(vec![FakeElement::new("BUTTON").with_attribute("data-key", "c")]);

        page_sync.page_loaded(&first);
        assert_eq!(table.borrow().descriptors(), vec!["a", "b"]);

        page_sync.page_loaded(&second);
        assert_eq!(table.borrow().descriptors(), vec!["c"]);
        assert_eq!(page_sync.auto_bound(), ["c"]);
    }

    #[test]
    fn test_explicit_binding_wins() {
        let table = BindingTable::shared();
        let explicit = Rc::new(std::cell::Cell::new(0));
        let e = explicit.clone();
        table.borrow_mut().bind_fn("?", move |_| e.set(e.get() + 1));

        let mut page_sync = sync(&table);
        let button = FakeElement::new("BUTTON").with_attribute("data-key", "?");
        let document = FakeDocument::new(vec![button.clone()]);

        page_sync.page_loaded(&document);
        page_sync.page_loaded(&document);

        assert!(page_sync.auto_bound().is_empty());
        fire(&table, "?");
        assert_eq!(explicit.get(), 1);
        assert_eq!(button.clicks(), 0);
    }

    #[test]
    fn test_first_element_wins_within_page() {
        let table = BindingTable::shared();
        let mut page_sync = sync(&table);

        let first = FakeElement::new("BUTTON").with_attribute("data-key", "x");
        let second = FakeElement::new("BUTTON").with_attribute("data-key", "x");
        page_sync.page_loaded(&FakeDocument::new(vec![first.clone(), second.clone()]));

        assert_eq!(page_sync.auto_bound(), ["x"]);
        fire(&table, "x");
        assert_eq!(first.clicks(), 1);
        assert_eq!(second.clicks(), 0);
    }

    #[test]
    fn test_strict_policy_skips_malformed() {
        let table = BindingTable::shared();
        let mut page_sync = PageSync::new(table.clone(), "data-key", SequencePolicy::Strict);

        page_sync.page_loaded(&FakeDocument::new(vec![
            FakeElement::new("BUTTON").with_attribute("data-key", "a b c"),
            FakeElement::new("BUTTON").with_attribute("data-key", "a b"),
            FakeElement::new("BUTTON").with_attribute("data-key", ""),
        ]));

        assert_eq!(page_sync.auto_bound(), ["a b"]);
    }

    #[test]
    fn test_lenient_policy_keeps_long_sequences() {
        let table = BindingTable::shared();
        let mut page_sync = sync(&table);

        page_sync.page_loaded(&FakeDocument::new(vec![
            FakeElement::new("BUTTON").with_attribute("data-key", "a b c"),
        ]));
        assert_eq!(page_sync.auto_bound(), ["a b c"]);
    }
}

//! # page-shortcuts
//!
//! Global keyboard shortcuts for single-page web UIs.
//!
//! ## Features
//!
//! - Canonical key descriptors (`Meta+Alt+Control+k`) and two-key sequences (`g j`)
//! - Document-level dispatch that leaves inputs, selects, textareas and
//!   content-editable elements alone
//! - Auto-binding of elements that declare a `data-key` attribute, rebuilt on
//!   every navigation without shadowing explicit bindings
//! - Help tooltips on `?` and overlay closing on `Escape`
//! - Widget attachments that unbind when dropped
//!
//! The page itself is reached only through the [`Element`], [`Document`],
//! [`Tooltips`] and [`Overlay`] traits.
//!
//! ```
//! use page_shortcuts::{BindingTable, Dispatcher, KeyInput};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let table = BindingTable::shared();
//! let hits = Rc::new(Cell::new(0));
//! let h = hits.clone();
//! table.borrow_mut().bind_fn("g g", move |_| h.set(h.get() + 1));
//!
//! let mut dispatcher = Dispatcher::new(table);
//! dispatcher.dispatch(&KeyInput::key("g"));
//! dispatcher.dispatch(&KeyInput::key("g"));
//! assert_eq!(hits.get(), 1);
//! ```

mod attach;
mod config;
mod descriptor;
mod dispatcher;
mod display;
mod dom;
mod error;
mod host;
mod key;
mod listener;
mod page;
mod sequence;
mod table;
mod tooltip;
mod warning;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use attach::{attach, ShortcutAttachment};
pub use config::{SequencePolicy, ShortcutConfig};
pub use descriptor::{key_count, KeyDescriptor, Shortcut, MODIFIER_PREFIXES};
pub use dispatcher::{Dispatch, Dispatcher};
pub use display::KeyDisplayFormat;
pub use dom::{attribute_selector, has_tag, is_editable, tag, Document, Element, ElementRef, Overlay};
pub use error::{Result, ShortcutError};
pub use host::{HostEvent, KeyboardShortcuts};
pub use key::{KeyInput, PURE_MODIFIERS};
pub use listener::{DocumentEvent, OnceListeners, Subscription};
pub use page::PageSync;
pub use sequence::SequenceTracker;
pub use table::{BindingTable, Handler, SharedTable};
pub use tooltip::{remove_tooltips, show_tooltips, Tooltips, HIDDEN_CLASS};
pub use warning::{render as render_warnings, BindWarning};

// Re-exported so callers can build `KeyInput`s without a direct dependency.
pub use crossterm::event::KeyModifiers;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{Fixtures, KeyPresses, RecordingOverlay, RecordingTooltips};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_full_session() {
        let document = Rc::new(Fixtures::journal_page());
        let tooltips = Rc::new(RecordingTooltips::new());
        let overlay = Rc::new(RecordingOverlay::new());
        let mut shortcuts = KeyboardShortcuts::new(
            ShortcutConfig::default(),
            document.clone(),
            tooltips.clone(),
            overlay.clone(),
        );

        shortcuts.handle(HostEvent::PageInit);
        shortcuts.handle(HostEvent::PageLoaded);

        let log = Rc::new(RefCell::new(Vec::new()));
        let l = log.clone();
        shortcuts
            .bind("Control+s", move |_| l.borrow_mut().push("save"))
            .unwrap();

        let outcomes: Vec<Dispatch> = KeyPresses::new()
            .key("g")
            .press("Shift", KeyModifiers::SHIFT)
            .key("b")
            .ctrl('s')
            .key("Escape")
            .into_events()
            .into_iter()
            .map(|e| shortcuts.handle(HostEvent::KeyDown(e)).unwrap())
            .collect();

        assert_eq!(
            outcomes,
            vec![
                Dispatch::Unmatched("g".to_string()),
                Dispatch::Unmatched("Shift".to_string()),
                Dispatch::Sequence("g b".to_string()),
                Dispatch::Single("Control+s".to_string()),
                Dispatch::Single("Escape".to_string()),
            ]
        );

        // the "g b" link
        assert_eq!(document.element(2).clicks(), 1);
        assert_eq!(document.element(1).clicks(), 0);
        assert_eq!(*log.borrow(), vec!["save"]);
        assert_eq!(overlay.closed(), 1);
        assert!(tooltips.labels().is_empty());
    }
}

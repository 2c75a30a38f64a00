//! The shortcut host: one registry per application.

use crate::attach::{attach, ShortcutAttachment};
use crate::config::{SequencePolicy, ShortcutConfig};
use crate::descriptor::Shortcut;
use crate::dispatcher::{Dispatch, Dispatcher};
use crate::dom::{Document, ElementRef, Overlay};
use crate::error::Result;
use crate::key::KeyInput;
use crate::listener::{DocumentEvent, OnceListeners};
use crate::page::PageSync;
use crate::table::{BindingTable, SharedTable};
use crate::tooltip::{remove_tooltips, show_tooltips, Tooltips};
use crate::warning::BindWarning;
use std::cell::Cell;
use std::rc::Rc;

/// Signals delivered to the host by the application.
#[derive(Debug)]
pub enum HostEvent {
    /// Application started. Fired once.
    PageInit,
    /// Navigation finished and the new page content is in place.
    PageLoaded,
    /// A keydown reached the document.
    KeyDown(KeyInput),
    /// A mouse or pointer press reached the document.
    PointerDown,
}

/// Global keyboard shortcuts for a single-page UI.
///
/// Owns the binding table, the dispatcher, page sync and the one-shot
/// listeners, and talks to the page through the collaborator traits.
pub struct KeyboardShortcuts {
    config: Rc<ShortcutConfig>,
    table: SharedTable,
    dispatcher: Dispatcher,
    page_sync: PageSync,
    listeners: OnceListeners,
    document: Rc<dyn Document>,
    tooltips: Rc<dyn Tooltips>,
    overlay: Rc<dyn Overlay>,
    initialized: bool,
}

impl KeyboardShortcuts {
    /// Create a host with an empty binding table.
    pub fn new(
        config: ShortcutConfig,
        document: Rc<dyn Document>,
        tooltips: Rc<dyn Tooltips>,
        overlay: Rc<dyn Overlay>,
    ) -> Self {
        let table = BindingTable::shared();
        let page_sync = PageSync::new(table.clone(), config.attribute.clone(), config.sequence_policy);

        Self {
            config: Rc::new(config),
            dispatcher: Dispatcher::new(table.clone()),
            page_sync,
            table,
            listeners: OnceListeners::new(),
            document,
            tooltips,
            overlay,
            initialized: false,
        }
    }

    pub fn config(&self) -> &ShortcutConfig {
        &self.config
    }

    /// The shared binding table.
    pub fn table(&self) -> &SharedTable {
        &self.table
    }

    /// One-shot document listeners.
    pub fn listeners(&self) -> &OnceListeners {
        &self.listeners
    }

    /// Descriptors auto-bound from the current page.
    pub fn auto_bound(&self) -> &[String] {
        self.page_sync.auto_bound()
    }

    /// Bind a global shortcut that survives navigation.
    ///
    /// Under the strict policy a descriptor of more than two keys is an
    /// error; otherwise it is bound with a warning.
    pub fn bind(
        &self,
        descriptor: &str,
        handler: impl Fn(&KeyInput) + 'static,
    ) -> Result<Vec<BindWarning>> {
        if self.config.sequence_policy == SequencePolicy::Strict {
            Shortcut::parse(descriptor)?;
        }
        Ok(self.table.borrow_mut().bind_fn(descriptor, handler))
    }

    /// Remove a shortcut. Unknown descriptors are ignored.
    pub fn unbind(&self, descriptor: &str) {
        self.table.borrow_mut().unbind(descriptor);
    }

    /// Attach a shortcut to a widget element.
    ///
    /// See [`crate::attach`]. Under the strict policy a malformed key is
    /// logged and nothing is attached.
    pub fn attach(&self, element: ElementRef, key: Option<&str>) -> ShortcutAttachment {
        if let (SequencePolicy::Strict, Some(descriptor)) = (self.config.sequence_policy, key) {
            if let Err(err) = Shortcut::parse(descriptor) {
                tracing::warn!(descriptor, %err, "not attaching malformed shortcut");
                return ShortcutAttachment::inert();
            }
        }
        attach(&self.table, &self.config.attribute, element, key)
    }

    /// Route a host signal. Returns the dispatch outcome for keydowns.
    pub fn handle(&mut self, event: HostEvent) -> Option<Dispatch> {
        match event {
            HostEvent::PageInit => {
                self.page_init();
                None
            }
            HostEvent::PageLoaded => {
                self.page_loaded();
                None
            }
            HostEvent::KeyDown(input) => Some(self.keydown(&input)),
            HostEvent::PointerDown => {
                self.pointerdown();
                None
            }
        }
    }

    /// Register the permanent help and close-overlay shortcuts.
    pub fn page_init(&mut self) {
        if self.initialized {
            tracing::debug!("page-init received twice, ignoring");
            return;
        }
        self.initialized = true;

        let document = self.document.clone();
        let tooltips = self.tooltips.clone();
        let listeners = self.listeners.clone();
        let config = self.config.clone();
        let help_key = self.config.help_key.clone();
        self.table.borrow_mut().bind_fn(&help_key, move |_| {
            show_tooltips(&*document, &*tooltips, &config);

            // whichever of the two listeners fires first removes the tooltips
            let dismissed = Rc::new(Cell::new(false));
            for event in [DocumentEvent::PointerDown, DocumentEvent::KeyDown] {
                let document = document.clone();
                let tooltips = tooltips.clone();
                let config = config.clone();
                let dismissed = dismissed.clone();
                listeners.once(event, move || {
                    if !dismissed.replace(true) {
                        remove_tooltips(&*document, &*tooltips, &config);
                    }
                });
            }
        });

        let overlay = self.overlay.clone();
        self.table
            .borrow_mut()
            .bind_fn(&self.config.close_overlay_key, move |_| overlay.close());

        tracing::debug!(
            help = %self.config.help_key,
            close = %self.config.close_overlay_key,
            "global keyboard shortcuts registered"
        );
    }

    /// Resynchronize auto-derived bindings with the current page.
    pub fn page_loaded(&mut self) {
        self.page_sync.page_loaded(&*self.document);
    }

    /// Handle a document keydown.
    ///
    /// One-shot keydown listeners armed before this event run after the
    /// dispatcher; listeners armed by the matched handler wait for the next
    /// keydown.
    pub fn keydown(&mut self, event: &KeyInput) -> Dispatch {
        let armed = self.listeners.take(DocumentEvent::KeyDown);
        let outcome = self.dispatcher.dispatch(event);
        for callback in armed {
            callback();
        }
        outcome
    }

    /// Handle a document pointer press.
    pub fn pointerdown(&mut self) {
        self.listeners.emit(DocumentEvent::PointerDown);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ShortcutError;
    use crate::testing::{FakeDocument, FakeElement, Fixtures, RecordingOverlay, RecordingTooltips};

    struct Harness {
        shortcuts: KeyboardShortcuts,
        document: Rc<FakeDocument>,
        tooltips: Rc<RecordingTooltips>,
        overlay: Rc<RecordingOverlay>,
    }

    fn harness(config: ShortcutConfig, document: FakeDocument) -> Harness {
        let document = Rc::new(document);
        let tooltips = Rc::new(RecordingTooltips::new());
        let overlay = Rc::new(RecordingOverlay::new());
        let shortcuts = KeyboardShortcuts::new(
            config,
            document.clone(),
            tooltips.clone(),
            overlay.clone(),
        );
        Harness {
            shortcuts,
            document,
            tooltips,
            overlay,
        }
    }

    fn started(document: FakeDocument) -> Harness {
        let mut h = harness(ShortcutConfig::default(), document);
        h.shortcuts.handle(HostEvent::PageInit);
        h.shortcuts.handle(HostEvent::PageLoaded);
        h
    }

    #[test]
    fn test_escape_closes_overlay_once() {
        let mut h = started(FakeDocument::empty());

        let outcome = h.shortcuts.handle(HostEvent::KeyDown(KeyInput::key("Escape")));
        assert_eq!(outcome, Some(Dispatch::Single("Escape".to_string())));
        assert_eq!(h.overlay.closed(), 1);
    }

    #[test]
    fn test_help_key_beats_element_shortcut() {
        let help_button = FakeElement::new("BUTTON").with_attribute("data-key", "?");
        let mut h = started(FakeDocument::new(vec![
            help_button.clone(),
            FakeElement::new("A").with_attribute("data-key", "g j"),
        ]));

        h.shortcuts.keydown(&KeyInput::key("?"));
        assert_eq!(help_button.clicks(), 0);
        assert_eq!(h.tooltips.labels(), vec!["?", "g j"]);
        assert_eq!(h.shortcuts.auto_bound(), ["g j"]);
    }

    #[test]
    fn test_tooltips_removed_on_next_keydown() {
        let mut h = started(Fixtures::journal_page());

        h.shortcuts.keydown(&KeyInput::key("?"));
        assert!(!h.tooltips.labels().is_empty());
        assert_eq!(h.shortcuts.listeners().pending(DocumentEvent::KeyDown), 1);

        h.shortcuts.keydown(&KeyInput::key("x"));
        assert!(h.tooltips.labels().is_empty());
        assert_eq!(h.tooltips.removals(), 1);

        // the pointer listener is spent too
        h.shortcuts.pointerdown();
        assert_eq!(h.tooltips.removals(), 1);
    }

    #[test]
    fn test_tooltips_removed_on_pointerdown() {
        let mut h = started(Fixtures::journal_page());

        h.shortcuts.keydown(&KeyInput::key("?"));
        let reload = h.document.select_one("#reload-page");
        assert!(!reload.has_class("hidden"));

        h.shortcuts.handle(HostEvent::PointerDown);
        assert!(h.tooltips.labels().is_empty());
        assert!(reload.has_class("hidden"));
        assert_eq!(h.shortcuts.listeners().pending(DocumentEvent::PointerDown), 0);
    }

    #[test]
    fn test_explicit_binding_survives_navigation() {
        let mut h = harness(ShortcutConfig::default(), Fixtures::journal_page());
        let calls = Rc::new(Cell::new(0));
        let c = calls.clone();
        h.shortcuts.bind("g j", move |_| c.set(c.get() + 1)).unwrap();

        h.shortcuts.page_loaded();
        h.document.replace(Fixtures::report_page());
        h.shortcuts.page_loaded();

        assert!(h.shortcuts.table().borrow().contains("g j"));
        assert!(!h.shortcuts.auto_bound().iter().any(|d| d == "g j"));

        h.shortcuts.keydown(&KeyInput::key("g"));
        h.shortcuts.keydown(&KeyInput::key("j"));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_navigation_swaps_auto_bindings() {
        let mut h = harness(ShortcutConfig::default(), Fixtures::journal_page());
        h.shortcuts.page_loaded();
        let journal: Vec<String> = h.shortcuts.auto_bound().to_vec();
        assert!(journal.iter().any(|d| d == "n"));

        h.document.replace(Fixtures::report_page());
        h.shortcuts.page_loaded();

        let table = h.shortcuts.table().borrow();
        assert!(!table.contains("n"));
        for descriptor in h.shortcuts.auto_bound() {
            assert!(table.contains(descriptor));
        }
    }

    #[test]
    fn test_keydown_in_input_ignored() {
        let mut h = started(FakeDocument::empty());
        let input = FakeElement::new("INPUT");

        let event = KeyInput::key("Escape").with_target(input);
        assert_eq!(h.shortcuts.keydown(&event), Dispatch::Ignored);
        assert_eq!(h.overlay.closed(), 0);
    }

    #[test]
    fn test_attach_through_host() {
        let mut h = started(FakeDocument::empty());
        let search = FakeElement::new("INPUT");

        let attachment = h.shortcuts.attach(search.clone(), Some("/"));
        let event = KeyInput::key("/");
        assert!(h.shortcuts.keydown(&event).fired());
        assert_eq!(search.focus_count(), 1);
        assert!(event.default_prevented());

        drop(attachment);
        assert!(!h.shortcuts.keydown(&KeyInput::key("/")).fired());
    }

    #[test]
    fn test_strict_policy() {
        let h = harness(ShortcutConfig::default().strict(), FakeDocument::empty());

        let err = h.shortcuts.bind("a b c", |_| {}).unwrap_err();
        assert!(matches!(err, ShortcutError::SequenceTooLong { keys: 3, .. }));
        assert!(h.shortcuts.table().borrow().is_empty());

        let attachment = h.shortcuts.attach(FakeElement::new("BUTTON"), Some("a b c"));
        assert_eq!(attachment.descriptor(), None);
    }

    #[test]
    fn test_lenient_policy_warns() {
        let h = harness(ShortcutConfig::default(), FakeDocument::empty());

        let warnings = h.shortcuts.bind("a b c", |_| {}).unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(h.shortcuts.table().borrow().contains("a b c"));
    }

    #[test]
    fn test_page_init_once() {
        let mut h = started(FakeDocument::empty());
        h.shortcuts.handle(HostEvent::PageInit);
        assert_eq!(h.shortcuts.table().borrow().descriptors(), vec!["?", "Escape"]);
    }

    #[test]
    fn test_configured_keys() {
        let config = ShortcutConfig {
            help_key: "h".to_string(),
            close_overlay_key: "q".to_string(),
            ..ShortcutConfig::default()
        };
        let mut h = harness(config, FakeDocument::empty());
        h.shortcuts.page_init();

        h.shortcuts.keydown(&KeyInput::key("q"));
        assert_eq!(h.overlay.closed(), 1);
        assert!(!h.shortcuts.keydown(&KeyInput::key("Escape")).fired());
    }
}

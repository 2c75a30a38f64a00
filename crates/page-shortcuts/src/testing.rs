//! In-memory page fakes and input builders for tests.
//!
//! Compiled for this crate's tests and, with the `testing` feature, for
//! downstream crates that want to exercise their shortcut wiring without a
//! browser.

use crate::dom::{Document, Element, ElementRef, Overlay};
use crate::key::KeyInput;
use crate::tooltip::Tooltips;
use crossterm::event::KeyModifiers;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;

/// A page element that records how it was activated.
#[derive(Debug, Default)]
pub struct FakeElement {
    tag: String,
    editable: Cell<bool>,
    attributes: RefCell<BTreeMap<String, String>>,
    classes: RefCell<Vec<String>>,
    clicks: Cell<usize>,
    focused: Cell<usize>,
}

impl FakeElement {
    /// Create an element with the given tag name.
    pub fn new(tag: &str) -> Rc<Self> {
        Rc::new(Self {
            tag: tag.to_ascii_uppercase(),
            ..Self::default()
        })
    }

    /// Enable content editing.
    pub fn content_editable(self: Rc<Self>) -> Rc<Self> {
        self.editable.set(true);
        self
    }

    /// Set an attribute.
    pub fn with_attribute(self: Rc<Self>, name: &str, value: &str) -> Rc<Self> {
        self.set_attribute(name, value);
        self
    }

    /// Set the `id` attribute.
    pub fn with_id(self: Rc<Self>, id: &str) -> Rc<Self> {
        self.with_attribute("id", id)
    }

    /// Add a class.
    pub fn with_class(self: Rc<Self>, class: &str) -> Rc<Self> {
        self.add_class(class);
        self
    }

    /// Number of clicks received.
    pub fn clicks(&self) -> usize {
        self.clicks.get()
    }

    /// Number of times focus was moved here.
    pub fn focus_count(&self) -> usize {
        self.focused.get()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    /// Match a `[attr]`, `#id`, `.class` or tag selector.
    pub fn matches(&self, selector: &str) -> bool {
        if let Some(name) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            self.attributes.borrow().contains_key(name)
        } else if let Some(id) = selector.strip_prefix('#') {
            self.attributes.borrow().get("id").is_some_and(|v| v == id)
        } else if let Some(class) = selector.strip_prefix('.') {
            self.has_class(class)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

impl Element for FakeElement {
    fn tag_name(&self) -> String {
        self.tag.clone()
    }

    fn is_content_editable(&self) -> bool {
        self.editable.get()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.classes.borrow_mut().push(class.to_string());
        }
    }

    fn remove_class(&self, class: &str) {
        self.classes.borrow_mut().retain(|c| c != class);
    }

    fn click(&self) {
        self.clicks.set(self.clicks.get() + 1);
    }

    fn focus(&self) {
        self.focused.set(self.focused.get() + 1);
    }
}

/// A page: elements in document order. Content can be swapped to simulate
/// navigation.
#[derive(Debug, Default)]
pub struct FakeDocument {
    elements: RefCell<Vec<Rc<FakeElement>>>,
}

impl FakeDocument {
    pub fn new(elements: Vec<Rc<FakeElement>>) -> Self {
        Self {
            elements: RefCell::new(elements),
        }
    }

    /// A page with no elements.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Replace the page content with another page's.
    pub fn replace(&self, page: FakeDocument) {
        *self.elements.borrow_mut() = page.elements.into_inner();
    }

    /// Element at `index` in document order.
    ///
    /// # Panics
    ///
    /// Panics if there is no such element.
    pub fn element(&self, index: usize) -> Rc<FakeElement> {
        self.elements.borrow()[index].clone()
    }

    /// First element matching `selector`.
    ///
    /// # Panics
    ///
    /// Panics if nothing matches.
    pub fn select_one(&self, selector: &str) -> Rc<FakeElement> {
        self.elements
            .borrow()
            .iter()
            .find(|e| e.matches(selector))
            .cloned()
            .unwrap_or_else(|| panic!("no element matches '{}'", selector))
    }

    pub fn len(&self) -> usize {
        self.elements.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.borrow().is_empty()
    }
}

impl Document for FakeDocument {
    fn select(&self, selector: &str) -> Option<ElementRef> {
        self.elements
            .borrow()
            .iter()
            .find(|e| e.matches(selector))
            .map(|e| e.clone() as ElementRef)
    }

    fn select_all(&self, selector: &str) -> Vec<ElementRef> {
        self.elements
            .borrow()
            .iter()
            .filter(|e| e.matches(selector))
            .map(|e| e.clone() as ElementRef)
            .collect()
    }
}

/// Tooltip renderer that records the labels currently shown.
#[derive(Debug, Default)]
pub struct RecordingTooltips {
    shown: RefCell<Vec<String>>,
    removals: Cell<usize>,
}

impl RecordingTooltips {
    pub fn new() -> Self {
        Self::default()
    }

    /// Labels currently on screen, in the order they were shown.
    pub fn labels(&self) -> Vec<String> {
        self.shown.borrow().clone()
    }

    /// Number of `remove_all` calls.
    pub fn removals(&self) -> usize {
        self.removals.get()
    }
}

impl Tooltips for RecordingTooltips {
    fn show(&self, _target: &ElementRef, label: &str) {
        self.shown.borrow_mut().push(label.to_string());
    }

    fn remove_all(&self) {
        self.shown.borrow_mut().clear();
        self.removals.set(self.removals.get() + 1);
    }
}

/// Overlay that counts close requests.
#[derive(Debug, Default)]
pub struct RecordingOverlay {
    closed: Cell<usize>,
}

impl RecordingOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn closed(&self) -> usize {
        self.closed.get()
    }
}

impl Overlay for RecordingOverlay {
    fn close(&self) {
        self.closed.set(self.closed.get() + 1);
    }
}

/// Builder for a series of keydown events.
#[derive(Debug, Default)]
pub struct KeyPresses {
    events: Vec<KeyInput>,
    target: Option<ElementRef>,
}

impl KeyPresses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Aim every following press at `target`.
    pub fn targeting(mut self, target: ElementRef) -> Self {
        self.target = Some(target);
        self
    }

    /// Add a keydown with modifiers.
    pub fn press(mut self, key: &str, modifiers: KeyModifiers) -> Self {
        let mut event = KeyInput::new(key, modifiers);
        event.target = self.target.clone();
        self.events.push(event);
        self
    }

    /// Add a keydown without modifiers.
    pub fn key(self, key: &str) -> Self {
        self.press(key, KeyModifiers::NONE)
    }

    /// Add a character keydown.
    pub fn char(self, c: char) -> Self {
        self.key(&c.to_string())
    }

    /// Add one keydown per character.
    pub fn chars(self, s: &str) -> Self {
        s.chars().fold(self, |presses, c| presses.char(c))
    }

    /// Add a Control+key keydown.
    pub fn ctrl(self, c: char) -> Self {
        self.press(&c.to_string(), KeyModifiers::CONTROL)
    }

    /// Add an Alt+key keydown.
    pub fn alt(self, c: char) -> Self {
        self.press(&c.to_string(), KeyModifiers::ALT)
    }

    /// Add a Meta+key keydown.
    pub fn meta(self, c: char) -> Self {
        self.press(&c.to_string(), KeyModifiers::SUPER)
    }

    pub fn into_events(self) -> Vec<KeyInput> {
        self.events
    }
}

/// Deterministic sample pages.
pub struct Fixtures;

impl Fixtures {
    /// Journal page: new-entry button, filter input, navigation links.
    pub fn journal_page() -> FakeDocument {
        FakeDocument::new(vec![
            FakeElement::new("BUTTON").with_id("reload-page").with_class("hidden"),
            FakeElement::new("A").with_attribute("data-key", "g j"),
            FakeElement::new("A").with_attribute("data-key", "g b"),
            FakeElement::new("BUTTON").with_attribute("data-key", "n"),
            FakeElement::new("INPUT").with_attribute("data-key", "/"),
            FakeElement::new("TEXTAREA"),
        ])
    }

    /// Report page: navigation links, export button, filter input.
    pub fn report_page() -> FakeDocument {
        FakeDocument::new(vec![
            FakeElement::new("BUTTON").with_id("reload-page").with_class("hidden"),
            FakeElement::new("A").with_attribute("data-key", "g j"),
            FakeElement::new("A").with_attribute("data-key", "g b"),
            FakeElement::new("BUTTON").with_attribute("data-key", "Control+e"),
            FakeElement::new("INPUT").with_attribute("data-key", "/"),
        ])
    }
}

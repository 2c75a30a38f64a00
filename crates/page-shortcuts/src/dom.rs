//! DOM collaborator traits.
//!
//! The dispatcher never touches a browser API directly. A host binding
//! (`web-sys`, a webview bridge, or the in-memory fakes in
//! [`crate::testing`]) implements these traits and hands elements over as
//! [`ElementRef`]s.

use std::fmt;
use std::rc::Rc;

/// Shared handle to a page element.
pub type ElementRef = Rc<dyn Element>;

/// A single element of the rendered page.
///
/// All methods take `&self`; implementations use interior mutability the
/// same way a DOM node does.
pub trait Element {
    /// Upper-case tag name, e.g. `"BUTTON"`.
    fn tag_name(&self) -> String;

    /// Whether content editing is enabled on this element.
    fn is_content_editable(&self) -> bool {
        false
    }

    /// Read an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute, replacing any previous value.
    fn set_attribute(&self, name: &str, value: &str);

    /// Add a CSS class.
    fn add_class(&self, class: &str);

    /// Remove a CSS class.
    fn remove_class(&self, class: &str);

    /// Simulate a click (the element's default activation).
    fn click(&self);

    /// Move keyboard focus to this element.
    fn focus(&self);
}

impl fmt::Debug for dyn Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag_name())
            .finish_non_exhaustive()
    }
}

/// Document-level query capability.
///
/// Selectors used by this crate are limited to `[attr]`, `#id`, `.class`
/// and bare tag names.
pub trait Document {
    /// First element matching `selector`, in document order.
    fn select(&self, selector: &str) -> Option<ElementRef>;

    /// All elements matching `selector`, in document order.
    fn select_all(&self, selector: &str) -> Vec<ElementRef>;
}

/// The overlay (modal, dialog) currently open on the page.
pub trait Overlay {
    /// Close whatever overlay is open. Must be a no-op when none is.
    fn close(&self);
}

/// Tag names that matter to shortcut handling.
pub mod tag {
    pub const INPUT: &str = "INPUT";
    pub const SELECT: &str = "SELECT";
    pub const TEXTAREA: &str = "TEXTAREA";
    pub const BUTTON: &str = "BUTTON";
    pub const ANCHOR: &str = "A";
}

/// Check whether an element's tag matches `name`, ignoring case.
pub fn has_tag(element: &dyn Element, name: &str) -> bool {
    element.tag_name().eq_ignore_ascii_case(name)
}

/// Whether keystrokes aimed at `element` belong to the user's typing
/// rather than to the shortcut layer.
pub fn is_editable(element: &dyn Element) -> bool {
    has_tag(element, tag::INPUT)
        || has_tag(element, tag::SELECT)
        || has_tag(element, tag::TEXTAREA)
        || element.is_content_editable()
}

/// Attribute selector for `name`, e.g. `[data-key]`.
pub fn attribute_selector(name: &str) -> String {
    format!("[{}]", name)
}

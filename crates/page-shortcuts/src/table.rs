//! The binding table: descriptor strings mapped to handlers.

use crate::descriptor::key_count;
use crate::key::KeyInput;
use crate::warning::BindWarning;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Behavior triggered by a matched keystroke.
pub type Handler = Rc<dyn Fn(&KeyInput)>;

/// A binding table shared between the dispatcher, page sync and widgets.
pub type SharedTable = Rc<RefCell<BindingTable>>;

/// Mapping from a descriptor (or two-key sequence) to its handler.
///
/// Keys are the literal descriptor strings given to [`bind`](Self::bind).
#[derive(Default)]
pub struct BindingTable {
    bindings: HashMap<String, Handler>,
}

impl BindingTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table ready to be shared.
    pub fn shared() -> SharedTable {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Bind `handler` to `descriptor`.
    ///
    /// Descriptors longer than two keys and descriptors that already have a
    /// handler produce warnings, but the binding is installed either way and
    /// the newest handler wins.
    pub fn bind(&mut self, descriptor: &str, handler: Handler) -> Vec<BindWarning> {
        let mut warnings = Vec::new();

        let keys = key_count(descriptor);
        if keys > 2 {
            tracing::warn!(descriptor, keys, "only key sequences of length <= 2 are supported");
            warnings.push(BindWarning::SequenceTooLong {
                descriptor: descriptor.to_string(),
                keys,
            });
        }

        if self.bindings.contains_key(descriptor) {
            tracing::warn!(descriptor, "duplicate keyboard shortcut");
            warnings.push(BindWarning::Duplicate {
                descriptor: descriptor.to_string(),
            });
        }

        self.bindings.insert(descriptor.to_string(), handler);
        warnings
    }

    /// Bind a closure. Convenience over [`bind`](Self::bind).
    pub fn bind_fn(
        &mut self,
        descriptor: &str,
        handler: impl Fn(&KeyInput) + 'static,
    ) -> Vec<BindWarning> {
        self.bind(descriptor, Rc::new(handler))
    }

    /// Remove the binding for `descriptor`. Absent keys are ignored.
    pub fn unbind(&mut self, descriptor: &str) {
        self.bindings.remove(descriptor);
    }

    /// Whether `descriptor` has a handler.
    pub fn contains(&self, descriptor: &str) -> bool {
        self.bindings.contains_key(descriptor)
    }

    /// The handler for `descriptor`, cloned out so it can be invoked after
    /// the table borrow ends.
    pub fn handler(&self, descriptor: &str) -> Option<Handler> {
        self.bindings.get(descriptor).cloned()
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no bindings are installed.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// All bound descriptors, sorted.
    pub fn descriptors(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.bindings.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

impl fmt::Debug for BindingTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingTable")
            .field("descriptors", &self.descriptors())
            .finish()
    }
}

//! Document-level keydown dispatch.

use crate::descriptor::KeyDescriptor;
use crate::dom::is_editable;
use crate::key::KeyInput;
use crate::sequence::SequenceTracker;
use crate::table::SharedTable;

/// What the dispatcher did with a keydown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Target was editable; nothing looked up, nothing recorded.
    Ignored,
    /// A two-key sequence matched and its handler ran.
    Sequence(String),
    /// A single keystroke matched and its handler ran.
    Single(String),
    /// No binding for this keystroke.
    Unmatched(String),
}

impl Dispatch {
    /// Whether a handler ran.
    pub fn fired(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Single(_))
    }
}

/// Resolves each keydown against the binding table.
pub struct Dispatcher {
    table: SharedTable,
    tracker: SequenceTracker,
}

impl Dispatcher {
    /// Create a dispatcher over a shared table.
    pub fn new(table: SharedTable) -> Self {
        Self {
            table,
            tracker: SequenceTracker::new(),
        }
    }

    /// The sequence tracker state.
    pub fn tracker(&self) -> &SequenceTracker {
        &self.tracker
    }

    /// Handle one keydown.
    ///
    /// Sequence bindings take precedence over single-key bindings and at most
    /// one handler runs. The handler is called after the table borrow is
    /// released, so it may bind or unbind freely. Panics in the handler are
    /// not caught.
    pub fn dispatch(&mut self, event: &KeyInput) -> Dispatch {
        if event.target.as_deref().is_some_and(|target| is_editable(target)) {
            tracing::trace!(key = %event.key, "keydown in editable element ignored");
            return Dispatch::Ignored;
        }

        let current = KeyDescriptor::encode(event);
        let sequence = self.tracker.candidate(&current);

        let matched = {
            let table = self.table.borrow();
            if let Some(handler) = table.handler(&sequence) {
                Some((handler, Dispatch::Sequence(sequence)))
            } else {
                table
                    .handler(current.as_str())
                    .map(|handler| (handler, Dispatch::Single(current.to_string())))
            }
        };

        let outcome = match matched {
            Some((handler, outcome)) => {
                tracing::debug!(?outcome, "keyboard shortcut matched");
                handler(event);
                outcome
            }
            None => {
                tracing::trace!(descriptor = %current, "no keyboard shortcut bound");
                Dispatch::Unmatched(current.to_string())
            }
        };

        self.tracker.record(event, current);
        outcome
    }
}

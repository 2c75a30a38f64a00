//! Two-key sequence tracking.

use crate::descriptor::KeyDescriptor;
use crate::key::KeyInput;

/// Remembers the last significant keystroke so the next one can complete a
/// two-key sequence.
#[derive(Debug, Clone, Default)]
pub struct SequenceTracker {
    last_key: KeyDescriptor,
}

impl SequenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The last significant descriptor; empty before the first keystroke.
    pub fn last_key(&self) -> &KeyDescriptor {
        &self.last_key
    }

    /// The sequence string `current` would complete.
    pub fn candidate(&self, current: &KeyDescriptor) -> String {
        format!("{} {}", self.last_key, current)
    }

    /// Record a keystroke that reached the dispatcher.
    ///
    /// A bare Alt, Control or Shift press is skipped so that holding a
    /// modifier between the two halves of a sequence does not break it.
    pub fn record(&mut self, event: &KeyInput, descriptor: KeyDescriptor) {
        if !event.is_pure_modifier() {
            self.last_key = descriptor;
        }
    }

    /// Forget the last keystroke.
    pub fn reset(&mut self) {
        self.last_key = KeyDescriptor::default();
    }
}

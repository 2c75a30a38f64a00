//! One-shot document listeners.
//!
//! A listener registered with [`OnceListeners::once`] runs on the first
//! matching [`DocumentEvent`] and is then disposed. The returned
//! [`Subscription`] makes that lifecycle observable and allows cancelling a
//! listener before it fires.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Document events a one-shot listener can wait for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentEvent {
    /// Any keydown on the document.
    KeyDown,
    /// Any mouse or pointer press on the document.
    PointerDown,
}

type Callback = Box<dyn FnOnce()>;

struct Pending {
    id: u64,
    event: DocumentEvent,
    callback: Callback,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    pending: Vec<Pending>,
}

/// Registry of one-shot listeners. Cloning shares the registry.
#[derive(Clone, Default)]
pub struct OnceListeners {
    registry: Rc<RefCell<Registry>>,
}

impl OnceListeners {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `callback` on the next `event`, then forget it.
    ///
    /// Dropping the returned handle does not cancel the listener.
    pub fn once(&self, event: DocumentEvent, callback: impl FnOnce() + 'static) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.pending.push(Pending {
            id,
            event,
            callback: Box::new(callback),
        });

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Detach every listener waiting for `event`, in registration order.
    ///
    /// Listeners armed after this call are not part of the batch, which is
    /// how a handler running for an event can arm a listener for the *next*
    /// occurrence of the same event.
    pub fn take(&self, event: DocumentEvent) -> Vec<Box<dyn FnOnce()>> {
        let mut registry = self.registry.borrow_mut();
        let (matching, rest): (Vec<_>, Vec<_>) = std::mem::take(&mut registry.pending)
            .into_iter()
            .partition(|p| p.event == event);
        registry.pending = rest;
        matching.into_iter().map(|p| p.callback).collect()
    }

    /// Fire and dispose every listener waiting for `event`.
    ///
    /// Returns how many listeners ran.
    pub fn emit(&self, event: DocumentEvent) -> usize {
        let callbacks = self.take(event);
        let count = callbacks.len();
        for callback in callbacks {
            callback();
        }
        count
    }

    /// Number of listeners waiting for `event`.
    pub fn pending(&self, event: DocumentEvent) -> usize {
        self.registry
            .borrow()
            .pending
            .iter()
            .filter(|p| p.event == event)
            .count()
    }
}

impl fmt::Debug for OnceListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnceListeners")
            .field("keydown", &self.pending(DocumentEvent::KeyDown))
            .field("pointerdown", &self.pending(DocumentEvent::PointerDown))
            .finish()
    }
}

/// Handle to a one-shot listener.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Whether the listener is still waiting to fire.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|r| r.borrow().pending.iter().any(|p| p.id == self.id))
    }

    /// Remove the listener without running it. No-op once it has fired.
    pub fn cancel(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().pending.retain(|p| p.id != self.id);
        }
    }
}

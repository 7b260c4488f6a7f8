//! Synchronous listener fan-out with removal-safe broadcast.
//!
//! Both the theme registry and the theme cache notify subscribers through
//! a [`ListenerSet`]. Broadcast snapshots the subscriber ids first and
//! looks each one up in the live map at call time, so a listener that
//! unsubscribes itself or a sibling mid-broadcast is skipped cleanly and
//! no other listener is missed or invoked twice.
//!
//! Single-threaded by design. A listener must not trigger a nested
//! broadcast on the set it is being invoked from; removal is the only
//! supported re-entrant operation.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::fields::ResolvedPalette;

/// Identifier for one registered listener.
///
/// Ids are monotonically increasing and never reused, so a removal during
/// iteration cannot collide with a later addition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Callback = Rc<dyn Fn(&ResolvedPalette)>;

/// A set of palette-change listeners.
///
/// Cloning produces another handle to the same set; that shared handle is
/// what lets a callback unsubscribe itself from inside its own invocation.
#[derive(Clone, Default)]
pub struct ListenerSet {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: Cell<u64>,
    callbacks: RefCell<HashMap<u64, Callback>>,
}

impl ListenerSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener and return its id.
    ///
    /// Listeners added during a broadcast are not invoked until the next
    /// broadcast.
    pub fn add(&self, callback: impl Fn(&ResolvedPalette) + 'static) -> ListenerId {
        let id = self.inner.next_id.get();
        self.inner.next_id.set(id + 1);
        self.inner.callbacks.borrow_mut().insert(id, Rc::new(callback));
        ListenerId(id)
    }

    /// Remove a listener. Returns whether the id was still registered.
    pub fn remove(&self, id: ListenerId) -> bool {
        self.inner.callbacks.borrow_mut().remove(&id.0).is_some()
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.inner.callbacks.borrow().len()
    }

    /// True when no listener is registered.
    pub fn is_empty(&self) -> bool {
        self.inner.callbacks.borrow().is_empty()
    }

    /// Invoke every currently-registered listener with the new table.
    ///
    /// Invocation order is unspecified; listeners must not assume ordering
    /// relative to each other.
    pub fn notify(&self, table: &ResolvedPalette) {
        let ids: Vec<u64> = self.inner.callbacks.borrow().keys().copied().collect();
        for id in ids {
            // Look up through the live map at call time; no borrow is held
            // while the callback runs, so the callback may add or remove.
            let callback = self.inner.callbacks.borrow().get(&id).cloned();
            if let Some(callback) = callback {
                callback(table);
            }
        }
    }
}

impl fmt::Debug for ListenerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet").field("len", &self.len()).finish()
    }
}

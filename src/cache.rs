//! Deduplicating downstream snapshot of the registry's resolved table.
//!
//! The registry legitimately re-broadcasts on hot-reload registration even
//! when the final colors are unchanged. The cache is the choke point that
//! absorbs that: it compares every incoming table field-wise against its
//! own snapshot and re-broadcasts to its listeners only on a genuine value
//! change, so consumers react to observable differences and nothing else.

use std::cell::RefCell;
use std::rc::Rc;

use crate::color::Color;
use crate::fields::{ColorField, ResolvedPalette};
use crate::notify::{ListenerId, ListenerSet};
use crate::registry::ThemeRegistry;

/// Snapshot of the effective colors, refreshed from the registry.
#[derive(Debug)]
pub struct ThemeCache {
    inner: Rc<CacheInner>,
}

#[derive(Debug)]
struct CacheInner {
    snapshot: RefCell<ResolvedPalette>,
    listeners: ListenerSet,
}

impl CacheInner {
    fn refresh(&self, table: &ResolvedPalette) {
        {
            let mut snapshot = self.snapshot.borrow_mut();
            if *snapshot == *table {
                log::debug!("cached palette unchanged; absorbing broadcast");
                return;
            }
            // Whole-table replacement: the snapshot is never partially
            // updated as far as listeners can observe.
            *snapshot = *table;
        }
        self.listeners.notify(table);
    }
}

impl ThemeCache {
    /// Pull the registry's current table once and subscribe to changes.
    ///
    /// The subscription holds only a weak handle to the cache state, so a
    /// dropped cache leaves an inert registry listener behind rather than
    /// a leak.
    pub fn attach(registry: &ThemeRegistry) -> Self {
        let inner = Rc::new(CacheInner {
            snapshot: RefCell::new(registry.current()),
            listeners: ListenerSet::new(),
        });
        let weak = Rc::downgrade(&inner);
        registry.add_listener(move |table| {
            if let Some(inner) = weak.upgrade() {
                inner.refresh(table);
            }
        });
        Self { inner }
    }

    /// Copy of the cached resolved table.
    pub fn colors(&self) -> ResolvedPalette {
        *self.inner.snapshot.borrow()
    }

    /// O(1) indexed access to one cached color.
    pub fn color(&self, field: ColorField) -> Color {
        self.inner.snapshot.borrow().get(field)
    }

    /// Register a listener invoked after each observable color change.
    pub fn add_listener(&self, callback: impl Fn(&ResolvedPalette) + 'static) -> ListenerId {
        self.inner.listeners.add(callback)
    }

    /// Remove a listener. Returns whether the id was still registered.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.remove(id)
    }

    /// A handle to the cache's own listener set.
    pub fn listeners(&self) -> ListenerSet {
        self.inner.listeners.clone()
    }
}

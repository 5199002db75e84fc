//! Observable source and listener registry.
//!
//! A [`Source`] is the notification half of every Arbor data source. It keeps
//! an ordered registry of *weak* listener handles and dispatches change
//! notifications to whichever listeners are still alive. A source never keeps
//! a listener alive: once the last strong reference to a listener is dropped,
//! its entry is pruned the next time the registry is touched.
//!
//! # Key Types
//!
//! - [`Listener`] - Trait implemented by anything that observes a source
//! - [`Notification`] - The four events a source can emit
//! - [`ListenerId`] - Identifier returned when a listener is registered
//!
//! # Ordering
//!
//! Notifications are delivered synchronously, in registration order, before
//! [`Source::notify`] returns. The registry lock is released before any
//! listener runs, so a listener may add or remove listeners (or mutate the
//! source it observes) from inside a handler.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use arbor_core::{Listener, Notification, Source};
//! use parking_lot::Mutex;
//!
//! #[derive(Default)]
//! struct Log(Mutex<Vec<String>>);
//!
//! impl Listener<u32> for Log {
//!     fn change(&self, item: &u32) {
//!         self.0.lock().push(format!("change {item}"));
//!     }
//! }
//!
//! let source = Source::<u32>::new();
//! let log = Arc::new(Log::default());
//! source.add_listener(&log);
//!
//! source.notify(Notification::Change { item: &7 });
//! assert_eq!(*log.0.lock(), vec!["change 7".to_string()]);
//!
//! drop(log);
//! source.notify(Notification::Change { item: &8 });
//! assert_eq!(source.listener_count(), 0);
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Identifier of a registered listener.
    ///
    /// Returned by [`Source::add_listener`]; can be used with
    /// [`Source::remove_listener_id`].
    pub struct ListenerId;
}

/// An observer of a [`Source`].
///
/// Every method has an empty default body, so a listener implements only the
/// events it cares about. A listener that ignores an event is not an error.
///
/// `parent` is `None` for flat sources and for root-level items of a tree.
pub trait Listener<I>: Send + Sync {
    /// An existing item changed one of its values.
    fn change(&self, item: &I) {
        let _ = item;
    }

    /// `item` was inserted at `index` under `parent`.
    fn insert(&self, parent: Option<&I>, index: usize, item: &I) {
        let _ = (parent, index, item);
    }

    /// `item` was removed from `index` under `parent`.
    fn remove(&self, parent: Option<&I>, index: usize, item: &I) {
        let _ = (parent, index, item);
    }

    /// Every item was removed.
    fn clear(&self) {}
}

/// An event emitted by a [`Source`].
#[derive(Debug)]
pub enum Notification<'a, I> {
    /// An item changed.
    Change {
        /// The changed item.
        item: &'a I,
    },
    /// An item was inserted.
    Insert {
        /// Parent of the inserted item, if any.
        parent: Option<&'a I>,
        /// Position of the item within its parent.
        index: usize,
        /// The inserted item.
        item: &'a I,
    },
    /// An item was removed.
    Remove {
        /// Parent the item was removed from, if any.
        parent: Option<&'a I>,
        /// Position the item occupied before removal.
        index: usize,
        /// The removed item.
        item: &'a I,
    },
    /// The source was emptied.
    Clear,
}

// Manual impls: the derive would require `I: Clone`.
impl<I> Clone for Notification<'_, I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Notification<'_, I> {}

impl<I> Notification<'_, I> {
    /// The event name, matching the [`Listener`] method it dispatches to.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Change { .. } => "change",
            Self::Insert { .. } => "insert",
            Self::Remove { .. } => "remove",
            Self::Clear => "clear",
        }
    }

    /// Deliver this notification to a single listener.
    pub fn dispatch(&self, listener: &dyn Listener<I>) {
        match *self {
            Self::Change { item } => listener.change(item),
            Self::Insert {
                parent,
                index,
                item,
            } => listener.insert(parent, index, item),
            Self::Remove {
                parent,
                index,
                item,
            } => listener.remove(parent, index, item),
            Self::Clear => listener.clear(),
        }
    }
}

struct ListenerEntry<I> {
    /// Thin address of the listener allocation, used for identity.
    addr: usize,
    handle: Weak<dyn Listener<I>>,
}

struct Registry<I> {
    entries: SlotMap<ListenerId, ListenerEntry<I>>,
    /// Registration order; slot iteration order is not stable across removals.
    order: Vec<ListenerId>,
}

impl<I> Registry<I> {
    fn new() -> Self {
        Self {
            entries: SlotMap::with_key(),
            order: Vec::new(),
        }
    }

    /// Drop every entry whose listener has been deallocated.
    fn prune(&mut self) -> usize {
        let before = self.order.len();
        let entries = &mut self.entries;
        self.order.retain(|id| {
            let alive = entries
                .get(*id)
                .is_some_and(|entry| entry.handle.strong_count() > 0);
            if !alive {
                entries.remove(*id);
            }
            alive
        });
        before - self.order.len()
    }

    fn find(&self, addr: usize) -> Option<ListenerId> {
        self.order
            .iter()
            .copied()
            .find(|id| self.entries.get(*id).is_some_and(|e| e.addr == addr))
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        if self.entries.remove(id).is_some() {
            self.order.retain(|other| *other != id);
            true
        } else {
            false
        }
    }
}

/// A registry of weakly-held listeners with ordered, synchronous dispatch.
///
/// `I` is the item type carried by notifications (for example a shared row
/// handle). The source itself stores no items.
pub struct Source<I> {
    registry: Mutex<Registry<I>>,
    blocked: AtomicBool,
}

impl<I> Default for Source<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> Source<I> {
    /// Create a source with no listeners.
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(Registry::new()),
            blocked: AtomicBool::new(false),
        }
    }

    fn address_of<L>(listener: &Arc<L>) -> usize {
        Arc::as_ptr(listener) as *const () as usize
    }

    /// Register a listener.
    ///
    /// Only a weak handle is kept. Registering a listener that is already
    /// registered is a no-op and returns the existing id.
    pub fn add_listener<L>(&self, listener: &Arc<L>) -> ListenerId
    where
        L: Listener<I> + 'static,
    {
        let addr = Self::address_of(listener);
        let mut registry = self.registry.lock();
        registry.prune();

        if let Some(existing) = registry.find(addr) {
            return existing;
        }

        let weak: Weak<L> = Arc::downgrade(listener);
        let handle: Weak<dyn Listener<I>> = weak;
        let id = registry.entries.insert(ListenerEntry { addr, handle });
        registry.order.push(id);
        tracing::trace!(
            target: "arbor_core::source",
            listener_count = registry.order.len(),
            "listener added"
        );
        id
    }

    /// Unregister a listener.
    ///
    /// Returns `false` if the listener was never registered or has already
    /// been pruned; this is not an error.
    pub fn remove_listener<L>(&self, listener: &Arc<L>) -> bool
    where
        L: Listener<I> + 'static,
    {
        let addr = Self::address_of(listener);
        let mut registry = self.registry.lock();
        registry.prune();
        match registry.find(addr) {
            Some(id) => registry.remove(id),
            None => false,
        }
    }

    /// Unregister a listener by the id returned from [`add_listener`](Self::add_listener).
    pub fn remove_listener_id(&self, id: ListenerId) -> bool {
        self.registry.lock().remove(id)
    }

    /// Remove every listener.
    pub fn clear_listeners(&self) {
        let mut registry = self.registry.lock();
        registry.entries.clear();
        registry.order.clear();
    }

    /// Number of live listeners.
    pub fn listener_count(&self) -> usize {
        let mut registry = self.registry.lock();
        registry.prune();
        registry.order.len()
    }

    /// Strong handles to every live listener, in registration order.
    pub fn listeners(&self) -> Vec<Arc<dyn Listener<I>>> {
        let mut registry = self.registry.lock();
        registry.prune();
        registry
            .order
            .iter()
            .filter_map(|id| registry.entries.get(*id))
            .filter_map(|entry| entry.handle.upgrade())
            .collect()
    }

    /// Suppress (or resume) dispatch.
    ///
    /// While blocked, [`notify`](Self::notify) does nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Whether dispatch is currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Deliver `notification` to every live listener, in registration order.
    ///
    /// Dead listeners are pruned first. The registry lock is not held while
    /// listeners run.
    #[tracing::instrument(
        skip_all,
        target = "arbor_core::source",
        level = "trace",
        fields(event = notification.name())
    )]
    pub fn notify(&self, notification: Notification<'_, I>) {
        if self.is_blocked() {
            tracing::trace!(target: "arbor_core::source", "source blocked, skipping notify");
            return;
        }

        let (live, pruned) = {
            let mut registry = self.registry.lock();
            let pruned = registry.prune();
            let live: Vec<Arc<dyn Listener<I>>> = registry
                .order
                .iter()
                .filter_map(|id| registry.entries.get(*id))
                .filter_map(|entry| entry.handle.upgrade())
                .collect();
            (live, pruned)
        };

        tracing::trace!(
            target: "arbor_core::source",
            listener_count = live.len(),
            pruned,
            "notifying listeners"
        );

        for listener in &live {
            notification.dispatch(listener.as_ref());
        }
    }
}

impl<I> fmt::Debug for Source<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Source")
            .field("listeners", &self.registry.lock().order.len())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

static_assertions::assert_impl_all!(Source<u32>: Send, Sync);
static_assertions::assert_impl_all!(ListenerId: Send, Sync, Copy);

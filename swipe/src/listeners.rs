//! Scoped registration of the document-level mouse listeners.
//!
//! Mouse drags keep tracking after the pointer leaves the card, so mouse-move
//! and mouse-up are listened for globally rather than on the card. A
//! [`ListenerGuard`] registers both listeners when acquired and removes them
//! when dropped, so the listeners are released even when the engine is
//! dropped without an explicit teardown.

#[cfg(test)]
#[path = "listeners_test.rs"]
mod listeners_test;

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Global events the engine listens for while active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GlobalEvent {
    MouseMove,
    MouseUp,
}

/// Handle returned by a registry for one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// A global event target (the document, in a browser host).
pub trait ListenerRegistry: Send + Sync {
    /// Register interest in `event`, returning a handle for later removal.
    fn add_listener(&self, event: GlobalEvent) -> ListenerId;

    /// Remove a previously registered listener. Unknown ids are ignored.
    fn remove_listener(&self, id: ListenerId);
}

/// Owns the engine's global listeners for as long as it lives.
pub struct ListenerGuard {
    registry: Arc<dyn ListenerRegistry>,
    ids: Vec<ListenerId>,
}

impl ListenerGuard {
    /// Register mouse-move and mouse-up on `registry`.
    #[must_use]
    pub fn acquire(registry: Arc<dyn ListenerRegistry>) -> Self {
        let ids = [GlobalEvent::MouseMove, GlobalEvent::MouseUp]
            .into_iter()
            .map(|event| registry.add_listener(event))
            .collect();
        Self { registry, ids }
    }

    /// Handles currently held by this guard.
    #[must_use]
    pub fn ids(&self) -> &[ListenerId] {
        &self.ids
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        for id in self.ids.drain(..) {
            self.registry.remove_listener(id);
        }
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard").field("ids", &self.ids).finish_non_exhaustive()
    }
}

/// In-process registry for hosts without a DOM (terminal front end, tests).
#[derive(Debug, Default)]
pub struct LocalRegistry {
    next_id: AtomicU64,
    live: Mutex<BTreeMap<ListenerId, GlobalEvent>>,
}

impl LocalRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one listener for `event` is registered.
    #[must_use]
    pub fn is_listening(&self, event: GlobalEvent) -> bool {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .any(|e| *e == event)
    }

    /// Number of registered listeners across all events.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.live.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl ListenerRegistry for LocalRegistry {
    fn add_listener(&self, event: GlobalEvent) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, event);
        id
    }

    fn remove_listener(&self, id: ListenerId) {
        self.live
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}

//! Typed property-change broadcast.
//!
//! A `ChangeHub` holds the listeners registered on one node and fires
//! them synchronously with the name of the property that changed.
//! Single-threaded and run-to-completion: a notification finishes
//! dispatching before the mutating call returns.

use rustc_hash::FxHashMap;
use uuid::Uuid;

/// Handle returned by [`ChangeHub::subscribe`]; needed to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(Uuid);

pub type ChangeCallback = Box<dyn FnMut(&str)>;

/// Listener registry for one node.
///
/// Callbacks are dispatched in subscription order; storage is keyed by
/// id so unsubscription stays O(1).
#[derive(Default)]
pub struct ChangeHub {
    listeners: FxHashMap<ListenerId, ChangeCallback>,
    order: Vec<ListenerId>,
}

impl ChangeHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, callback: ChangeCallback) -> ListenerId {
        let id = ListenerId(Uuid::new_v4());
        self.listeners.insert(id, callback);
        self.order.push(id);
        id
    }

    /// Returns `false` if the id was already removed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        if self.listeners.remove(&id).is_some() {
            self.order.retain(|other| *other != id);
            true
        } else {
            false
        }
    }

    /// Fire every listener with the changed property name.
    pub fn notify(&mut self, property: &str) {
        for id in &self.order {
            if let Some(callback) = self.listeners.get_mut(id) {
                callback(property);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
        self.order.clear();
    }
}

// ===================================================================
// Tests
// ===================================================================

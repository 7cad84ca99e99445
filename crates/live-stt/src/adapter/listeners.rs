use crate::adapter::{EventKind, Listener};

use std::{collections::HashMap, rc::Rc};

/// Per-kind listener sets, kept in registration order.
#[derive(Default)]
pub(crate) struct ListenerRegistry {
    listeners: HashMap<EventKind, Vec<Listener>>,
}

fn same_listener(a: &Listener, b: &Listener) -> bool {
    std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b))
}

impl ListenerRegistry {
    /// Returns `false` when the listener was already registered.
    pub(crate) fn add(&mut self, kind: EventKind, listener: &Listener) -> bool {
        let set = self.listeners.entry(kind).or_default();
        if set.iter().any(|existing| same_listener(existing, listener)) {
            return false;
        }
        set.push(Rc::clone(listener));
        true
    }

    /// Returns `false` when the listener was not registered.
    pub(crate) fn remove(&mut self, kind: EventKind, listener: &Listener) -> bool {
        let Some(set) = self.listeners.get_mut(&kind) else {
            return false;
        };
        let before = set.len();
        set.retain(|existing| !same_listener(existing, listener));
        set.len() != before
    }

    pub(crate) fn contains(&self, kind: EventKind, listener: &Listener) -> bool {
        self.listeners
            .get(&kind)
            .is_some_and(|set| set.iter().any(|existing| same_listener(existing, listener)))
    }

    pub(crate) fn clear(&mut self, kind: Option<EventKind>) {
        match kind {
            Some(kind) => {
                self.listeners.remove(&kind);
            }
            None => self.listeners.clear(),
        }
    }

    pub(crate) fn len(&self, kind: EventKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }

    /// Copy of the current listeners, so delivery can proceed while the
    /// registry is modified by the listeners themselves.
    pub(crate) fn snapshot(&self, kind: EventKind) -> Vec<Listener> {
        self.listeners.get(&kind).cloned().unwrap_or_default()
    }
}

use crate::{
    adapter::{ListenerRegistry, Session, SttEvent},
    engine::EngineNotification,
};

use std::{
    cell::{Cell, RefCell},
    panic::{self, AssertUnwindSafe},
};

use tracing::{error, trace};

/// State reachable from both the adapter and its engine sink.
#[derive(Default)]
pub(crate) struct Shared {
    pub(crate) session: RefCell<Session>,
    pub(crate) listeners: RefCell<ListenerRegistry>,
    detached: Cell<bool>,
}

impl Shared {
    pub(crate) fn handle(&self, notification: EngineNotification) {
        if self.detached.get() {
            trace!(?notification, "Adapter disposed, notification dropped");
            return;
        }

        let emissions = self.session.borrow_mut().apply(notification);
        for emission in &emissions {
            if self.detached.get() {
                break;
            }
            self.emit(&emission.as_event());
        }
    }

    /// Deliver `event` to every listener of its kind. A panicking listener
    /// is logged and does not stop delivery to the rest. Listeners removed
    /// by an earlier listener of the same emission are skipped, and delivery
    /// ends if an earlier listener disposed the adapter.
    pub(crate) fn emit(&self, event: &SttEvent<'_>) {
        let kind = event.kind();
        let was_detached = self.detached.get();
        let listeners = self.listeners.borrow().snapshot(kind);

        for listener in listeners {
            if !was_detached && self.detached.get() {
                trace!(event = kind.name(), "Adapter disposed mid-emission");
                break;
            }
            if !self.listeners.borrow().contains(kind, &listener) {
                continue;
            }
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener(event)));
            if outcome.is_err() {
                error!(event = kind.name(), "Listener panicked, continuing delivery");
            }
        }
    }

    pub(crate) fn is_detached(&self) -> bool {
        self.detached.get()
    }

    /// Stop accepting notifications and forget all listeners.
    pub(crate) fn detach(&self) {
        self.detached.set(true);
        self.listeners.borrow_mut().clear(None);
        self.session.borrow_mut().halt();
    }
}

use crate::{adapter::Shared, engine::EngineNotification};

use std::rc::Weak;

use tracing::trace;

/// Handle an engine uses to report raw notifications to its adapter.
///
/// The sink does not keep the adapter alive. Notifications sent after the
/// adapter was dropped or disposed are discarded.
#[derive(Clone)]
pub struct EngineSink {
    shared: Weak<Shared>,
}

impl EngineSink {
    pub(crate) fn new(shared: Weak<Shared>) -> Self {
        Self { shared }
    }

    /// Deliver one notification. Notifications are processed in call order.
    pub fn notify(&self, notification: EngineNotification) {
        match self.shared.upgrade() {
            Some(shared) => shared.handle(notification),
            None => trace!(?notification, "Adapter gone, notification dropped"),
        }
    }
}

impl std::fmt::Debug for EngineSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EngineSink")
            .field("attached", &(self.shared.strong_count() > 0))
            .finish()
    }
}

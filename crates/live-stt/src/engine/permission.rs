use std::error::Error;

use futures::future::LocalBoxFuture;

/// Microphone authorization as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionState {
    /// Access was granted earlier.
    Granted,
    /// The user will be asked when recognition starts.
    Prompt,
    /// Access was explicitly refused.
    Denied,
}

/// Optional host service that reports microphone authorization.
pub trait PermissionQuery {
    /// Ask for the current microphone permission.
    fn microphone(&self) -> LocalBoxFuture<'_, Result<PermissionState, Box<dyn Error>>>;
}

use crate::SttError;

const NOT_ALLOWED: &str = "not-allowed";
const PERMISSION_DENIED: &str = "permission-denied";

/// Map a raw engine error identifier onto an [`SttError`].
///
/// Access refusals become [`SttError::PermissionDenied`]; every other
/// identifier becomes [`SttError::GeneralError`] carrying the identifier
/// as its message.
#[track_caller]
pub fn classify(raw: &str) -> SttError {
    match raw {
        NOT_ALLOWED | PERMISSION_DENIED => SttError::permission_denied(raw),
        other => SttError::general(other),
    }
}

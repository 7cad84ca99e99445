mod classify;

pub use classify::classify;

use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// Closed set of failure kinds surfaced by the adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    /// No recognition capability is available, or the adapter was disposed.
    SpeechNotSupported,
    /// Microphone access was refused.
    PermissionDenied,
    /// Any other engine failure.
    GeneralError,
    /// `start()` was called while a session is running or starting.
    AlreadyActive,
}

impl ErrorKind {
    /// Stable code string for this kind.
    pub fn code(self) -> &'static str {
        match self {
            ErrorKind::SpeechNotSupported => "SPEECH_NOT_SUPPORTED",
            ErrorKind::PermissionDenied => "PERMISSION_DENIED",
            ErrorKind::GeneralError => "GENERAL_ERROR",
            ErrorKind::AlreadyActive => "ALREADY_ACTIVE",
        }
    }
}

/// Speech recognition errors with source location tracking.
#[derive(Error, Debug)]
pub enum SttError {
    /// The host has no recognition capability.
    #[error("Speech recognition not supported {location}")]
    SpeechNotSupported {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Microphone access was refused by the user or the platform.
    #[error("Permission denied: {message} {location}")]
    PermissionDenied {
        /// Human-readable reason.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Recognition failed for any other reason.
    #[error("Recognition error: {message} {location}")]
    GeneralError {
        /// Raw engine identifier or failure description.
        message: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A session is already running or waiting on its permission check.
    #[error("Recognition already active {location}")]
    AlreadyActive {
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl SttError {
    #[track_caller]
    pub(crate) fn not_supported() -> Self {
        SttError::SpeechNotSupported {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn permission_denied(message: impl Into<String>) -> Self {
        SttError::PermissionDenied {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn general(message: impl Into<String>) -> Self {
        SttError::GeneralError {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub(crate) fn already_active() -> Self {
        SttError::AlreadyActive {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// The kind of failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SttError::SpeechNotSupported { .. } => ErrorKind::SpeechNotSupported,
            SttError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            SttError::GeneralError { .. } => ErrorKind::GeneralError,
            SttError::AlreadyActive { .. } => ErrorKind::AlreadyActive,
        }
    }

    /// Human-readable message, without the location suffix.
    pub fn message(&self) -> &str {
        match self {
            SttError::SpeechNotSupported { .. } => "Speech recognition not supported",
            SttError::PermissionDenied { message, .. } => message,
            SttError::GeneralError { message, .. } => message,
            SttError::AlreadyActive { .. } => "Speech recognition already active",
        }
    }
}

/// Errors raised while loading or saving [`StartOptions`](crate::StartOptions).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No platform configuration directory could be resolved.
    #[error("Failed to get config directory {location}")]
    NoConfigDir {
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The options file could not be read.
    #[error("Failed to read {path:?}: {source} {location}")]
    Read {
        /// File that was being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The options file is not valid TOML for [`StartOptions`](crate::StartOptions).
    #[error("Failed to parse options: {reason} {location}")]
    Parse {
        /// Parser message.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The options could not be serialized.
    #[error("Failed to serialize options: {reason} {location}")]
    Serialize {
        /// Serializer message.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Writing the options file failed.
    #[error("Failed to write {path:?}: {source} {location}")]
    Write {
        /// File that was being written.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

/// Result type alias using [`SttError`].
pub type Result<T> = std::result::Result<T, SttError>;

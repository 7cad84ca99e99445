//! Live STT
//!
//! Event-driven adapter around a platform's live speech recognition
//! capability. The platform engine plugs in through [`RecognitionEngine`];
//! callers drive the session with `start`/`stop`/`abort`/`dispose` and
//! subscribe to [`SttEvent`]s.
//!
//! # Example
//!
//! ```no_run
//! use live_stt::{EventKind, SpeechToText, StartOptions, SttEvent};
//!
//! async fn listen(stt: &SpeechToText) -> live_stt::Result<()> {
//!     stt.on(EventKind::Result, |event| {
//!         if let SttEvent::Result(text) = event {
//!             println!("Final: {}", text);
//!         }
//!     });
//!     stt.on(EventKind::PartialResult, |event| {
//!         if let SttEvent::PartialResult(text) = event {
//!             println!("Hearing: {}", text);
//!         }
//!     });
//!
//!     stt.start(StartOptions::default().with_lang("en-GB")).await
//! }
//! ```

mod adapter;
mod config;
mod engine;
mod error;

pub use {
    adapter::{EventKind, Listener, SpeechToText, SttEvent},
    config::StartOptions,
    engine::{
        EngineFactory, EngineNotification, EngineSink, PermissionQuery, PermissionState,
        RecognitionEngine, RecognitionSegment, ResultBatch,
    },
    error::{ConfigError, ErrorKind, Result, SttError, classify},
};

//! The seam between the adapter and the platform recognition capability.

mod notification;
mod permission;
mod sink;

pub use {
    notification::{EngineNotification, RecognitionSegment, ResultBatch},
    permission::{PermissionQuery, PermissionState},
    sink::EngineSink,
};

use crate::StartOptions;

use std::error::Error;

/// Control surface of a live speech recognition engine.
///
/// Engines report progress asynchronously by calling
/// [`EngineSink::notify`] on the sink handed to [`bind`](Self::bind).
pub trait RecognitionEngine {
    /// Attach the sink that receives raw notifications. Called once, right
    /// after the engine is created.
    fn bind(&mut self, sink: EngineSink);

    /// Apply language and mode settings for the next session.
    fn configure(&mut self, options: &StartOptions);

    /// Begin listening.
    ///
    /// An [`SttError`](crate::SttError) returned here is passed through
    /// unchanged; any other error is reported as a general error.
    fn start(&mut self) -> Result<(), Box<dyn Error>>;

    /// Stop after the current utterance.
    fn stop(&mut self);

    /// Stop immediately and discard in-flight recognition.
    fn abort(&mut self);
}

/// Resolves the platform recognition capability, if the host has one.
pub trait EngineFactory {
    /// Create an engine, or `None` when recognition is unavailable.
    fn create(&self) -> Option<Box<dyn RecognitionEngine>>;
}

impl<F> EngineFactory for F
where
    F: Fn() -> Option<Box<dyn RecognitionEngine>>,
{
    fn create(&self) -> Option<Box<dyn RecognitionEngine>> {
        self()
    }
}

//! Session state and translation of raw engine notifications.

use crate::{
    SttError,
    adapter::SttEvent,
    classify,
    engine::{EngineNotification, ResultBatch},
};

use tracing::debug;

/// An event produced by a notification, owning its payload until it has
/// been delivered.
#[derive(Debug)]
pub(crate) enum Emission {
    Start,
    End,
    Result(String),
    PartialResult(String),
    Error(SttError),
}

impl Emission {
    pub(crate) fn as_event(&self) -> SttEvent<'_> {
        match self {
            Emission::Start => SttEvent::Start,
            Emission::End => SttEvent::End,
            Emission::Result(text) => SttEvent::Result(text),
            Emission::PartialResult(text) => SttEvent::PartialResult(text),
            Emission::Error(error) => SttEvent::Error(error),
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Session {
    recognizing: bool,
    /// Set from `start()` until the engine ends or refuses to start.
    requested: bool,
    final_transcript: String,
}

impl Session {
    pub(crate) fn recognizing(&self) -> bool {
        self.recognizing
    }

    /// Recognizing, or asked to start and not yet ended.
    pub(crate) fn active(&self) -> bool {
        self.recognizing || self.requested
    }

    pub(crate) fn final_transcript(&self) -> &str {
        &self.final_transcript
    }

    /// Called once per `start()`, right before the engine is started.
    pub(crate) fn begin(&mut self) {
        self.requested = true;
        self.final_transcript.clear();
    }

    /// The engine refused to start.
    pub(crate) fn abandon(&mut self) {
        self.requested = false;
    }

    pub(crate) fn halt(&mut self) {
        self.recognizing = false;
        self.requested = false;
    }

    pub(crate) fn apply(&mut self, notification: EngineNotification) -> Vec<Emission> {
        match notification {
            EngineNotification::Start => {
                self.recognizing = true;
                debug!("Engine started");
                vec![Emission::Start]
            }
            EngineNotification::End => {
                self.halt();
                debug!("Engine ended");
                vec![Emission::End]
            }
            EngineNotification::Error(raw) => {
                let error = classify(&raw);
                debug!(raw = %raw, kind = ?error.kind(), "Engine error classified");
                vec![Emission::Error(error)]
            }
            EngineNotification::Results(batch) => self.accumulate(&batch),
        }
    }

    /// Final segments extend the session transcript and each produces a
    /// `result`; interim segments are joined into at most one
    /// `partialResult` for this batch.
    fn accumulate(&mut self, batch: &ResultBatch) -> Vec<Emission> {
        let mut emissions = Vec::new();
        let mut interim = String::new();

        for segment in batch.fresh() {
            if segment.is_final {
                self.final_transcript.push_str(&segment.transcript);
                emissions.push(Emission::Result(self.final_transcript.trim().to_string()));
            } else {
                interim.push_str(&segment.transcript);
            }
        }

        let interim = interim.trim();
        if !interim.is_empty() {
            emissions.push(Emission::PartialResult(interim.to_string()));
        }

        debug!(
            result_index = batch.result_index,
            total = batch.results.len(),
            emitted = emissions.len(),
            "Result batch translated"
        );

        emissions
    }
}

/// Raw notification delivered by an engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineNotification {
    /// The engine started capturing.
    Start,
    /// The engine stopped, gracefully or after an abort.
    End,
    /// The engine failed; carries the platform's raw error identifier.
    Error(String),
    /// New recognition results are available.
    Results(ResultBatch),
}

/// One recognized stretch of speech.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionSegment {
    /// Best transcript for this segment.
    pub transcript: String,
    /// Whether the engine considers the segment settled.
    pub is_final: bool,
}

impl RecognitionSegment {
    /// A settled segment.
    pub fn final_text(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: true,
        }
    }

    /// A provisional segment that may still be revised.
    pub fn interim(transcript: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            is_final: false,
        }
    }
}

/// The engine's running result list plus the index of the first entry
/// that has not been reported before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultBatch {
    /// Entries before this index were handled by an earlier notification.
    pub result_index: usize,
    /// All results of the session so far, oldest first.
    pub results: Vec<RecognitionSegment>,
}

impl ResultBatch {
    /// Build a batch resuming at `result_index`.
    pub fn new(result_index: usize, results: Vec<RecognitionSegment>) -> Self {
        Self {
            result_index,
            results,
        }
    }

    /// Segments not seen by any earlier notification.
    pub fn fresh(&self) -> &[RecognitionSegment] {
        self.results.get(self.result_index..).unwrap_or_default()
    }
}

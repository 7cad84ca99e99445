//! Test doubles for the engine and permission seams.

use crate::{
    EngineNotification, EngineSink, ErrorKind, EventKind, PermissionQuery, PermissionState,
    RecognitionEngine, RecognitionSegment, ResultBatch, SpeechToText, StartOptions, SttEvent,
};

use std::{
    cell::{Cell, RefCell},
    error::Error,
    rc::Rc,
};

use futures::future::LocalBoxFuture;
use tokio::sync::oneshot;

/// Owned copy of an emitted event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Seen {
    Start,
    End,
    Result(String),
    PartialResult(String),
    Error(ErrorKind, String),
}

impl From<&SttEvent<'_>> for Seen {
    fn from(event: &SttEvent<'_>) -> Self {
        match event {
            SttEvent::Start => Seen::Start,
            SttEvent::End => Seen::End,
            SttEvent::Result(text) => Seen::Result(text.to_string()),
            SttEvent::PartialResult(text) => Seen::PartialResult(text.to_string()),
            SttEvent::Error(error) => Seen::Error(error.kind(), error.message().to_string()),
        }
    }
}

/// What the fake engine was asked to do.
#[derive(Default)]
pub(crate) struct EngineLog {
    pub(crate) sink: Option<EngineSink>,
    pub(crate) configured: Vec<StartOptions>,
    pub(crate) starts: usize,
    pub(crate) stops: usize,
    pub(crate) aborts: usize,
    pub(crate) released: bool,
    pub(crate) start_failure: Option<Box<dyn Fn() -> Box<dyn Error>>>,
    /// Report `Start` from inside `start()`, like engines that confirm
    /// synchronously.
    pub(crate) confirm_synchronously: bool,
}

pub(crate) struct FakeEngine {
    log: Rc<RefCell<EngineLog>>,
}

impl RecognitionEngine for FakeEngine {
    fn bind(&mut self, sink: EngineSink) {
        self.log.borrow_mut().sink = Some(sink);
    }

    fn configure(&mut self, options: &StartOptions) {
        self.log.borrow_mut().configured.push(options.clone());
    }

    fn start(&mut self) -> Result<(), Box<dyn Error>> {
        let confirm = {
            let mut log = self.log.borrow_mut();
            log.starts += 1;
            if let Some(make_error) = &log.start_failure {
                return Err(make_error());
            }
            log.confirm_synchronously
        };
        if confirm {
            notify(&self.log, EngineNotification::Start);
        }
        Ok(())
    }

    fn stop(&mut self) {
        self.log.borrow_mut().stops += 1;
    }

    fn abort(&mut self) {
        self.log.borrow_mut().aborts += 1;
    }
}

impl Drop for FakeEngine {
    fn drop(&mut self) {
        self.log.borrow_mut().released = true;
    }
}

/// Send a raw notification the way a platform engine would.
pub(crate) fn notify(engine: &Rc<RefCell<EngineLog>>, notification: EngineNotification) {
    let sink = engine.borrow().sink.clone();
    if let Some(sink) = sink {
        sink.notify(notification);
    }
}

pub(crate) fn results(result_index: usize, results: Vec<RecognitionSegment>) -> EngineNotification {
    EngineNotification::Results(ResultBatch::new(result_index, results))
}

pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Adapter backed by a [`FakeEngine`], plus the engine's log.
pub(crate) fn fake_adapter() -> (SpeechToText, Rc<RefCell<EngineLog>>) {
    init_tracing();
    let log = Rc::new(RefCell::new(EngineLog::default()));
    let engine = FakeEngine {
        log: Rc::clone(&log),
    };
    (SpeechToText::from_engine(Box::new(engine)), log)
}

/// Record every event of every kind, in delivery order.
pub(crate) fn record_all(stt: &SpeechToText) -> Rc<RefCell<Vec<Seen>>> {
    let seen = Rc::new(RefCell::new(Vec::new()));
    for kind in EventKind::ALL {
        let seen = Rc::clone(&seen);
        stt.on(kind, move |event| seen.borrow_mut().push(Seen::from(event)));
    }
    seen
}

/// Permission service answering immediately with a fixed state.
pub(crate) struct FixedPermissions {
    pub(crate) answer: Result<PermissionState, String>,
    pub(crate) queries: Rc<Cell<usize>>,
}

impl PermissionQuery for FixedPermissions {
    fn microphone(&self) -> LocalBoxFuture<'_, Result<PermissionState, Box<dyn Error>>> {
        self.queries.set(self.queries.get() + 1);
        let answer = self.answer.clone().map_err(Box::<dyn Error>::from);
        Box::pin(async move { answer })
    }
}

/// Permission service that answers once the test releases the gate.
pub(crate) struct GatedPermissions {
    pub(crate) gate: RefCell<Option<oneshot::Receiver<PermissionState>>>,
}

impl PermissionQuery for GatedPermissions {
    fn microphone(&self) -> LocalBoxFuture<'_, Result<PermissionState, Box<dyn Error>>> {
        let gate = self.gate.borrow_mut().take();
        Box::pin(async move {
            match gate {
                Some(gate) => gate.await.map_err(|e| Box::new(e) as Box<dyn Error>),
                None => Ok(PermissionState::Granted),
            }
        })
    }
}

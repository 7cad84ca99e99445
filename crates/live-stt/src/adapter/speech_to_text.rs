//! Lifecycle facade over a platform recognition engine.

use crate::{
    Result, StartOptions, SttError,
    adapter::{EventKind, Listener, Shared, SttEvent},
    engine::{EngineFactory, EngineSink, PermissionQuery, PermissionState, RecognitionEngine},
};

use std::{
    cell::{Cell, RefCell},
    error::Error,
    rc::Rc,
};

use tracing::{debug, info, instrument, warn};

/// Live speech-to-text adapter.
///
/// Wraps one engine instance, accumulates the final transcript of the
/// current session, and fans engine notifications out to listeners as
/// [`SttEvent`]s.
///
/// # Thread Safety
///
/// SpeechToText is `!Send`. Engine notifications and caller requests are
/// expected on the same thread, in the order the engine produced them.
pub struct SpeechToText {
    shared: Rc<Shared>,
    engine: RefCell<Option<Box<dyn RecognitionEngine>>>,
    permissions: Option<Box<dyn PermissionQuery>>,
    has_engine: bool,
    starting: Cell<bool>,
}

/// Marks a `start()` as pending while it waits on the permission query.
/// Cleared on drop so a cancelled start does not block later ones.
struct PendingStart<'a>(&'a Cell<bool>);

impl<'a> PendingStart<'a> {
    fn enter(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for PendingStart<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl SpeechToText {
    /// Creates an adapter around the engine produced by `factory`.
    ///
    /// Never fails. When the factory yields no engine the adapter is
    /// unsupported and every `start()` reports
    /// [`SttError::SpeechNotSupported`].
    #[instrument(skip(factory))]
    pub fn new(factory: impl EngineFactory) -> Self {
        Self::attach(factory.create())
    }

    /// Creates an adapter around an existing engine.
    pub fn from_engine(engine: Box<dyn RecognitionEngine>) -> Self {
        Self::attach(Some(engine))
    }

    /// Creates an adapter with no engine.
    pub fn unsupported() -> Self {
        Self::attach(None)
    }

    fn attach(engine: Option<Box<dyn RecognitionEngine>>) -> Self {
        let shared = Rc::new(Shared::default());

        let engine = engine.map(|mut engine| {
            engine.bind(EngineSink::new(Rc::downgrade(&shared)));
            engine
        });

        let has_engine = engine.is_some();
        if has_engine {
            info!("SpeechToText initialized");
        } else {
            warn!("No recognition capability, SpeechToText is unsupported");
        }

        Self {
            shared,
            engine: RefCell::new(engine),
            permissions: None,
            has_engine,
            starting: Cell::new(false),
        }
    }

    /// Consult `query` for microphone permission before each start.
    pub fn with_permission_query(mut self, query: impl PermissionQuery + 'static) -> Self {
        self.permissions = Some(Box::new(query));
        self
    }

    /// Whether an engine is attached and the adapter was not disposed.
    pub fn is_supported(&self) -> bool {
        self.has_engine && !self.shared.is_detached()
    }

    /// Register `listener` for `kind`. Adding the same listener twice has no
    /// further effect.
    pub fn add_listener(&self, kind: EventKind, listener: &Listener) {
        if self.shared.listeners.borrow_mut().add(kind, listener) {
            debug!(event = kind.name(), "Listener added");
        }
    }

    /// Register a closure for `kind` and return its handle for removal.
    pub fn on(&self, kind: EventKind, callback: impl Fn(&SttEvent<'_>) + 'static) -> Listener {
        let listener: Listener = Rc::new(callback);
        self.add_listener(kind, &listener);
        listener
    }

    /// Unregister `listener` from `kind`. Unknown listeners are ignored.
    pub fn remove_listener(&self, kind: EventKind, listener: &Listener) {
        if self.shared.listeners.borrow_mut().remove(kind, listener) {
            debug!(event = kind.name(), "Listener removed");
        }
    }

    /// Drop every listener of `kind`, or of all kinds when `None`.
    pub fn remove_all_listeners(&self, kind: Option<EventKind>) {
        self.shared.listeners.borrow_mut().clear(kind);
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.shared.listeners.borrow().len(kind)
    }

    /// Begin a recognition session.
    ///
    /// Checks microphone permission when a query is attached, pushes
    /// `options` to the engine, clears the final transcript and starts the
    /// engine. Returns once the engine was asked to start; the `start` event
    /// follows when the engine confirms.
    ///
    /// # Errors
    ///
    /// Every failure is emitted as an `error` event and also returned:
    /// - [`SttError::SpeechNotSupported`] without an engine or after
    ///   [`dispose`](Self::dispose).
    /// - [`SttError::AlreadyActive`] while a session is requested or
    ///   running, or while another start waits on its permission check.
    /// - [`SttError::PermissionDenied`] when microphone access is denied.
    /// - [`SttError::GeneralError`] when the engine refuses to start.
    #[instrument(skip(self, options), fields(lang = %options.lang))]
    pub async fn start(&self, options: StartOptions) -> Result<()> {
        if !self.is_supported() {
            return Err(self.fail(SttError::not_supported()));
        }

        if self.starting.get() || self.shared.session.borrow().active() {
            return Err(self.fail(SttError::already_active()));
        }

        if let Some(query) = &self.permissions {
            let _pending = PendingStart::enter(&self.starting);
            match query.microphone().await {
                Ok(PermissionState::Denied) => {
                    return Err(self.fail(SttError::permission_denied(
                        "Microphone permission denied",
                    )));
                }
                Ok(state) => debug!(?state, "Microphone permission checked"),
                Err(e) => warn!(error = %e, "Permission query failed, starting anyway"),
            }
        }

        // The adapter may have been disposed while the query was pending.
        if self.shared.is_detached() {
            return Err(self.fail(SttError::not_supported()));
        }

        let outcome = match self.engine.borrow_mut().as_mut() {
            Some(engine) => {
                engine.configure(&options);
                debug!(
                    continuous = options.continuous,
                    interim_results = options.interim_results,
                    "Engine configured"
                );
                self.shared.session.borrow_mut().begin();
                Some(engine.start())
            }
            None => None,
        };

        match outcome {
            Some(Ok(())) => {
                info!("Recognition requested");
                Ok(())
            }
            Some(Err(source)) => {
                self.shared.session.borrow_mut().abandon();
                Err(self.fail(normalize(source)))
            }
            None => Err(self.fail(SttError::not_supported())),
        }
    }

    /// Ask the engine to finish after the current utterance.
    #[instrument(skip(self))]
    pub fn stop(&self) {
        self.request("stop", |engine| engine.stop());
    }

    /// Ask the engine to stop immediately, discarding pending results.
    #[instrument(skip(self))]
    pub fn abort(&self) {
        self.request("abort", |engine| engine.abort());
    }

    /// `true` between the engine's start and end notifications.
    pub fn is_recognizing(&self) -> bool {
        self.shared.session.borrow().recognizing()
    }

    /// Final transcript of the current session, trimmed.
    pub fn final_transcript(&self) -> String {
        self.shared.session.borrow().final_transcript().trim().to_string()
    }

    /// Stop recognition, drop all listeners and release the engine.
    ///
    /// The adapter is unsupported afterwards. Calling this twice is a no-op.
    #[instrument(skip(self))]
    pub fn dispose(&self) {
        if self.shared.is_detached() {
            debug!("Already disposed");
            return;
        }

        self.stop();
        self.shared.detach();

        match self.engine.try_borrow_mut() {
            Ok(mut slot) => drop(slot.take()),
            Err(_) => warn!("Engine busy, it will be released with the adapter"),
        }

        info!("SpeechToText disposed");
    }

    fn request(&self, action: &'static str, op: impl FnOnce(&mut Box<dyn RecognitionEngine>)) {
        match self.engine.try_borrow_mut() {
            Ok(mut slot) => match slot.as_mut() {
                Some(engine) => op(engine),
                None => debug!(action, "No engine, request ignored"),
            },
            Err(_) => warn!(action, "Engine busy, request skipped"),
        }
    }

    /// Report `error` to listeners, then hand it back for the caller.
    fn fail(&self, error: SttError) -> SttError {
        warn!(kind = ?error.kind(), reason = error.message(), "Start failed");
        self.shared.emit(&SttEvent::Error(&error));
        error
    }
}

fn normalize(source: Box<dyn Error>) -> SttError {
    match source.downcast::<SttError>() {
        Ok(error) => *error,
        Err(other) => SttError::general(other.to_string()),
    }
}

impl std::fmt::Debug for SpeechToText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechToText")
            .field("supported", &self.is_supported())
            .field("recognizing", &self.is_recognizing())
            .field("permission_query", &self.permissions.is_some())
            .finish()
    }
}

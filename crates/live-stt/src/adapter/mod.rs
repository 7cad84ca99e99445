mod event;
mod listeners;
mod session;
mod shared;
mod speech_to_text;

pub(crate) use {listeners::ListenerRegistry, session::Session, shared::Shared};

pub use {
    event::{EventKind, Listener, SttEvent},
    speech_to_text::SpeechToText,
};

use crate::SttError;

use std::rc::Rc;

/// Event kinds a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Recognition started.
    Start,
    /// Recognition ended.
    End,
    /// A segment became final.
    Result,
    /// Provisional text for the latest notification.
    PartialResult,
    /// Something failed.
    Error,
}

impl EventKind {
    /// Every kind, in declaration order.
    pub const ALL: [EventKind; 5] = [
        EventKind::Start,
        EventKind::End,
        EventKind::Result,
        EventKind::PartialResult,
        EventKind::Error,
    ];

    /// Event name as used in logs.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::End => "end",
            EventKind::Result => "result",
            EventKind::PartialResult => "partialResult",
            EventKind::Error => "error",
        }
    }
}

/// An event delivered to listeners. Payloads are borrowed for the
/// duration of the call.
#[derive(Debug, Clone, Copy)]
pub enum SttEvent<'a> {
    /// Recognition started.
    Start,
    /// Recognition ended.
    End,
    /// Cumulative final transcript of the session, trimmed.
    Result(&'a str),
    /// Interim text of the latest notification, trimmed.
    PartialResult(&'a str),
    /// Classified failure.
    Error(&'a SttError),
}

impl SttEvent<'_> {
    /// The kind listeners subscribe to for this event.
    pub fn kind(&self) -> EventKind {
        match self {
            SttEvent::Start => EventKind::Start,
            SttEvent::End => EventKind::End,
            SttEvent::Result(_) => EventKind::Result,
            SttEvent::PartialResult(_) => EventKind::PartialResult,
            SttEvent::Error(_) => EventKind::Error,
        }
    }
}

/// A registered callback. Identity is the allocation, so keep the handle
/// around to remove the listener later.
pub type Listener = Rc<dyn Fn(&SttEvent<'_>)>;

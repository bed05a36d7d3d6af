//! Raw input events and source notifications

use crate::control::Control;
use thiserror::Error;

/// Class of change notification a control emits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Fired on every value change (e.g. each drag step)
    Input,
    /// Fired when a value change is committed (e.g. mouse release)
    Change,
}

impl EventKind {
    /// DOM-style event name
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Input => "input",
            EventKind::Change => "change",
        }
    }
}

/// Error delivered by an event source
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SourceError {
    #[error("control '{id}' failed: {reason}")]
    Failed { id: String, reason: String },
}

/// One change notification from a control
///
/// Carries its target and the target's value at the moment it fired.
#[derive(Debug, Clone)]
pub struct RawEvent {
    kind: EventKind,
    target: Control,
    value: String,
}

impl RawEvent {
    pub(crate) fn new(kind: EventKind, target: Control, value: String) -> Self {
        Self { kind, target, value }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Control that fired this event
    pub fn target(&self) -> &Control {
        &self.target
    }

    /// Target value when the event fired
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// Signal delivered by a source: a value, an error, or completion
///
/// `Error` and `Complete` are terminal; nothing follows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification<T> {
    Next(T),
    Error(SourceError),
    Complete,
}

impl<T> Notification<T> {
    /// Transform the carried value, passing terminal notifications through
    pub fn map<U, F>(self, f: F) -> Notification<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Notification::Next(value) => Notification::Next(f(value)),
            Notification::Error(err) => Notification::Error(err),
            Notification::Complete => Notification::Complete,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Notification::Next(_))
    }
}

//! Event source over a control's notifications

use crate::control::Control;
use crate::event::{EventKind, Notification, RawEvent};
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;

/// Stream of raw events from one control
///
/// Ends when the control is dropped. A stream built without a control
/// never yields and never ends.
pub struct EventStream {
    rx: Option<mpsc::UnboundedReceiver<Notification<RawEvent>>>,
}

impl EventStream {
    /// Whether this stream is attached to a control
    pub fn is_attached(&self) -> bool {
        self.rx.is_some()
    }
}

/// Observe `kind` notifications from a control
///
/// A missing control yields an inert stream rather than an error.
pub fn from_event(control: Option<&Control>, kind: EventKind) -> EventStream {
    EventStream {
        rx: control.map(|c| c.subscribe(kind)),
    }
}

impl Stream for EventStream {
    type Item = Notification<RawEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.rx.as_mut() {
            Some(rx) => rx.poll_recv(cx),
            None => Poll::Pending,
        }
    }
}

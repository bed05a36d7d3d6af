//! Controls and the document that owns them

use crate::event::{EventKind, Notification, RawEvent, SourceError};
use crate::selector::Selector;
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

type Listener = (EventKind, mpsc::UnboundedSender<Notification<RawEvent>>);

/// Handle to a single input element
///
/// Cheap to clone; all clones refer to the same element.
#[derive(Clone)]
pub struct Control {
    inner: Arc<ControlInner>,
}

struct ControlInner {
    tag: String,
    id: String,
    value: RwLock<String>,
    listeners: Mutex<Vec<Listener>>,
}

impl Control {
    /// Create a detached control
    pub fn new(tag: &str, id: &str, value: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(ControlInner {
                tag: tag.to_ascii_lowercase(),
                id: id.to_string(),
                value: RwLock::new(value.into()),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    pub fn tag(&self) -> &str {
        &self.inner.tag
    }

    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Current value
    pub fn value(&self) -> String {
        self.inner.value.read().clone()
    }

    /// Set a new value and fire an `input` event
    pub fn set_value(&self, value: impl Into<String>) {
        let value = value.into();
        *self.inner.value.write() = value.clone();
        self.dispatch(EventKind::Input, value);
    }

    /// Fire a `change` event carrying the current value
    pub fn commit(&self) {
        let value = self.value();
        self.dispatch(EventKind::Change, value);
    }

    /// Register a listener for one event kind
    pub fn subscribe(&self, kind: EventKind) -> mpsc::UnboundedReceiver<Notification<RawEvent>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.inner.listeners.lock().push((kind, tx));
        rx
    }

    /// Number of live listeners
    pub fn listener_count(&self) -> usize {
        let mut listeners = self.inner.listeners.lock();
        listeners.retain(|(_, tx)| !tx.is_closed());
        listeners.len()
    }

    /// Deliver an error to every listener and drop them
    pub fn fail(&self, reason: impl Into<String>) {
        let err = SourceError::Failed {
            id: self.inner.id.clone(),
            reason: reason.into(),
        };
        self.terminate(Notification::Error(err));
    }

    /// Deliver completion to every listener and drop them
    pub fn close(&self) {
        self.terminate(Notification::Complete);
    }

    fn dispatch(&self, kind: EventKind, value: String) {
        let mut listeners = self.inner.listeners.lock();
        listeners.retain(|(listening, tx)| {
            if *listening != kind {
                return !tx.is_closed();
            }
            let event = RawEvent::new(kind, self.clone(), value.clone());
            tx.send(Notification::Next(event)).is_ok()
        });
    }

    fn terminate(&self, notification: Notification<RawEvent>) {
        let listeners = std::mem::take(&mut *self.inner.listeners.lock());
        debug!(
            "Terminating {} listener(s) on '{}'",
            listeners.len(),
            self.inner.id
        );
        for (_, tx) in listeners {
            let _ = tx.send(notification.clone());
        }
    }
}

impl fmt::Debug for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Control")
            .field("tag", &self.inner.tag)
            .field("id", &self.inner.id)
            .field("value", &*self.inner.value.read())
            .finish()
    }
}

/// Collection of controls addressable by selector
#[derive(Default)]
pub struct Document {
    controls: RwLock<Vec<Control>>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control to the document
    pub fn insert(&self, tag: &str, id: &str, value: impl Into<String>) -> Control {
        let control = Control::new(tag, id, value);
        self.controls.write().push(control.clone());
        control
    }

    /// First control matching the selector, if any
    pub fn query_selector(&self, selector: &Selector) -> Option<Control> {
        self.controls
            .read()
            .iter()
            .find(|c| selector.matches(c.tag(), c.id()))
            .cloned()
    }

    /// Remove the control with this id, completing its listeners
    pub fn remove(&self, id: &str) -> Option<Control> {
        let removed = {
            let mut controls = self.controls.write();
            let index = controls.iter().position(|c| c.id() == id)?;
            controls.remove(index)
        };
        removed.close();
        Some(removed)
    }

    /// Remove every control
    pub fn teardown(&self) {
        let controls = std::mem::take(&mut *self.controls.write());
        for control in controls {
            control.close();
        }
    }

    pub fn len(&self) -> usize {
        self.controls.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.read().is_empty()
    }
}

//! Debounced value emission for a single control
//!
//! This crate provides:
//! - A trailing-edge debounce operator over notification streams
//! - Output sinks for settled values
//! - `DebouncedEmitter`, which wires a control through
//!   `from_event -> debounce -> map(value) -> sink`

pub mod debounce;
pub mod sink;

pub use debounce::{debounce, DebounceState, Debouncer};
pub use sink::{ConsoleSink, ValueSink};

use futures::StreamExt;
use slider_core::{from_event, Control, EventKind, Notification, RawEvent};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info};

/// Quiet period required before a value settles
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(2000);

/// Emits a control's value once it stops changing
pub struct DebouncedEmitter<K> {
    /// Control to observe (None yields no output)
    control: Option<Control>,

    /// Event class to listen for
    kind: EventKind,

    /// Quiescence window
    window: Duration,

    sink: K,
}

impl<K> DebouncedEmitter<K>
where
    K: ValueSink + Send + 'static,
{
    /// Create an emitter for a resolved (or unresolved) control
    pub fn new(control: Option<Control>, sink: K) -> Self {
        Self {
            control,
            kind: EventKind::Input,
            window: DEFAULT_DEBOUNCE,
            sink,
        }
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn with_event(mut self, kind: EventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Begin observing
    ///
    /// Must be called within a tokio runtime. The pipeline runs until the
    /// source terminates or the returned handle is stopped.
    pub fn start(self) -> EmitterHandle {
        let source = from_event(self.control.as_ref(), self.kind);
        let (stop_tx, stop_rx) = oneshot::channel();

        if let Some(control) = &self.control {
            info!(
                "Debouncing '{}' events from {}#{} (window: {:?})",
                self.kind.as_str(),
                control.tag(),
                control.id(),
                self.window
            );
        }

        let settled = debounce(source, self.window)
            .map(|n| n.map(|event: RawEvent| event.value().to_string()));
        let task = tokio::spawn(run(settled, self.sink, stop_rx));

        EmitterHandle {
            stop_tx: Some(stop_tx),
            task,
        }
    }
}

async fn run<S, K>(settled: S, mut sink: K, mut stop_rx: oneshot::Receiver<()>) -> u64
where
    S: futures::Stream<Item = Notification<String>>,
    K: ValueSink,
{
    let mut settled = std::pin::pin!(settled);
    let mut emitted = 0;
    let mut stoppable = true;

    loop {
        tokio::select! {
            stop = &mut stop_rx, if stoppable => match stop {
                Ok(()) => {
                    debug!("Emitter stopped after {} value(s)", emitted);
                    break;
                }
                // Handle dropped; keep running
                Err(_) => stoppable = false,
            },
            item = settled.next() => match item {
                Some(Notification::Next(value)) => {
                    debug!("Settled value: {}", value);
                    emitted += 1;
                    sink.next(&value);
                }
                Some(Notification::Error(err)) => {
                    debug!("Source failed: {}", err);
                    sink.error(&err);
                    break;
                }
                Some(Notification::Complete) | None => {
                    debug!("Source completed after {} value(s)", emitted);
                    sink.complete();
                    break;
                }
            },
        }
    }

    emitted
}

/// Handle to a running emitter
pub struct EmitterHandle {
    stop_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<u64>,
}

impl EmitterHandle {
    /// Tear the pipeline down, discarding any pending value
    ///
    /// Returns the number of values emitted.
    pub async fn stop(mut self) -> Result<u64, JoinError> {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        self.task.await
    }

    /// Wait for the source to terminate
    ///
    /// Returns the number of values emitted.
    pub async fn join(self) -> Result<u64, JoinError> {
        let EmitterHandle { stop_tx, task } = self;
        let result = task.await;
        drop(stop_tx);
        result
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slider_core::{Document, Selector};
    use tokio::sync::mpsc;
    use tokio::time::{advance, sleep, Instant};

    fn slider() -> (Document, Option<Control>) {
        let document = Document::new();
        document.insert("input", "slider", "50");
        let selector = Selector::parse("input#slider").unwrap();
        let control = document.query_selector(&selector);
        (document, control)
    }

    #[tokio::test(start_paused = true)]
    async fn test_emits_settled_value_after_burst() {
        let (document, control) = slider();
        let slider = control.clone().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification<String>>();
        let handle = DebouncedEmitter::new(control, tx).start();
        tokio::task::yield_now().await;

        let start = Instant::now();
        slider.set_value("10");
        sleep(Duration::from_millis(500)).await;
        slider.set_value("20");
        sleep(Duration::from_millis(400)).await;
        slider.set_value("35");

        assert_eq!(rx.recv().await, Some(Notification::Next("35".to_string())));
        assert_eq!(start.elapsed(), Duration::from_millis(2900));

        document.remove("slider");
        assert_eq!(rx.recv().await, Some(Notification::Complete));
        assert_eq!(handle.join().await.unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_control_never_emits() {
        let document = Document::new();
        document.insert("input", "volume", "0");
        let selector = Selector::parse("input#slider").unwrap();
        let control = document.query_selector(&selector);
        assert!(control.is_none());

        let (tx, mut rx) = mpsc::unbounded_channel::<Notification<String>>();
        let handle = DebouncedEmitter::new(control, tx).start();

        advance(Duration::from_secs(60)).await;
        assert!(rx.try_recv().is_err());
        assert!(!handle.is_finished());
        assert_eq!(handle.stop().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_reaches_sink_without_delay() {
        let (_document, control) = slider();
        let slider = control.clone().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification<String>>();
        let handle = DebouncedEmitter::new(control, tx).start();
        tokio::task::yield_now().await;

        let start = Instant::now();
        slider.set_value("10");
        slider.fail("detached");

        assert!(matches!(rx.recv().await, Some(Notification::Error(_))));
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(handle.join().await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stop_discards_pending_value() {
        let (_document, control) = slider();
        let slider = control.clone().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification<String>>();
        let handle = DebouncedEmitter::new(control, tx)
            .with_window(Duration::from_millis(100))
            .start();
        tokio::task::yield_now().await;

        slider.set_value("1");
        sleep(Duration::from_millis(150)).await;
        slider.set_value("2");

        assert_eq!(handle.stop().await.unwrap(), 1);
        assert_eq!(rx.recv().await, Some(Notification::Next("1".to_string())));
        assert_eq!(rx.recv().await, None);
        assert_eq!(slider.listener_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_change_events_only() {
        let (_document, control) = slider();
        let slider = control.clone().unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel::<Notification<String>>();
        let _handle = DebouncedEmitter::new(control, tx)
            .with_event(EventKind::Change)
            .start();
        tokio::task::yield_now().await;

        slider.set_value("60");
        slider.set_value("70");
        slider.commit();

        assert_eq!(rx.recv().await, Some(Notification::Next("70".to_string())));
    }
}

//! Output sinks for settled values

use slider_core::{Notification, SourceError};
use std::io::{self, Write};
use tokio::sync::mpsc;
use tracing::warn;

/// Terminal stage of the pipeline
///
/// Sinks never fail and never push back on the source.
pub trait ValueSink {
    /// Receive one settled value
    fn next(&mut self, value: &str);

    /// Receive the source's error
    fn error(&mut self, _error: &SourceError) {}

    /// Receive the source's completion
    fn complete(&mut self) {}
}

/// Writes each settled value on its own line
pub struct ConsoleSink<W = io::Stdout> {
    out: W,
}

impl ConsoleSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ValueSink for ConsoleSink<W> {
    fn next(&mut self, value: &str) {
        if let Err(e) = writeln!(self.out, "{}", value).and_then(|_| self.out.flush()) {
            warn!("Failed to write settled value: {}", e);
        }
    }
}

/// Forwards notifications into a channel
impl ValueSink for mpsc::UnboundedSender<Notification<String>> {
    fn next(&mut self, value: &str) {
        let _ = self.send(Notification::Next(value.to_string()));
    }

    fn error(&mut self, error: &SourceError) {
        let _ = self.send(Notification::Error(error.clone()));
    }

    fn complete(&mut self) {
        let _ = self.send(Notification::Complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_sink_writes_lines() {
        let mut sink = ConsoleSink::new(Vec::new());
        sink.next("35");
        sink.next("7");
        sink.complete();

        let written = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(written, "35\n7\n");
    }

    #[test]
    fn test_channel_sink_forwards_notifications() {
        let (mut tx, mut rx) = mpsc::unbounded_channel::<Notification<String>>();
        tx.next("35");
        tx.complete();

        assert_eq!(rx.try_recv().unwrap(), Notification::Next("35".to_string()));
        assert_eq!(rx.try_recv().unwrap(), Notification::Complete);
    }
}

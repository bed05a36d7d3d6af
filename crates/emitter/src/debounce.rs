//! Trailing-edge debouncing
//!
//! Holds back values until the source has been quiet for a full window,
//! then releases only the most recent one. Each new value replaces the
//! held candidate and restarts the window.

use futures::stream::{self, Stream, StreamExt};
use slider_core::Notification;
use std::time::Duration;
use tokio::time::{sleep_until, Instant};

/// Debounce state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DebounceState<T> {
    /// Nothing held
    Idle,
    /// Candidate held until `deadline`
    Pending { candidate: T, deadline: Instant },
}

/// Sliding quiescence timer holding at most one candidate
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    state: DebounceState<T>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            state: DebounceState::Idle,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn state(&self) -> &DebounceState<T> {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, DebounceState::Pending { .. })
    }

    /// When the held candidate is due, if any
    pub fn deadline(&self) -> Option<Instant> {
        match &self.state {
            DebounceState::Idle => None,
            DebounceState::Pending { deadline, .. } => Some(*deadline),
        }
    }

    /// Hold a new candidate and restart the window from `now`
    ///
    /// Returns the candidate it superseded, which is never emitted.
    pub fn push(&mut self, candidate: T, now: Instant) -> Option<T> {
        let deadline = now + self.window;
        match std::mem::replace(&mut self.state, DebounceState::Pending { candidate, deadline }) {
            DebounceState::Idle => None,
            DebounceState::Pending { candidate, .. } => Some(candidate),
        }
    }

    /// Release the candidate if its window has elapsed at `now`
    pub fn expire(&mut self, now: Instant) -> Option<T> {
        match self.deadline() {
            Some(deadline) if now >= deadline => self.discard(),
            _ => None,
        }
    }

    /// Drop the candidate without emitting it
    pub fn discard(&mut self) -> Option<T> {
        match std::mem::replace(&mut self.state, DebounceState::Idle) {
            DebounceState::Idle => None,
            DebounceState::Pending { candidate, .. } => Some(candidate),
        }
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Debounce a notification stream
///
/// `Next` values are released once `window` passes with no newer value.
/// `Error` and `Complete` pass through immediately and end the stream;
/// a held candidate is discarded. If the source ends without a terminal
/// notification, `Complete` is yielded in its place.
pub fn debounce<S, T>(source: S, window: Duration) -> impl Stream<Item = Notification<T>>
where
    S: Stream<Item = Notification<T>>,
{
    let state = Some((Box::pin(source), Debouncer::new(window)));

    stream::unfold(state, |state| async move {
        let (mut source, mut debouncer) = state?;

        loop {
            let deadline = debouncer.deadline();

            tokio::select! {
                // A value arriving exactly at the deadline does not supersede
                biased;

                _ = wait_until(deadline) => {
                    if let Some(value) = debouncer.expire(Instant::now()) {
                        return Some((Notification::Next(value), Some((source, debouncer))));
                    }
                }
                item = source.next() => match item {
                    Some(Notification::Next(value)) => {
                        debouncer.push(value, Instant::now());
                    }
                    Some(terminal) => {
                        debouncer.discard();
                        return Some((terminal, None));
                    }
                    None => {
                        debouncer.discard();
                        return Some((Notification::Complete, None));
                    }
                },
            }
        }
    })
}

//! Document model for the slider debouncer
//!
//! This crate provides:
//! - Element selectors (`input#slider`)
//! - Controls and the document that owns them
//! - Raw input events and the notifications a source delivers
//! - `from_event`, the event source feeding the emitter pipeline

pub mod selector;
pub mod event;
pub mod control;
pub mod source;

// Re-exports
pub use control::{Control, Document};
pub use event::{EventKind, Notification, RawEvent, SourceError};
pub use selector::{Selector, SelectorError};
pub use source::{from_event, EventStream};

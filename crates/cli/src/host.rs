//! Line-driven control host
//!
//! Each input line becomes a new value on the hosted control, firing an
//! `input` event. End of input tears the document down.

use anyhow::{Context, Result};
use slider_core::Document;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

/// Feed lines from `reader` into the control `id`
///
/// Blank lines are skipped. Returns the number of values applied.
pub async fn pump_lines<R>(reader: R, document: &Document, id: &str) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    let selector = slider_core::Selector::parse(&format!("#{}", id))
        .with_context(|| format!("Invalid control id: {}", id))?;
    let control = document
        .query_selector(&selector)
        .with_context(|| format!("Control '{}' is not in the document", id))?;

    let mut lines = reader.lines();
    let mut applied = 0;

    while let Some(line) = lines.next_line().await.context("Failed to read input")? {
        let value = line.trim();
        if value.is_empty() {
            continue;
        }
        debug!("{}#{} <- {}", control.tag(), control.id(), value);
        control.set_value(value);
        applied += 1;
    }

    info!("Input closed after {} value(s); tearing down document", applied);
    document.teardown();
    Ok(applied)
}

//! Run the debounced slider

use anyhow::{Context, Result};
use cli_lib::{config, host};
use emitter::{ConsoleSink, DebouncedEmitter};
use slider_core::{Document, Selector};
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::BufReader;
use tracing::{info, warn};

/// Overrides taken from the command line
#[derive(Debug, Default)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub selector: Option<String>,
    pub debounce_ms: Option<u64>,
    pub initial: Option<String>,
}

pub async fn run(options: RunOptions) -> Result<()> {
    let mut config = config::load(options.config.as_deref())
        .context("Failed to load configuration")?;

    if let Some(selector) = options.selector {
        config.emitter.selector = selector;
    }
    if let Some(debounce_ms) = options.debounce_ms {
        config.emitter.debounce_ms = debounce_ms;
    }
    if let Some(initial) = options.initial {
        config.control.initial_value = initial;
    }
    config.validate().context("Invalid configuration value")?;

    let selector = Selector::parse(&config.emitter.selector)
        .with_context(|| format!("Invalid selector: {}", config.emitter.selector))?;

    let document = Document::new();
    document.insert(
        &config.control.tag,
        &config.control.id,
        config.control.initial_value.clone(),
    );

    // An unresolved control is inert, not an error
    let control = document.query_selector(&selector);
    let resolved = control.is_some();

    let handle = DebouncedEmitter::new(control, ConsoleSink::stdout())
        .with_window(Duration::from_millis(config.emitter.debounce_ms))
        .start();

    let stdin = BufReader::new(tokio::io::stdin());
    tokio::select! {
        pumped = host::pump_lines(stdin, &document, &config.control.id) => {
            pumped?;
        }
        _ = tokio::signal::ctrl_c() => {
            warn!("Interrupted; tearing down document");
            document.teardown();
        }
    }

    let emitted = if resolved {
        handle.join().await
    } else {
        handle.stop().await
    }
    .context("Emitter task failed")?;

    info!("Emitted {} settled value(s)", emitted);
    Ok(())
}

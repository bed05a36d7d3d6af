//! Configuration inspection command

use anyhow::{Context, Result};
use cli_lib::config::{self, MAX_DEBOUNCE_MS, MIN_DEBOUNCE_MS};
use owo_colors::OwoColorize;
use std::path::Path;

/// Show the effective configuration
pub async fn run_show(explicit: Option<&Path>) -> Result<()> {
    let config = config::load(explicit).context("Failed to load configuration")?;

    let source = match explicit {
        Some(path) => path.display().to_string(),
        None => match config::config_file_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };

    println!("{}", "Slider Configuration".bold());
    println!("{}: {}\n", "Source".dimmed(), source.dimmed());

    println!("{}", "[emitter]".yellow());
    println!("  {} = {}", "selector".cyan(), config.emitter.selector);
    println!(
        "  {} = {} {}",
        "debounce_ms".cyan(),
        config.emitter.debounce_ms,
        format!("({:.1}s)", config.emitter.debounce_ms as f64 / 1000.0).dimmed()
    );

    println!("\n{}", "[control]".yellow());
    println!("  {} = {}", "tag".cyan(), config.control.tag);
    println!("  {} = {}", "id".cyan(), config.control.id);
    println!("  {} = {}", "initial_value".cyan(), config.control.initial_value);

    println!("\n{}", "Valid Ranges:".bold());
    println!("  debounce_ms: {}-{}", MIN_DEBOUNCE_MS, MAX_DEBOUNCE_MS);

    Ok(())
}

/// Show the default config file path
pub async fn run_path() -> Result<()> {
    let config_path = config::config_file_path()
        .context("Could not determine config file path")?;

    println!("{}", config_path.display());
    if !config_path.exists() {
        println!("{}", "File does not exist; built-in defaults apply.".yellow());
    }

    Ok(())
}

/// Show example configuration
pub async fn run_example() -> Result<()> {
    print!("{}", config::example_config());
    Ok(())
}

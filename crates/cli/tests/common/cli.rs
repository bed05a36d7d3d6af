//! CLI command execution helpers with automatic timing
//!
//! Wraps the `slider` binary. Stdin can be held open after the input is
//! written so debounced values have time to settle before end of input
//! tears the document down.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// CLI command builder with timing
pub struct SliderCommand {
    binary_path: PathBuf,
    args: Vec<String>,
    env: HashMap<String, String>,
    /// Input written in order, each chunk followed by a pause
    stdin_chunks: Vec<(String, Duration)>,
}

impl SliderCommand {
    pub fn new() -> Self {
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_slider")),
            args: Vec::new(),
            env: HashMap::new(),
            stdin_chunks: Vec::new(),
        }
    }

    /// Add command arguments
    pub fn args(&mut self, args: &[&str]) -> &mut Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(&mut self, key: &str, value: &str) -> &mut Self {
        self.env.insert(key.to_string(), value.to_string());
        self
    }

    /// Write `data` to stdin, then wait `pause` before the next chunk
    pub fn stdin(&mut self, data: &str, pause: Duration) -> &mut Self {
        self.stdin_chunks.push((data.to_string(), pause));
        self
    }

    /// Execute command and return result with timing
    pub fn execute(&self) -> Result<CommandResult> {
        let start = Instant::now();

        let mut child = Command::new(&self.binary_path)
            .args(&self.args)
            .envs(&self.env)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .context("Failed to spawn command")?;

        if let Some(mut stdin) = child.stdin.take() {
            for (data, pause) in &self.stdin_chunks {
                stdin.write_all(data.as_bytes())?;
                stdin.flush()?;
                std::thread::sleep(*pause);
            }
            // Dropping stdin signals end of input
        }

        let output = child.wait_with_output()
            .context("Failed to wait for command")?;

        Ok(CommandResult {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        })
    }

    /// Execute and assert success
    pub fn assert_success(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if !result.success() {
            anyhow::bail!(
                "Command failed (exit code: {}):\nArgs: {:?}\nStdout: {}\nStderr: {}",
                result.exit_code,
                self.args,
                result.stdout,
                result.stderr
            );
        }

        Ok(result)
    }

    /// Execute and expect failure
    pub fn assert_failure(&self) -> Result<CommandResult> {
        let result = self.execute()?;

        if result.success() {
            anyhow::bail!(
                "Command should have failed but succeeded:\nArgs: {:?}\nStdout: {}",
                self.args,
                result.stdout
            );
        }

        Ok(result)
    }
}

/// Command execution result with timing
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub duration: Duration,
}

impl CommandResult {
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    pub fn contains_stderr(&self, text: &str) -> bool {
        self.stderr.contains(text)
    }

    /// Settled values printed on stdout
    pub fn values(&self) -> Vec<&str> {
        self.stdout.lines().collect()
    }
}

/// Macro for convenient command construction
///
/// Usage:
/// ```
/// slider!("--debounce-ms", "100").stdin("10\n", pause).assert_success()?;
/// ```
#[macro_export]
macro_rules! slider {
    ($($arg:expr),*) => {{
        let mut cmd = $crate::common::cli::SliderCommand::new();
        cmd.args(&[$($arg),*]);
        cmd
    }};
}

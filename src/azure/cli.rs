//! Azure CLI query execution
//!
//! Wraps the `az` binary behind the [`QueryExecutor`] trait. Queries are
//! read-only `list`/`show`/`keys list` subcommands that request a single
//! scalar via a `--query ... --output tsv` field selector, so the contract
//! is deliberately small: trimmed stdout on success, `None` on any failure.

use std::process::{Command, Stdio};

/// Synchronous query executor over the cloud CLI.
///
/// Probes depend on this trait rather than on the `az` binary directly,
/// which keeps the probe engine testable without a live Azure session.
pub trait QueryExecutor {
    /// Run one read-only query and return trimmed stdout.
    ///
    /// Returns `None` when the command cannot be spawned or exits non-zero.
    /// An empty `Some` means the command succeeded but selected nothing.
    fn query(&self, args: &[String]) -> Option<String>;
}

/// Result of an interactive shell invocation
#[derive(Debug)]
pub enum ShellOutcome {
    /// Command completed successfully
    Success,
    /// Command failed with exit code
    Failed(i32),
    /// Error launching command
    Error(String),
}

/// Production executor shelling out to the `az` binary.
#[derive(Debug, Clone)]
pub struct AzCli {
    binary: String,
}

impl AzCli {
    pub fn new(binary: &str) -> Self {
        Self {
            binary: binary.to_string(),
        }
    }

    /// Run an `az` subcommand with inherited stdio.
    ///
    /// Used for the device-code login flow, which prompts on the terminal
    /// and blocks until the user completes or aborts sign-in.
    pub fn run_interactive(&self, args: &[&str]) -> ShellOutcome {
        tracing::info!("Executing: {} {}", self.binary, args.join(" "));

        match Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
        {
            Ok(mut child) => match child.wait() {
                Ok(status) => {
                    if status.success() {
                        ShellOutcome::Success
                    } else {
                        ShellOutcome::Failed(status.code().unwrap_or(-1))
                    }
                },
                Err(e) => ShellOutcome::Error(format!("Failed to wait for process: {}", e)),
            },
            Err(e) => ShellOutcome::Error(format!("Failed to execute {}: {}", self.binary, e)),
        }
    }
}

impl QueryExecutor for AzCli {
    fn query(&self, args: &[String]) -> Option<String> {
        tracing::debug!("Query: {} {}", self.binary, args.join(" "));

        let output = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output();

        match output {
            Ok(out) if out.status.success() => {
                Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
            },
            Ok(out) => {
                tracing::debug!(
                    "Query exited with {}: {}",
                    out.status.code().unwrap_or(-1),
                    String::from_utf8_lossy(&out.stderr).trim()
                );
                None
            },
            Err(e) => {
                tracing::warn!("Failed to execute {}: {}", self.binary, e);
                None
            },
        }
    }
}

//! Azure session guard
//!
//! Checks whether the `az` CLI holds a cached session and, if not, triggers
//! the interactive device-code login flow. Credentials themselves are owned
//! and cached by the CLI; this module only reads or triggers that ambient
//! state.

use super::cli::{AzCli, QueryExecutor, ShellOutcome};

/// Ensure an authenticated `az` session exists, best effort.
///
/// A failed or aborted login is logged but never escalated: later probes
/// will simply find nothing, which callers already treat as "absent".
pub fn ensure_session(cli: &AzCli) {
    let probe_args = vec![
        "account".to_string(),
        "show".to_string(),
        "--query".to_string(),
        "name".to_string(),
        "--output".to_string(),
        "tsv".to_string(),
    ];

    if let Some(account) = cli.query(&probe_args) {
        tracing::debug!("Active session found for account '{}'", account);
        return;
    }

    println!("No active Azure session, starting device code login...");
    match cli.run_interactive(&["login", "--use-device-code"]) {
        ShellOutcome::Success => {
            tracing::info!("Device code login completed");
        },
        ShellOutcome::Failed(code) => {
            tracing::warn!("Login exited with code {}, continuing anyway", code);
            println!("Login did not complete; resource discovery may find nothing.");
        },
        ShellOutcome::Error(e) => {
            tracing::warn!("Login could not be started: {}", e);
            println!("Login could not be started; resource discovery may find nothing.");
        },
    }
}

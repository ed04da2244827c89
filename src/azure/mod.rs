//! Azure CLI interaction module
//!
//! Everything that touches the `az` binary lives here. The rest of the
//! application talks to Azure exclusively through the [`cli::QueryExecutor`]
//! trait so probes can be exercised against an in-memory fake.
//!
//! # Module Structure
//!
//! - [`cli`] - query execution against the `az` binary
//! - [`auth`] - session check and interactive device-code login

pub mod auth;
pub mod cli;

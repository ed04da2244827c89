//! azenv - export Azure resource group credentials into a local .env file.
//!
//! The crate enumerates the resources inside a named resource group through
//! the `az` CLI and writes their connection credentials as `KEY="VALUE"`
//! lines to an environment file consumable by downstream applications.
//!
//! # Module Structure
//!
//! - [`azure`] - boundary to the `az` CLI (query execution, session guard)
//! - [`resource`] - declarative probe definitions and the probe engine
//! - [`envfile`] - the `.env` output writer
//! - [`config`] - persisted user configuration

pub mod azure;
pub mod config;
pub mod envfile;
pub mod resource;

/// Version injected at compile time via AZENV_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("AZENV_VERSION") {
    Some(v) => v,
    None => "dev",
};

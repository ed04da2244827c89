//! Resource probe layer
//!
//! This module provides a data-driven approach to resource discovery. Probe
//! definitions are loaded from an embedded JSON file at first access, so a
//! new resource category means editing `src/resources/probes.json`, not code.
//!
//! # Architecture
//!
//! - [`registry`] - loads and caches probe definitions from embedded JSON
//! - [`probe`] - executes probes against a query executor and renders lines

mod probe;
mod registry;

pub use probe::{render_summary, run_all_probes, run_probe, ProbeOutcome};
pub use registry::*;

//! Probe Registry - Load probe definitions from JSON
//!
//! This module loads the declarative probe table from an embedded JSON file
//! and provides lookup functions for the rest of the application. Each probe
//! describes one resource category: how to list it within a resource group,
//! which follow-up queries fetch its credentials, and which env keys to emit.

use serde::Deserialize;
use std::sync::OnceLock;

/// Embedded probe JSON file (compiled into the binary)
const PROBE_FILE: &str = include_str!("../resources/probes.json");

/// Follow-up query bound to a named template field
///
/// The query result becomes available to export templates as `{<field>}`.
#[derive(Debug, Clone, Deserialize)]
pub struct SecondaryQuery {
    pub field: String,
    pub args: Vec<String>,
}

/// One env line to emit: key plus a value template
///
/// Value templates interpolate `{rg}`, `{name}` and any secondary field.
#[derive(Debug, Clone, Deserialize)]
pub struct ExportDef {
    pub key: String,
    pub value: String,
}

/// Probe definition from JSON
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeDef {
    pub key: String,
    pub display_name: String,
    /// List query argv; must select the first matching name as a tsv scalar
    pub list_args: Vec<String>,
    #[serde(default)]
    pub secondary: Vec<SecondaryQuery>,
    pub exports: Vec<ExportDef>,
    /// Extra derived lines emitted after the exports (no further queries).
    /// Only the AI services probe uses this, for its OpenAI-compatible keys.
    #[serde(default)]
    pub aliases: Vec<ExportDef>,
}

/// Root structure of resources/probes.json
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    pub probes: Vec<ProbeDef>,
}

/// Global registry loaded from JSON
static REGISTRY: OnceLock<ProbeConfig> = OnceLock::new();

/// Get the probe registry (loads from embedded JSON on first access)
pub fn get_registry() -> &'static ProbeConfig {
    REGISTRY.get_or_init(|| {
        serde_json::from_str(PROBE_FILE)
            .unwrap_or_else(|e| panic!("Failed to parse embedded probe JSON: {}", e))
    })
}

/// Get a probe definition by key
pub fn get_probe(key: &str) -> Option<&'static ProbeDef> {
    get_registry().probes.iter().find(|p| p.key == key)
}

//! Probe Execution
//!
//! Runs probe definitions against a [`QueryExecutor`]. Each probe is one
//! discovery-and-export block: list the category inside the resource group,
//! take the first match, fetch its credentials, render the env lines.

use super::registry::{get_registry, ProbeDef};
use crate::azure::cli::QueryExecutor;
use std::collections::HashMap;

/// Result of running one probe
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub key: String,
    pub display_name: String,
    /// Name of the first matching resource, `None` when the category is
    /// absent from the resource group.
    pub name: Option<String>,
    /// Rendered env lines, in export-then-alias order. Empty when absent.
    pub lines: Vec<(String, String)>,
}

/// Run a single probe against the executor.
///
/// An empty or failed list query means the resource was never provisioned;
/// that is expected and yields no lines. Failed or empty secondary queries
/// surface as empty field values, not errors.
pub fn run_probe(def: &ProbeDef, executor: &dyn QueryExecutor, resource_group: &str) -> ProbeOutcome {
    let mut fields = HashMap::new();
    fields.insert("rg".to_string(), resource_group.to_string());

    let list_args = render_args(&def.list_args, &fields);
    let name = executor
        .query(&list_args)
        .filter(|n| !n.is_empty());

    let Some(name) = name else {
        tracing::debug!("No {} in resource group '{}'", def.key, resource_group);
        return ProbeOutcome {
            key: def.key.clone(),
            display_name: def.display_name.clone(),
            name: None,
            lines: Vec::new(),
        };
    };

    tracing::info!("Found {}: {}", def.key, name);
    fields.insert("name".to_string(), name.clone());

    for sec in &def.secondary {
        let args = render_args(&sec.args, &fields);
        // An erroring or empty follow-up query yields an empty value.
        let value = executor.query(&args).unwrap_or_default();
        if value.is_empty() {
            tracing::debug!("{}/{} returned no value", def.key, sec.field);
        }
        fields.insert(sec.field.clone(), value);
    }

    let lines = def
        .exports
        .iter()
        .chain(def.aliases.iter())
        .map(|e| (e.key.clone(), render_template(&e.value, &fields)))
        .collect();

    ProbeOutcome {
        key: def.key.clone(),
        display_name: def.display_name.clone(),
        name: Some(name),
        lines,
    }
}

/// Run all registered probes sequentially, in registry order.
pub fn run_all_probes(executor: &dyn QueryExecutor, resource_group: &str) -> Vec<ProbeOutcome> {
    get_registry()
        .probes
        .iter()
        .map(|def| run_probe(def, executor, resource_group))
        .collect()
}

/// Render the discovery summary, one line per category in registry order.
pub fn render_summary(outcomes: &[ProbeOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        out.push_str(&format!(
            "- {}: {}\n",
            outcome.display_name,
            outcome.name.as_deref().unwrap_or("")
        ));
    }
    out
}

/// Interpolate `{field}` placeholders into each argv element
fn render_args(args: &[String], fields: &HashMap<String, String>) -> Vec<String> {
    args.iter().map(|a| render_template(a, fields)).collect()
}

/// Interpolate `{field}` placeholders into a template string
///
/// Single pass over the template: substituted values are never rescanned,
/// so a queried value that happens to contain a placeholder token stays
/// verbatim. Unknown tokens are kept as-is.
fn render_template(template: &str, fields: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];

        let Some(end) = after.find('}') else {
            // Unterminated brace, keep the tail verbatim.
            out.push_str(&rest[start..]);
            return out;
        };

        let token = &after[..end];
        match fields.get(token) {
            Some(value) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(token);
                out.push('}');
            },
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::registry::get_probe;

    /// Executor backed by a fixed argv -> stdout table
    struct FakeCli {
        responses: HashMap<Vec<String>, String>,
    }

    impl FakeCli {
        fn new(entries: &[(&[&str], &str)]) -> Self {
            let responses = entries
                .iter()
                .map(|(args, out)| {
                    (
                        args.iter().map(|a| a.to_string()).collect(),
                        out.to_string(),
                    )
                })
                .collect();
            Self { responses }
        }
    }

    impl QueryExecutor for FakeCli {
        fn query(&self, args: &[String]) -> Option<String> {
            self.responses.get(args).cloned()
        }
    }

    #[test]
    fn test_absent_resource_yields_no_lines() {
        let def = get_probe("storage-account").unwrap();
        let cli = FakeCli::new(&[]);

        let outcome = run_probe(def, &cli, "rg-demo");
        assert_eq!(outcome.name, None);
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn test_empty_list_result_is_treated_as_absent() {
        let def = get_probe("storage-account").unwrap();
        let cli = FakeCli::new(&[(
            &[
                "storage", "account", "list", "--resource-group", "rg-demo",
                "--query", "[0].name", "--output", "tsv",
            ],
            "",
        )]);

        let outcome = run_probe(def, &cli, "rg-demo");
        assert_eq!(outcome.name, None);
        assert!(outcome.lines.is_empty());
    }

    #[test]
    fn test_storage_probe_renders_connection_string() {
        let def = get_probe("storage-account").unwrap();
        let cli = FakeCli::new(&[
            (
                &[
                    "storage", "account", "list", "--resource-group", "rg-demo",
                    "--query", "[0].name", "--output", "tsv",
                ],
                "stdemo",
            ),
            (
                &[
                    "storage", "account", "keys", "list", "--resource-group", "rg-demo",
                    "--account-name", "stdemo", "--query", "[0].value", "--output", "tsv",
                ],
                "s3cr3t",
            ),
        ]);

        let outcome = run_probe(def, &cli, "rg-demo");
        assert_eq!(outcome.name.as_deref(), Some("stdemo"));
        assert_eq!(
            outcome.lines,
            vec![
                ("STORAGE_ACCOUNT_NAME".to_string(), "stdemo".to_string()),
                ("STORAGE_ACCOUNT_KEY".to_string(), "s3cr3t".to_string()),
                (
                    "STORAGE_CONNECTION_STRING".to_string(),
                    "DefaultEndpointsProtocol=https;AccountName=stdemo;AccountKey=s3cr3t;EndpointSuffix=core.windows.net"
                        .to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_failed_secondary_query_yields_empty_value() {
        let def = get_probe("storage-account").unwrap();
        // List succeeds, keys query is missing from the table (simulates a
        // non-zero exit from the CLI).
        let cli = FakeCli::new(&[(
            &[
                "storage", "account", "list", "--resource-group", "rg-demo",
                "--query", "[0].name", "--output", "tsv",
            ],
            "stdemo",
        )]);

        let outcome = run_probe(def, &cli, "rg-demo");
        assert_eq!(outcome.name.as_deref(), Some("stdemo"));
        assert_eq!(outcome.lines[1], ("STORAGE_ACCOUNT_KEY".to_string(), String::new()));
        assert_eq!(
            outcome.lines[2].1,
            "DefaultEndpointsProtocol=https;AccountName=stdemo;AccountKey=;EndpointSuffix=core.windows.net"
        );
    }

    #[test]
    fn test_ai_services_probe_emits_openai_aliases() {
        let def = get_probe("ai-services").unwrap();
        let cli = FakeCli::new(&[
            (
                &[
                    "cognitiveservices", "account", "list", "--resource-group", "rg-demo",
                    "--query", "[?kind=='AIServices'] | [0].name", "--output", "tsv",
                ],
                "ai-demo",
            ),
            (
                &[
                    "cognitiveservices", "account", "show", "--resource-group", "rg-demo",
                    "--name", "ai-demo", "--query", "properties.endpoint", "--output", "tsv",
                ],
                "https://ai-demo.cognitiveservices.azure.com/",
            ),
            (
                &[
                    "cognitiveservices", "account", "keys", "list", "--resource-group", "rg-demo",
                    "--name", "ai-demo", "--query", "key1", "--output", "tsv",
                ],
                "aikey",
            ),
        ]);

        let outcome = run_probe(def, &cli, "rg-demo");
        assert_eq!(outcome.lines.len(), 9);
        assert!(outcome.lines.contains(&(
            "AI_FOUNDRY_ENDPOINT".to_string(),
            "https://ai-demo.services.ai.azure.com/".to_string()
        )));
        assert!(outcome.lines.contains(&(
            "AI_FOUNDRY_PROJECT_ENDPOINT".to_string(),
            "https://ai-demo.services.ai.azure.com/api/projects/ai-demo".to_string()
        )));
        assert!(outcome.lines.contains(&(
            "AZURE_OPENAI_ENDPOINT".to_string(),
            "https://ai-demo.openai.azure.com/".to_string()
        )));
        assert!(outcome.lines.contains(&(
            "AZURE_OPENAI_API_KEY".to_string(),
            "aikey".to_string()
        )));
        // The deployment name is a fixed literal, independent of any query.
        assert!(outcome.lines.contains(&(
            "AZURE_OPENAI_DEPLOYMENT_NAME".to_string(),
            "gpt-4o-mini".to_string()
        )));
        assert!(outcome.lines.contains(&(
            "MODEL_DEPLOYMENT_NAME".to_string(),
            "gpt-4o-mini".to_string()
        )));
    }

    #[test]
    fn test_queried_value_containing_placeholder_stays_verbatim() {
        let def = get_probe("storage-account").unwrap();
        let cli = FakeCli::new(&[
            (
                &[
                    "storage", "account", "list", "--resource-group", "rg-demo",
                    "--query", "[0].name", "--output", "tsv",
                ],
                "stdemo",
            ),
            (
                &[
                    "storage", "account", "keys", "list", "--resource-group", "rg-demo",
                    "--account-name", "stdemo", "--query", "[0].value", "--output", "tsv",
                ],
                "k{name}3y",
            ),
        ]);

        let outcome = run_probe(def, &cli, "rg-demo");
        assert_eq!(
            outcome.lines[1],
            ("STORAGE_ACCOUNT_KEY".to_string(), "k{name}3y".to_string())
        );
        assert_eq!(
            outcome.lines[2].1,
            "DefaultEndpointsProtocol=https;AccountName=stdemo;AccountKey=k{name}3y;EndpointSuffix=core.windows.net"
        );
    }

    #[test]
    fn test_render_template_keeps_unknown_tokens() {
        let mut fields = HashMap::new();
        fields.insert("name".to_string(), "stdemo".to_string());

        assert_eq!(render_template("{name}-{other}", &fields), "stdemo-{other}");
        assert_eq!(render_template("trailing {brace", &fields), "trailing {brace");
    }

    #[test]
    fn test_render_summary_shows_blank_for_absent() {
        let outcomes = vec![
            ProbeOutcome {
                key: "storage-account".to_string(),
                display_name: "Storage account".to_string(),
                name: Some("stdemo".to_string()),
                lines: Vec::new(),
            },
            ProbeOutcome {
                key: "key-vault".to_string(),
                display_name: "Key Vault".to_string(),
                name: None,
                lines: Vec::new(),
            },
        ];

        let summary = render_summary(&outcomes);
        assert_eq!(summary, "- Storage account: stdemo\n- Key Vault: \n");
    }

    #[test]
    fn test_run_all_probes_covers_every_category() {
        let cli = FakeCli::new(&[]);
        let outcomes = run_all_probes(&cli, "rg-demo");
        assert_eq!(outcomes.len(), 8);
        assert!(outcomes.iter().all(|o| o.name.is_none()));
    }
}

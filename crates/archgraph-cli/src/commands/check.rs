//! Check command implementation.

use anyhow::{Context, Result};
use archgraph_core::{Analyzer, GraphRuleBox};
use archgraph_rules::{all_rules, rules_from_config};
use std::path::Path;

use crate::OutputFormat;

/// Runs the check command.
pub fn run(
    manifest: &Path,
    format: OutputFormat,
    rules_filter: Option<String>,
    config_path: Option<&Path>,
) -> Result<()> {
    let (input, config) = super::load_project(manifest, config_path)?;

    let mut rules = rules_from_config(&config);
    if let Some(filter) = rules_filter {
        let names: Vec<&str> = filter.split(',').map(str::trim).collect();
        rules = filter_rules(rules, &names);
    }

    let analyzer = Analyzer::builder()
        .config(config)
        .rules(rules)
        .build()
        .context("Failed to build analyzer")?;

    tracing::info!(
        "Analyzing {} with {} rules",
        manifest.display(),
        analyzer.rule_count()
    );

    let result = analyzer.analyze(&input).context("Analysis failed")?;

    super::output::print(&result, format)?;

    if result.has_errors() {
        std::process::exit(1);
    }

    Ok(())
}

/// Keeps the configured rules whose name or code is listed.
fn filter_rules(rules: Vec<GraphRuleBox>, names: &[&str]) -> Vec<GraphRuleBox> {
    let known = all_rules();
    for name in names {
        if !known.iter().any(|r| r.name() == *name || r.code() == *name) {
            tracing::warn!("Unknown rule: {}", name);
        }
    }

    let kept: Vec<GraphRuleBox> = rules
        .into_iter()
        .filter(|r| names.contains(&r.name()) || names.contains(&r.code()))
        .collect();

    for name in names {
        let configured = kept.iter().any(|r| r.name() == *name || r.code() == *name);
        let exists = known.iter().any(|r| r.name() == *name || r.code() == *name);
        if exists && !configured {
            tracing::warn!("Rule {} is not enabled by the configuration", name);
        }
    }
    kept
}

//! Subcommand implementations.

pub mod check;
pub mod graph;
pub mod init;
pub mod list_rules;
pub mod output;

use anyhow::{Context, Result};
use archgraph_core::{ArchGraphConfig, ProjectInput};
use std::path::Path;

use crate::config_resolver::ConfigLocator;
use crate::manifest::{Manifest, STDIN_PATH};

/// Loads the manifest and the configuration that applies to it.
///
/// Project config is looked up from the manifest's directory upwards, or from
/// the working directory when the manifest comes from stdin.
pub fn load_project(
    manifest_path: &Path,
    explicit_config: Option<&Path>,
) -> Result<(ProjectInput, ArchGraphConfig)> {
    let project_dir = match manifest_path.parent() {
        _ if manifest_path.as_os_str() == STDIN_PATH => Path::new("."),
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let config = ConfigLocator::from_env().load(project_dir, explicit_config)?;
    let input = Manifest::from_file(manifest_path)
        .with_context(|| format!("Failed to load manifest: {}", manifest_path.display()))?
        .into_input();

    tracing::debug!(
        "Loaded {} entries from {}",
        input.files.len(),
        manifest_path.display()
    );
    Ok((input, config))
}

//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# archgraph configuration

# Layers, most stable first. A file belongs to the first layer whose
# pattern matches its project-relative path.
[[layers]]
name = "domain"
path = "internal/domain/**"
depends_on = []

[[layers]]
name = "application"
path = "internal/app/**"
depends_on = ["domain"]

[[layers]]
name = "presentation"
path = "internal/presentation/**"
depends_on = ["application", "domain"]

[properties]
detect_cycles = true
# report_components = true      # Also report each strongly connected component
# max_dependencies_per_file = 12
# max_dependency_depth = 8
# skip_cyclic_depth = false     # Do not flag depth of files inside cycles
# detect_orphans = true         # Warn about files nothing imports
# entry_points = ["cmd/**"]     # Never reported as orphaned

# "<source glob> -> <target glob>"
forbidden_patterns = [
    # "internal/** -> cmd/**",
]

# Per-rule overrides
# [rules.max-dependencies]
# enabled = true
# severity = "warning"
"#;

/// File written by `archgraph init`.
const CONFIG_FILE: &str = "archgraph.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to declare your layers");
    println!("  2. Produce archgraph.json listing files and their imports");
    println!("  3. Run: archgraph check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;
    Ok(())
}

//! List rules command implementation.

use archgraph_rules::all_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<10} {:<25} Description", "Code", "Name");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<10} {:<25} {}",
            rule.code(),
            rule.name(),
            rule.description()
        );
    }

    println!("\nRules are enabled by archgraph.toml:");
    println!("  layer-boundaries        - always, when [[layers]] are declared");
    println!("  no-cycles               - properties.detect_cycles (default: true)");
    println!("  max-dependencies        - properties.max_dependencies_per_file");
    println!("  max-dependency-depth    - properties.max_dependency_depth");
    println!("  forbidden-dependencies  - properties.forbidden_patterns");
    println!("  orphaned-files          - properties.detect_orphans (entry_points exempt)");

    println!("\nUse --rules to run a subset, e.g.:");
    println!("  archgraph check --rules no-cycles,layer-boundaries");
    println!("  archgraph check --rules AG001,AG002");
}

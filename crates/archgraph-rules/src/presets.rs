//! Rule sets built from configuration.

use archgraph_core::{ArchGraphConfig, GraphRuleBox};
use tracing::debug;

use crate::{
    ForbiddenDependencies, LayerBoundaries, MaxDependencies, MaxDependencyDepth, NoCycles,
    OrphanedFiles,
};

/// Fan-out limit used when listing rules without a configuration.
pub const DEFAULT_MAX_DEPENDENCIES: usize = 12;

/// Depth limit used when listing rules without a configuration.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// Builds the rules a configuration asks for.
///
/// `[properties]` decides which checks exist; a `[rules.<name>]` table may
/// override `max` (limits), `skip_cyclic`, `report_components` and add
/// `patterns` or `entry_points`. Enabling, disabling and severity overrides are applied later
/// by the analyzer.
#[must_use]
pub fn rules_from_config(config: &ArchGraphConfig) -> Vec<GraphRuleBox> {
    let props = &config.properties;
    let mut rules: Vec<GraphRuleBox> = vec![Box::new(LayerBoundaries::new())];

    if props.detect_cycles {
        let report_components = config
            .rule_config(crate::no_cycles::NAME)
            .map_or(props.report_components, |c| {
                c.get_bool("report_components", props.report_components)
            });
        rules.push(Box::new(
            NoCycles::new().report_components(report_components),
        ));
    } else {
        debug!("Cycle detection disabled in [properties]");
    }

    let max_deps = config
        .rule_config(crate::max_dependencies::NAME)
        .and_then(|c| c.get_usize("max"))
        .or(props.max_dependencies_per_file);
    if let Some(max) = max_deps {
        rules.push(Box::new(MaxDependencies::new(max)));
    }

    let depth_config = config.rule_config(crate::max_depth::NAME);
    let max_depth = depth_config
        .and_then(|c| c.get_usize("max"))
        .or(props.max_dependency_depth);
    if let Some(max) = max_depth {
        let skip_cyclic =
            depth_config.map_or(props.skip_cyclic_depth, |c| {
                c.get_bool("skip_cyclic", props.skip_cyclic_depth)
            });
        rules.push(Box::new(
            MaxDependencyDepth::new(max).skip_cyclic(skip_cyclic),
        ));
    }

    let mut patterns = props.forbidden_patterns.clone();
    if let Some(c) = config.rule_config(crate::forbidden_patterns::NAME) {
        patterns.extend(c.get_str_array("patterns"));
    }
    if !patterns.is_empty() {
        rules.push(Box::new(ForbiddenDependencies::new(patterns)));
    }

    let orphan_config = config.rule_config(crate::orphaned_files::NAME);
    let detect_orphans =
        props.detect_orphans || orphan_config.and_then(|c| c.enabled) == Some(true);
    if detect_orphans {
        let mut entry_points = props.entry_points.clone();
        if let Some(c) = orphan_config {
            entry_points.extend(c.get_str_array("entry_points"));
        }
        rules.push(Box::new(OrphanedFiles::new(entry_points)));
    }

    debug!("Built {} rules from configuration", rules.len());
    rules
}

/// Returns every built-in rule with default limits.
#[must_use]
pub fn all_rules() -> Vec<GraphRuleBox> {
    vec![
        Box::new(LayerBoundaries::new()),
        Box::new(NoCycles::new()),
        Box::new(MaxDependencies::new(DEFAULT_MAX_DEPENDENCIES)),
        Box::new(MaxDependencyDepth::new(DEFAULT_MAX_DEPTH)),
        Box::new(ForbiddenDependencies::new(Vec::<String>::new())),
        Box::new(OrphanedFiles::default()),
    ]
}

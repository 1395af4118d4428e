//! Core analyzer for orchestrating lint execution.

use std::sync::Arc;

use crate::config::{ArchGraphConfig, RuleConfig};
use crate::context::AnalysisContext;
use crate::graph::ImportGraph;
use crate::layer::{LayerMap, LayerResolver};
use crate::pattern::{PathMatcher, SimpleGlobMatcher};
use crate::project::ProjectInput;
use crate::rule::{GraphRule, GraphRuleBox};
use crate::types::{LintResult, Violation};

use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during analysis.
#[derive(Debug, Error)]
pub enum AnalyzerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<GraphRuleBox>,
    config: Option<ArchGraphConfig>,
    matcher: Option<Arc<dyn PathMatcher>>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: GraphRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: GraphRuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Adds several boxed rules.
    #[must_use]
    pub fn rules(mut self, rules: impl IntoIterator<Item = GraphRuleBox>) -> Self {
        self.rules.extend(rules);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: ArchGraphConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replaces the path matcher used for layer assignment.
    #[must_use]
    pub fn matcher(mut self, matcher: Arc<dyn PathMatcher>) -> Self {
        self.matcher = Some(matcher);
        self
    }

    /// Builds the analyzer.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn build(self) -> Result<Analyzer, AnalyzerError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let matcher = self.matcher.unwrap_or_else(|| Arc::new(SimpleGlobMatcher));
        let resolver = LayerResolver::with_matcher(config.layers.clone(), matcher);

        Ok(Analyzer {
            rules: self.rules,
            config,
            resolver,
        })
    }
}

/// The main analyzer that orchestrates lint execution.
///
/// Use [`Analyzer::builder()`] to construct an instance. An analyzer holds
/// no per-run state and may be reused for any number of projects.
pub struct Analyzer {
    rules: Vec<GraphRuleBox>,
    config: ArchGraphConfig,
    resolver: LayerResolver,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &ArchGraphConfig {
        &self.config
    }

    /// Returns the layer resolver built from the configuration.
    #[must_use]
    pub fn layer_resolver(&self) -> &LayerResolver {
        &self.resolver
    }

    /// Builds the graph and layer map for a project without running rules.
    #[must_use]
    pub fn prepare(&self, input: &ProjectInput) -> (ImportGraph, LayerMap) {
        let graph = ImportGraph::build(input);
        let layers = self.resolver.assign(&graph);
        (graph, layers)
    }

    /// Analyzes a project and returns the results.
    ///
    /// Violations are ordered by path; violations on the same path keep rule
    /// registration order.
    ///
    /// # Errors
    ///
    /// Currently infallible once built; the signature leaves room for
    /// input-level failures.
    pub fn analyze(&self, input: &ProjectInput) -> Result<LintResult, AnalyzerError> {
        info!("Starting analysis of {} entries", input.files.len());

        let (graph, layers) = self.prepare(input);
        info!(
            "Built graph: {} files, {} edges, {} assigned to layers",
            graph.len(),
            graph.edge_count(),
            layers.assigned_count()
        );

        let ctx = AnalysisContext::new(&graph, &layers);
        let mut result = LintResult::new();
        result.files_checked = graph.len();

        for rule in &self.rules {
            if !self.config.is_rule_enabled(rule.name()) {
                debug!("Skipping disabled rule: {}", rule.name());
                continue;
            }

            debug!("Running rule: {}", rule.name());
            let violations = rule.check(&ctx);
            let violations = self.apply_severity_override(rule.name(), violations);
            result.violations.extend(violations);
        }

        result.violations.sort_by(|a, b| a.path.cmp(&b.path));

        info!(
            "Analysis complete: {} violations in {} files",
            result.violations.len(),
            result.files_checked
        );

        Ok(result)
    }

    /// Applies severity overrides from configuration.
    fn apply_severity_override(
        &self,
        rule_name: &str,
        mut violations: Vec<Violation>,
    ) -> Vec<Violation> {
        if let Some(severity) = self.config.rule_severity(rule_name) {
            for v in &mut violations {
                v.severity = severity;
            }
        }
        violations
    }

    /// Gets the rule configuration for a specific rule.
    #[must_use]
    pub fn rule_config(&self, rule_name: &str) -> Option<&RuleConfig> {
        self.config.rules.get(rule_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::Layer;
    use crate::types::Severity;

    struct EdgeRule;

    impl GraphRule for EdgeRule {
        fn name(&self) -> &'static str {
            "edge-rule"
        }
        fn code(&self) -> &'static str {
            "T001"
        }
        fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
            ctx.graph
                .edges()
                .map(|(from, to)| {
                    Violation::new(
                        self.code(),
                        self.name(),
                        self.default_severity(),
                        ctx.path(from),
                        format!("imports {}", ctx.path(to)),
                    )
                })
                .collect()
        }
    }

    fn input() -> ProjectInput {
        ProjectInput::new()
            .with_file("z.go", ["a.go"])
            .with_file("a.go", ["b.go"])
            .with_file("b.go", Vec::<String>::new())
    }

    #[test]
    fn builder_counts_rules() {
        let analyzer = Analyzer::builder()
            .rule(EdgeRule)
            .rule_box(Box::new(EdgeRule))
            .build()
            .expect("Failed to build analyzer");
        assert_eq!(analyzer.rule_count(), 2);
    }

    #[test]
    fn analyze_sorts_by_path() {
        let analyzer = Analyzer::builder().rule(EdgeRule).build().unwrap();
        let result = analyzer.analyze(&input()).unwrap();
        let paths: Vec<&str> = result.violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["a.go", "z.go"]);
        assert_eq!(result.files_checked, 3);
    }

    #[test]
    fn disabled_rule_is_skipped() {
        let config = ArchGraphConfig::parse("[rules.edge-rule]\nenabled = false\n").unwrap();
        let analyzer = Analyzer::builder().config(config).rule(EdgeRule).build().unwrap();
        assert!(analyzer.analyze(&input()).unwrap().violations.is_empty());
    }

    #[test]
    fn severity_override_applies() {
        let config = ArchGraphConfig::parse("[rules.edge-rule]\nseverity = \"info\"\n").unwrap();
        let analyzer = Analyzer::builder().config(config).rule(EdgeRule).build().unwrap();
        let result = analyzer.analyze(&input()).unwrap();
        assert!(result.violations.iter().all(|v| v.severity == Severity::Info));
        assert!(!result.has_errors());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let config = ArchGraphConfig {
            layers: vec![Layer::new("app", "app/**", ["ghost"])],
            ..ArchGraphConfig::default()
        };
        let err = Analyzer::builder().config(config).build().err();
        assert!(matches!(err, Some(AnalyzerError::Config(_))));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let analyzer = Analyzer::builder().rule(EdgeRule).build().unwrap();
        let first = analyzer.analyze(&input()).unwrap();
        let second = analyzer.analyze(&input()).unwrap();
        assert_eq!(first.violations, second.violations);
    }
}

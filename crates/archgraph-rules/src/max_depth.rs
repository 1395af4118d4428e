//! Rule limiting dependency chain depth.
//!
//! Depth is measured as in [`archgraph_core::analysis::depth`]. A file is
//! flagged only when its depth is strictly greater than the limit.

use archgraph_core::analysis::DepthAnalyzer;
use archgraph_core::{AnalysisContext, GraphRule, Severity, Violation};

/// Rule code for max-dependency-depth.
pub const CODE: &str = "AG004";

/// Rule name for max-dependency-depth.
pub const NAME: &str = "max-dependency-depth";

/// Flags files sitting on top of overly long import chains.
#[derive(Debug, Clone)]
pub struct MaxDependencyDepth {
    max: usize,
    skip_cyclic: bool,
    severity: Severity,
}

impl MaxDependencyDepth {
    /// Creates a rule allowing chains of at most `max` hops.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            skip_cyclic: false,
            severity: Severity::Error,
        }
    }

    /// Do not flag files that belong to a dependency cycle.
    #[must_use]
    pub fn skip_cyclic(mut self, skip: bool) -> Self {
        self.skip_cyclic = skip;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl GraphRule for MaxDependencyDepth {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the length of dependency chains"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
        let report = DepthAnalyzer::new(ctx.graph).report();
        let mut violations = Vec::new();

        for entry in report.exceeding(self.max) {
            if entry.in_cycle && self.skip_cyclic {
                continue;
            }

            let mut violation = Violation::new(
                CODE,
                NAME,
                self.severity,
                ctx.path(entry.node),
                format!(
                    "dependency chain too deep ({} > {})",
                    entry.depth, self.max
                ),
            )
            .with_expected_actual(
                format!("dependency depth at most {}", self.max),
                format!("dependency depth {}", entry.depth),
            )
            .with_suggestions([
                "Flatten the dependency hierarchy",
                "Consider using facades or abstraction layers",
                "Review the architectural design for unnecessary layering",
            ]);

            if entry.in_cycle {
                violation = violation.with_context(
                    "file is part of a dependency cycle; depth may be undercounted",
                );
            }
            violations.push(violation);
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{ImportGraph, LayerMap, ProjectInput};

    fn run(rule: &MaxDependencyDepth, input: &ProjectInput) -> Vec<Violation> {
        let graph = ImportGraph::build(input);
        let layers = LayerMap::default();
        rule.check(&AnalysisContext::new(&graph, &layers))
    }

    fn chain() -> ProjectInput {
        ProjectInput::new()
            .with_file("a.go", ["b.go"])
            .with_file("b.go", ["c.go"])
            .with_file("c.go", ["d.go"])
            .with_file("d.go", Vec::<String>::new())
    }

    #[test]
    fn boundary_is_exclusive() {
        let flagged: Vec<String> = run(&MaxDependencyDepth::new(2), &chain())
            .into_iter()
            .map(|v| v.path)
            .collect();
        assert_eq!(flagged, vec!["a.go"]);

        let flagged: Vec<String> = run(&MaxDependencyDepth::new(1), &chain())
            .into_iter()
            .map(|v| v.path)
            .collect();
        assert_eq!(flagged, vec!["a.go", "b.go"]);

        assert!(run(&MaxDependencyDepth::new(3), &chain()).is_empty());
    }

    #[test]
    fn message_and_values() {
        let violations = run(&MaxDependencyDepth::new(2), &chain());
        let v = &violations[0];
        assert_eq!(v.message, "dependency chain too deep (3 > 2)");
        assert_eq!(v.expected.as_deref(), Some("dependency depth at most 2"));
        assert_eq!(v.actual.as_deref(), Some("dependency depth 3"));
        assert!(v.context.is_none());
    }

    fn cyclic() -> ProjectInput {
        ProjectInput::new()
            .with_file("a.go", ["b.go"])
            .with_file("b.go", ["a.go"])
    }

    #[test]
    fn cyclic_files_get_a_note() {
        let violations = run(&MaxDependencyDepth::new(0), &cyclic());
        assert_eq!(violations.len(), 2);
        assert!(violations
            .iter()
            .all(|v| v.context.as_deref().is_some_and(|c| c.contains("cycle"))));
    }

    #[test]
    fn cyclic_files_can_be_skipped() {
        let rule = MaxDependencyDepth::new(0).skip_cyclic(true);
        assert!(run(&rule, &cyclic()).is_empty());
    }
}

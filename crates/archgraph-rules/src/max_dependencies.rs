//! Rule limiting the number of resolved imports per file.

use archgraph_core::{AnalysisContext, GraphRule, Severity, Violation};

/// Rule code for max-dependencies.
pub const CODE: &str = "AG003";

/// Rule name for max-dependencies.
pub const NAME: &str = "max-dependencies";

/// Flags files whose resolved fan-out exceeds a limit.
///
/// Only unique, resolved targets count; external packages are ignored.
#[derive(Debug, Clone)]
pub struct MaxDependencies {
    max: usize,
    severity: Severity,
}

impl MaxDependencies {
    /// Creates a rule allowing at most `max` dependencies per file.
    #[must_use]
    pub fn new(max: usize) -> Self {
        Self {
            max,
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// The configured limit.
    #[must_use]
    pub fn max(&self) -> usize {
        self.max
    }
}

impl GraphRule for MaxDependencies {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Limits the number of project files a single file imports"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
        ctx.graph
            .nodes()
            .filter_map(|id| {
                let count = ctx.graph.out_degree(id);
                if count <= self.max {
                    return None;
                }
                Some(
                    Violation::new(
                        CODE,
                        NAME,
                        self.severity,
                        ctx.path(id),
                        format!("file has too many dependencies ({count} > {})", self.max),
                    )
                    .with_expected_actual(
                        format!("at most {} dependencies", self.max),
                        format!("{count} dependencies"),
                    )
                    .with_suggestions([
                        "Consider breaking this file into smaller, focused modules",
                        "Use dependency injection to reduce coupling",
                        "Look for common dependencies that could be grouped",
                    ]),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{ImportGraph, LayerMap, ProjectInput};

    fn fixture() -> ImportGraph {
        let input = ProjectInput::new()
            .with_file("hub.go", ["a.go", "b.go", "c.go", "fmt", "a.go"])
            .with_file("a.go", Vec::<String>::new())
            .with_file("b.go", Vec::<String>::new())
            .with_file("c.go", Vec::<String>::new());
        ImportGraph::build(&input)
    }

    fn run(max: usize) -> Vec<Violation> {
        let graph = fixture();
        let layers = LayerMap::default();
        MaxDependencies::new(max).check(&AnalysisContext::new(&graph, &layers))
    }

    #[test]
    fn counts_unique_resolved_targets() {
        let violations = run(2);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "hub.go");
        assert_eq!(violations[0].message, "file has too many dependencies (3 > 2)");
        assert_eq!(violations[0].expected.as_deref(), Some("at most 2 dependencies"));
        assert_eq!(violations[0].actual.as_deref(), Some("3 dependencies"));
    }

    #[test]
    fn limit_is_inclusive() {
        assert!(run(3).is_empty());
    }

    #[test]
    fn zero_limit_flags_any_dependency() {
        assert_eq!(run(0).len(), 1);
    }
}

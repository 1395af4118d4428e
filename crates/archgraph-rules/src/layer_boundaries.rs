//! Rule enforcing declared layer dependencies.
//!
//! A file in layer `A` may import a file in layer `B` only when `A == B`, or
//! `B` (or `*`) appears in `A.depends_on`. Files outside every layer are not
//! checked in either direction.

use archgraph_core::{AnalysisContext, GraphRule, Severity, Violation};

/// Rule code for layer-boundaries.
pub const CODE: &str = "AG001";

/// Rule name for layer-boundaries.
pub const NAME: &str = "layer-boundaries";

/// Flags imports that cross a forbidden layer boundary.
#[derive(Debug, Clone)]
pub struct LayerBoundaries {
    severity: Severity,
}

impl Default for LayerBoundaries {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerBoundaries {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
        }
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl GraphRule for LayerBoundaries {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Enforces allowed dependencies between architectural layers"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for (from, to) in ctx.graph.edges() {
            let (Some(source), Some(target)) = (ctx.layers.layer_of(from), ctx.layers.layer_of(to))
            else {
                continue;
            };
            if source.allows(&target.name) {
                continue;
            }

            let allowed = if source.depends_on.is_empty() {
                "no other layer".to_string()
            } else {
                format!("one of [{}]", source.depends_on.join(", "))
            };

            violations.push(
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    ctx.path(from),
                    format!(
                        "layer '{}' cannot import from layer '{}'",
                        source.name, target.name
                    ),
                )
                .with_context(format!("imported: {}", ctx.path(to)))
                .with_expected_actual(allowed, target.name.clone())
                .with_suggestions([
                    format!(
                        "Move the shared code into a layer that '{}' may depend on",
                        source.name
                    ),
                    "Invert the dependency through an interface owned by the importing layer"
                        .to_string(),
                    format!(
                        "If intended, add '{}' to depends_on of layer '{}'",
                        target.name, source.name
                    ),
                ]),
            );
        }

        violations
    }
}

//! Rule forbidding dependency cycles.
//!
//! Each distinct cycle is reported once, at the file whose import closes it.
//! Optionally every strongly connected component is also reported as an
//! informational finding, which summarises tangles that contain many
//! overlapping cycles.

use archgraph_core::analysis::CycleDetector;
use archgraph_core::{AnalysisContext, GraphRule, Severity, Violation};

/// Rule code for no-cycles.
pub const CODE: &str = "AG002";

/// Rule name for no-cycles.
pub const NAME: &str = "no-cycles";

/// Flags circular imports.
#[derive(Debug, Clone)]
pub struct NoCycles {
    severity: Severity,
    report_components: bool,
}

impl Default for NoCycles {
    fn default() -> Self {
        Self::new()
    }
}

impl NoCycles {
    /// Creates a new rule with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            severity: Severity::Error,
            report_components: false,
        }
    }

    /// Also report each strongly connected component.
    #[must_use]
    pub fn report_components(mut self, enabled: bool) -> Self {
        self.report_components = enabled;
        self
    }

    /// Sets the severity level for cycle findings.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }
}

impl GraphRule for NoCycles {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids circular dependencies between files"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
        let detector = CycleDetector::new(ctx.graph);

        let mut violations: Vec<Violation> = detector
            .find_all_cycles()
            .into_iter()
            .filter_map(|cycle| {
                let path = cycle.closing_file()?.to_string();
                Some(
                    Violation::new(CODE, NAME, self.severity, path, "cyclic dependency detected")
                        .with_context(format!("cycle: {cycle}"))
                        .with_suggestions([
                            "Break the cycle by introducing an interface or abstraction",
                            "Restructure the code to remove circular imports",
                            "Consider dependency inversion principle",
                        ]),
                )
            })
            .collect();

        if self.report_components {
            for component in detector.strongly_connected_components() {
                let Some(first) = component.files.first() else {
                    continue;
                };
                violations.push(
                    Violation::new(
                        CODE,
                        NAME,
                        Severity::Info,
                        first.clone(),
                        format!(
                            "{} files are mutually dependent",
                            component.len()
                        ),
                    )
                    .with_context(format!("component: {}", component.files.join(", "))),
                );
            }
        }

        violations
    }
}

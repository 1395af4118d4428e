//! Rule forbidding imports between path patterns.
//!
//! Each entry reads `"source -> target"`. An edge is flagged when the
//! importing file matches `source` and the imported file matches `target`.
//! Malformed entries are reported against the configuration and skipped; the
//! remaining entries still run.

use std::sync::Arc;

use archgraph_core::{
    AnalysisContext, GraphRule, PathMatcher, Severity, SimpleGlobMatcher, Violation,
    CONFIGURATION_PATH,
};

/// Rule code for forbidden-dependencies.
pub const CODE: &str = "AG005";

/// Rule name for forbidden-dependencies.
pub const NAME: &str = "forbidden-dependencies";

const ARROW: &str = "->";

/// A parsed `source -> target` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenPattern {
    /// Pattern selecting importing files.
    pub source: String,
    /// Pattern selecting imported files.
    pub target: String,
}

/// Why an entry could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSyntaxError {
    /// Not exactly one `->`.
    Arrow,
    /// One side is blank.
    EmptySide,
}

impl ForbiddenPattern {
    /// Parses `"source -> target"`.
    ///
    /// # Errors
    ///
    /// Returns the syntax problem for a malformed entry.
    pub fn parse(rule: &str) -> Result<Self, PatternSyntaxError> {
        let parts: Vec<&str> = rule.split(ARROW).collect();
        let [source, target] = parts.as_slice() else {
            return Err(PatternSyntaxError::Arrow);
        };
        let (source, target) = (source.trim(), target.trim());
        if source.is_empty() || target.is_empty() {
            return Err(PatternSyntaxError::EmptySide);
        }
        Ok(Self {
            source: source.to_string(),
            target: target.to_string(),
        })
    }
}

/// Flags imports matching a forbidden `source -> target` pair.
#[derive(Clone)]
pub struct ForbiddenDependencies {
    rules: Vec<String>,
    matcher: Arc<dyn PathMatcher>,
    severity: Severity,
}

impl std::fmt::Debug for ForbiddenDependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ForbiddenDependencies")
            .field("rules", &self.rules)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl ForbiddenDependencies {
    /// Creates a rule from raw `source -> target` entries.
    #[must_use]
    pub fn new<I, S>(rules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rules: rules.into_iter().map(Into::into).collect(),
            matcher: Arc::new(SimpleGlobMatcher),
            severity: Severity::Error,
        }
    }

    /// Replaces the path matcher.
    #[must_use]
    pub fn matcher(mut self, matcher: Arc<dyn PathMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Sets the severity level.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    fn syntax_violation(&self, rule: &str, error: PatternSyntaxError) -> Violation {
        match error {
            PatternSyntaxError::Arrow => Violation::new(
                CODE,
                NAME,
                self.severity,
                CONFIGURATION_PATH,
                format!("invalid forbidden pattern syntax: '{rule}'"),
            )
            .with_context("Forbidden pattern must be in the form 'source_pattern -> target_pattern'")
            .with_suggestions([
                "Ensure the pattern contains exactly one '->' separating source and target patterns",
                "Example: 'internal/** -> external/**'",
                "Check the [properties] table of your archgraph.toml",
            ]),
            PatternSyntaxError::EmptySide => Violation::new(
                CODE,
                NAME,
                self.severity,
                CONFIGURATION_PATH,
                format!("forbidden pattern has empty source or target: '{rule}'"),
            )
            .with_context("Both source and target patterns must be non-empty")
            .with_suggestions([
                "Ensure both patterns before and after '->' are non-empty",
                "Example: 'internal/** -> external/**'",
            ]),
        }
    }
}

impl GraphRule for ForbiddenDependencies {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Forbids imports between configured path patterns"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
        let mut violations = Vec::new();

        for rule in &self.rules {
            let pattern = match ForbiddenPattern::parse(rule) {
                Ok(pattern) => pattern,
                Err(error) => {
                    violations.push(self.syntax_violation(rule, error));
                    continue;
                }
            };

            for from in ctx.graph.nodes() {
                let source = ctx.path(from);
                if !self.matcher.matches(source, &pattern.source) {
                    continue;
                }
                for &to in ctx.graph.dependencies(from) {
                    let target = ctx.path(to);
                    if !self.matcher.matches(target, &pattern.target) {
                        continue;
                    }
                    violations.push(
                        Violation::new(
                            CODE,
                            NAME,
                            self.severity,
                            source,
                            format!(
                                "forbidden dependency from '{}' to '{}'",
                                pattern.source, pattern.target
                            ),
                        )
                        .with_context(format!("file '{source}' imports '{target}'"))
                        .with_suggestions([
                            "Restructure code to avoid this dependency".to_string(),
                            "Use dependency inversion or abstraction".to_string(),
                            format!(
                                "Files matching '{}' should not depend on '{}'",
                                pattern.source, pattern.target
                            ),
                        ]),
                    );
                }
            }
        }

        violations
    }
}

//! Core types for lint violations and results.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};

/// Synthetic path used for violations that describe the configuration
/// itself rather than a project file.
pub const CONFIGURATION_PATH: &str = "configuration";

/// Severity level for lint violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational message, does not fail lint.
    Info,
    /// Warning that should be addressed.
    Warning,
    /// Error that must be fixed.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A lint violation found during analysis.
///
/// Violations are produced by rules and never mutated afterwards; the
/// `with_*` builders consume and return the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Rule code (e.g., "AG001").
    pub code: String,
    /// Rule name (e.g., "layer-boundaries").
    pub rule: String,
    /// Severity of this violation.
    pub severity: Severity,
    /// Project-relative file path, or [`CONFIGURATION_PATH`].
    pub path: String,
    /// Human-readable message.
    pub message: String,
    /// Additional context (e.g., the imported file or the cycle path).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    /// What the rule expected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// What was actually found.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Ordered remediation hints.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        code: impl Into<String>,
        rule: impl Into<String>,
        severity: Severity,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            rule: rule.into(),
            severity,
            path: path.into(),
            message: message.into(),
            context: None,
            expected: None,
            actual: None,
            suggestions: Vec::new(),
        }
    }

    /// Adds context to this violation.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Adds expected/actual values to this violation.
    #[must_use]
    pub fn with_expected_actual(
        mut self,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        self.expected = Some(expected.into());
        self.actual = Some(actual.into());
        self
    }

    /// Appends a suggestion to this violation.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Appends several suggestions, keeping their order.
    #[must_use]
    pub fn with_suggestions<I, S>(mut self, suggestions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.suggestions
            .extend(suggestions.into_iter().map(Into::into));
        self
    }

    /// Returns true if this violation describes the configuration.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        self.path == CONFIGURATION_PATH
    }

    /// Formats the violation for terminal output.
    #[must_use]
    pub fn format(&self) -> String {
        use std::fmt::Write;
        let mut output = format!("{} {} at {}\n", self.code, self.rule, self.path);
        let _ = writeln!(output, "  {}: {}", self.severity, self.message);
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            let _ = writeln!(output, "  = expected: {expected}");
            let _ = writeln!(output, "  = actual: {actual}");
        }
        if let Some(context) = &self.context {
            let _ = writeln!(output, "  = context: {context}");
        }
        for suggestion in &self.suggestions {
            let _ = writeln!(output, "  = help: {suggestion}");
        }
        output
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.path, self.severity, self.code, self.message
        )?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

/// Converts a Violation to a miette Diagnostic for rich error display.
#[derive(Debug, thiserror::Error)]
#[error("{path}: {message}")]
pub struct ViolationDiagnostic {
    path: String,
    message: String,
    code: String,
    severity: Severity,
    help: Option<String>,
}

impl Diagnostic for ViolationDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(&self.code))
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

impl From<&Violation> for ViolationDiagnostic {
    fn from(v: &Violation) -> Self {
        let mut help_lines = Vec::new();
        if let Some(context) = &v.context {
            help_lines.push(context.clone());
        }
        help_lines.extend(v.suggestions.iter().cloned());

        Self {
            path: v.path.clone(),
            message: v.message.clone(),
            code: format!("{}::{}", v.rule, v.code),
            severity: v.severity,
            help: if help_lines.is_empty() {
                None
            } else {
                Some(help_lines.join("\n"))
            },
        }
    }
}

/// Result of running lint analysis.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct LintResult {
    /// All violations found.
    pub violations: Vec<Violation>,
    /// Number of files checked.
    pub files_checked: usize,
}

impl LintResult {
    /// Creates a new empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.violations
            .iter()
            .any(|v| v.severity == Severity::Error)
    }

    /// Returns violations produced by the named rule.
    #[must_use]
    pub fn by_rule(&self, rule: &str) -> Vec<&Violation> {
        self.violations.iter().filter(|v| v.rule == rule).collect()
    }

    /// Counts violations by severity.
    #[must_use]
    pub fn count_by_severity(&self) -> (usize, usize, usize) {
        let count = |severity| {
            self.violations
                .iter()
                .filter(|v| v.severity == severity)
                .count()
        };
        (
            count(Severity::Error),
            count(Severity::Warning),
            count(Severity::Info),
        )
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        self.violations.iter().any(|v| v.severity >= severity)
    }

    /// Adds violations from another result.
    pub fn extend(&mut self, other: Self) {
        self.violations.extend(other.violations);
        self.files_checked += other.files_checked;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_violation(severity: Severity) -> Violation {
        Violation::new(
            "AG001",
            "layer-boundaries",
            severity,
            "internal/domain/user.go",
            "layer 'domain' cannot import from layer 'presentation'",
        )
    }

    #[test]
    fn violation_new_has_no_optional_fields() {
        let v = make_violation(Severity::Error);
        assert!(v.context.is_none());
        assert!(v.expected.is_none());
        assert!(v.actual.is_none());
        assert!(v.suggestions.is_empty());
    }

    #[test]
    fn suggestions_keep_order() {
        let v = make_violation(Severity::Error)
            .with_suggestion("first")
            .with_suggestions(["second", "third"]);
        assert_eq!(v.suggestions, vec!["first", "second", "third"]);
    }

    #[test]
    fn format_includes_expected_actual_and_context() {
        let v = make_violation(Severity::Error)
            .with_context("imported: internal/presentation/x.go")
            .with_expected_actual("one of [none]", "presentation");
        let formatted = v.format();
        assert!(formatted.contains("= expected: one of [none]"));
        assert!(formatted.contains("= actual: presentation"));
        assert!(formatted.contains("= context: imported: internal/presentation/x.go"));
    }

    #[test]
    fn display_omits_context_when_none() {
        let v = make_violation(Severity::Warning);
        let display = format!("{v}");
        assert!(display.starts_with("internal/domain/user.go: warning [AG001]"));
        assert!(!display.contains('('));
    }

    #[test]
    fn configuration_path_detected() {
        let v = Violation::new("AG005", "forbidden-dependencies", Severity::Error, CONFIGURATION_PATH, "bad");
        assert!(v.is_configuration());
        assert!(!make_violation(Severity::Error).is_configuration());
    }

    #[test]
    fn diagnostic_collects_help_lines() {
        let v = make_violation(Severity::Error)
            .with_context("imported: x.go")
            .with_suggestion("move it");
        let diag = ViolationDiagnostic::from(&v);
        assert_eq!(diag.help.as_deref(), Some("imported: x.go\nmove it"));
        assert_eq!(diag.code, "layer-boundaries::AG001");
    }

    #[test]
    fn count_and_threshold() {
        let mut result = LintResult::new();
        result.violations.push(make_violation(Severity::Warning));
        result.violations.push(make_violation(Severity::Info));
        assert_eq!(result.count_by_severity(), (0, 1, 1));
        assert!(!result.has_errors());
        assert!(result.has_violations_at(Severity::Warning));
        assert!(!result.has_violations_at(Severity::Error));
    }

    #[test]
    fn extend_merges_counts() {
        let mut a = LintResult::new();
        a.files_checked = 2;
        let mut b = LintResult::new();
        b.files_checked = 3;
        b.violations.push(make_violation(Severity::Error));
        a.extend(b);
        assert_eq!(a.files_checked, 5);
        assert_eq!(a.by_rule("layer-boundaries").len(), 1);
    }
}

//! Rule flagging files that no other project file imports.
//!
//! Entry points are exempt: configured patterns, conventional entry file
//! names, and test files. Configuration and documentation files are never
//! flagged.

use std::sync::Arc;

use archgraph_core::pattern::base_name;
use archgraph_core::{
    AnalysisContext, GraphRule, PathMatcher, Severity, SimpleGlobMatcher, Violation,
};

/// Rule code for orphaned-files.
pub const CODE: &str = "AG006";

/// Rule name for orphaned-files.
pub const NAME: &str = "orphaned-files";

/// Base names treated as entry points in any directory.
const ENTRY_FILE_NAMES: &[&str] = &[
    "main.go",
    "main.ts",
    "main.js",
    "main.py",
    "index.ts",
    "index.js",
    "app.ts",
    "app.js",
    "app.py",
    "__init__.py",
    "manage.py",
];

/// Path fragments marking a test file.
const TEST_MARKERS: &[&str] = &["_test.", ".test.", ".spec."];

/// Base names (or prefixes of them) of tool and build configuration.
const CONFIG_FILE_NAMES: &[&str] = &[
    "archgraph.toml",
    ".archgraph.toml",
    "archgraph.json",
    "package.json",
    "tsconfig.json",
    "go.mod",
    "go.sum",
    "setup.py",
    "pyproject.toml",
    "Makefile",
    ".gitignore",
    ".eslintrc",
    ".prettierrc",
];

const DOC_EXTENSIONS: &[&str] = &[".md", ".txt"];

/// Flags files with no incoming imports.
#[derive(Clone)]
pub struct OrphanedFiles {
    entry_points: Vec<String>,
    matcher: Arc<dyn PathMatcher>,
    severity: Severity,
}

impl std::fmt::Debug for OrphanedFiles {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrphanedFiles")
            .field("entry_points", &self.entry_points)
            .field("severity", &self.severity)
            .finish_non_exhaustive()
    }
}

impl OrphanedFiles {
    /// Creates a rule with extra entry-point patterns.
    #[must_use]
    pub fn new<I, S>(entry_points: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            entry_points: entry_points.into_iter().map(Into::into).collect(),
            matcher: Arc::new(SimpleGlobMatcher),
            severity: Severity::Warning,
        }
    }

    /// Replaces the path matcher used for entry-point patterns.
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

    fn is_entry_point(&self, path: &str) -> bool {
        if self
            .entry_points
            .iter()
            .any(|pattern| self.matcher.matches(path, pattern))
        {
            return true;
        }
        ENTRY_FILE_NAMES.contains(&base_name(path))
            || TEST_MARKERS.iter().any(|marker| path.contains(marker))
    }
}

impl Default for OrphanedFiles {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

fn is_config_or_doc(path: &str) -> bool {
    let base = base_name(path);
    CONFIG_FILE_NAMES.iter().any(|name| base.starts_with(name))
        || DOC_EXTENSIONS.iter().any(|ext| base.ends_with(ext))
}

impl GraphRule for OrphanedFiles {
    fn name(&self) -> &'static str {
        NAME
    }

    fn code(&self) -> &'static str {
        CODE
    }

    fn description(&self) -> &'static str {
        "Flags files that no other project file imports"
    }

    fn default_severity(&self) -> Severity {
        self.severity
    }

    fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
        let fan_in = ctx.graph.fan_in();
        ctx.graph
            .nodes()
            .filter(|&id| fan_in[id] == 0)
            .map(|id| ctx.path(id))
            .filter(|path| !self.is_entry_point(path) && !is_config_or_doc(path))
            .map(|path| {
                Violation::new(
                    CODE,
                    NAME,
                    self.severity,
                    path,
                    "file is orphaned (not imported by any other file)",
                )
                .with_suggestions([
                    "Delete the file if it is no longer used",
                    "Add it to entry_points if it is loaded by a tool or framework",
                ])
            })
            .collect()
    }
}

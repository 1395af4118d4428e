//! The rule trait implemented by every graph check.

use crate::context::AnalysisContext;
use crate::types::{Severity, Violation};

/// A lint rule evaluated against the whole dependency graph.
///
/// Rules are stateless between runs: any memo tables they need are built
/// inside [`GraphRule::check`] and dropped when it returns.
///
/// # Example
///
/// ```
/// use archgraph_core::{AnalysisContext, GraphRule, Severity, Violation};
///
/// pub struct NoOrphans;
///
/// impl GraphRule for NoOrphans {
///     fn name(&self) -> &'static str { "no-orphans" }
///     fn code(&self) -> &'static str { "X001" }
///
///     fn check(&self, ctx: &AnalysisContext) -> Vec<Violation> {
///         let fan_in = ctx.graph.fan_in();
///         ctx.graph
///             .nodes()
///             .filter(|&id| fan_in[id] == 0 && ctx.graph.out_degree(id) == 0)
///             .map(|id| {
///                 Violation::new(self.code(), self.name(), Severity::Info, ctx.path(id), "isolated file")
///             })
///             .collect()
///     }
/// }
/// ```
pub trait GraphRule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "no-cycles").
    fn name(&self) -> &'static str;

    /// Returns the rule code (e.g., "AG002").
    fn code(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Returns the default severity for violations from this rule.
    fn default_severity(&self) -> Severity {
        Severity::Error
    }

    /// Checks the graph and returns any violations found.
    fn check(&self, ctx: &AnalysisContext) -> Vec<Violation>;
}

/// Type alias for boxed [`GraphRule`] trait objects.
pub type GraphRuleBox = Box<dyn GraphRule>;

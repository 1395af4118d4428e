//! # archgraph-core
//!
//! Core framework for structural linting of a project's import graph.
//!
//! The crate consumes a file list and per-file raw imports (see
//! [`ProjectInput`]), resolves imports to project files, builds an
//! [`ImportGraph`], assigns files to declared [`Layer`]s and hands the result
//! to [`GraphRule`]s. It includes:
//!
//! - [`pattern`] for the path pattern dialect used by layers and rules
//! - [`resolver`] for mapping import specifiers to files
//! - [`analysis`] for cycle, component and depth analysis
//! - [`Analyzer`] for orchestrating lint execution
//! - [`export`] for DOT and Mermaid rendering
//!
//! ## Example
//!
//! ```
//! use archgraph_core::{Analyzer, ArchGraphConfig, ProjectInput};
//!
//! let input = ProjectInput::new()
//!     .with_file("internal/app/svc.go", ["internal/domain/user.go"])
//!     .with_file("internal/domain/user.go", Vec::<String>::new());
//!
//! let analyzer = Analyzer::builder()
//!     .config(ArchGraphConfig::default())
//!     .build()?;
//! let result = analyzer.analyze(&input)?;
//! assert_eq!(result.files_checked, 2);
//! # Ok::<(), archgraph_core::AnalyzerError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
mod rule;
mod types;

pub mod analysis;
pub mod export;
pub mod graph;
pub mod layer;
pub mod pattern;
pub mod project;
pub mod resolver;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use config::{ArchGraphConfig, ConfigError, Properties, RuleConfig};
pub use context::AnalysisContext;
pub use graph::{GraphBuilder, ImportEdge, ImportGraph, NodeId};
pub use layer::{Layer, LayerMap, LayerResolver};
pub use pattern::{PathMatcher, SimpleGlobMatcher};
pub use project::{Language, ProjectFile, ProjectInput, RawImport};
pub use rule::{GraphRule, GraphRuleBox};
pub use types::{LintResult, Severity, Violation, ViolationDiagnostic, CONFIGURATION_PATH};

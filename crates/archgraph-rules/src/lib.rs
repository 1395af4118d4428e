//! # archgraph-rules
//!
//! Built-in dependency-graph rules for archgraph.
//!
//! ## Available Rules
//!
//! | Code | Name | Description |
//! |------|------|-------------|
//! | AG001 | `layer-boundaries` | Enforces allowed dependencies between layers |
//! | AG002 | `no-cycles` | Forbids circular dependencies |
//! | AG003 | `max-dependencies` | Limits resolved imports per file |
//! | AG004 | `max-dependency-depth` | Limits dependency chain depth |
//! | AG005 | `forbidden-dependencies` | Forbids imports between path patterns |
//! | AG006 | `orphaned-files` | Flags files no other file imports |
//!
//! ## Usage
//!
//! ```
//! use archgraph_core::{Analyzer, ProjectInput};
//! use archgraph_rules::{MaxDependencies, NoCycles};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(NoCycles::new())
//!     .rule(MaxDependencies::new(10))
//!     .build()?;
//!
//! let input = ProjectInput::new()
//!     .with_file("a.go", ["b.go"])
//!     .with_file("b.go", ["a.go"]);
//! let result = analyzer.analyze(&input)?;
//! assert!(result.has_errors());
//! # Ok::<(), archgraph_core::AnalyzerError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod forbidden_patterns;
mod layer_boundaries;
mod max_dependencies;
mod max_depth;
mod no_cycles;
mod orphaned_files;
mod presets;

pub use forbidden_patterns::{ForbiddenDependencies, ForbiddenPattern, PatternSyntaxError};
pub use layer_boundaries::LayerBoundaries;
pub use max_dependencies::MaxDependencies;
pub use max_depth::MaxDependencyDepth;
pub use no_cycles::NoCycles;
pub use orphaned_files::OrphanedFiles;
pub use presets::{all_rules, rules_from_config, DEFAULT_MAX_DEPENDENCIES, DEFAULT_MAX_DEPTH};

/// Re-export core types for convenience.
pub use archgraph_core::{GraphRule, Severity, Violation};

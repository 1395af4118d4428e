//! Context handed to graph rules.

use crate::graph::{ImportGraph, NodeId};
use crate::layer::{Layer, LayerMap};

/// Everything a rule may inspect for one analysis run.
///
/// The context only borrows; rules cannot change the graph or the layer
/// assignment.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisContext<'a> {
    /// The resolved dependency graph.
    pub graph: &'a ImportGraph,
    /// Layer assignment of every node.
    pub layers: &'a LayerMap,
}

impl<'a> AnalysisContext<'a> {
    /// Creates a new context.
    #[must_use]
    pub fn new(graph: &'a ImportGraph, layers: &'a LayerMap) -> Self {
        Self { graph, layers }
    }

    /// Declared layers.
    #[must_use]
    pub fn declared_layers(&self) -> &'a [Layer] {
        self.layers.layers()
    }

    /// Path of a node.
    #[must_use]
    pub fn path(&self, id: NodeId) -> &'a str {
        self.graph.path(id)
    }

    /// Number of files under analysis.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.graph.len()
    }
}

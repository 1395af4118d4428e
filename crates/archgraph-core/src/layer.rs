//! Layer assignment: maps files to declared architecture layers.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::graph::{ImportGraph, NodeId};
use crate::pattern::{PathMatcher, SimpleGlobMatcher};

/// Wildcard accepted in `depends_on` meaning "any layer".
pub const ANY_LAYER: &str = "*";

/// A named architectural layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layer {
    /// Unique layer name.
    pub name: String,
    /// Path pattern selecting the layer's files.
    pub path: String,
    /// Layers this layer may import from. `*` allows any.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl Layer {
    /// Creates a layer.
    #[must_use]
    pub fn new<I, S>(name: impl Into<String>, path: impl Into<String>, depends_on: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            path: path.into(),
            depends_on: depends_on.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true if this layer may import from the layer named `other`.
    ///
    /// A layer may always import from itself.
    #[must_use]
    pub fn allows(&self, other: &str) -> bool {
        self.name == other || self.depends_on.iter().any(|d| d == other || d == ANY_LAYER)
    }
}

/// Resolves file paths to layers. First declared match wins.
#[derive(Clone)]
pub struct LayerResolver {
    layers: Vec<Layer>,
    matcher: Arc<dyn PathMatcher>,
}

impl std::fmt::Debug for LayerResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerResolver")
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl LayerResolver {
    /// Builds a resolver using the default pattern matcher.
    #[must_use]
    pub fn new(layers: Vec<Layer>) -> Self {
        Self::with_matcher(layers, Arc::new(SimpleGlobMatcher))
    }

    /// Builds a resolver using a custom pattern matcher.
    #[must_use]
    pub fn with_matcher(layers: Vec<Layer>, matcher: Arc<dyn PathMatcher>) -> Self {
        Self { layers, matcher }
    }

    /// Which layer does this file belong to?
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&Layer> {
        self.position(path).map(|i| &self.layers[i])
    }

    /// Index of the first layer matching `path`.
    #[must_use]
    pub fn position(&self, path: &str) -> Option<usize> {
        self.layers
            .iter()
            .position(|layer| self.matcher.matches(path, &layer.path))
    }

    /// Declared layers in priority order.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Looks up a layer by name.
    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|l| l.name == name)
    }

    /// Returns true if a file of layer `from` may import a file of layer `to`.
    ///
    /// Unassigned files on either side are not checked.
    #[must_use]
    pub fn can_depend_on(&self, from: Option<&Layer>, to: Option<&Layer>) -> bool {
        match (from, to) {
            (Some(from), Some(to)) => from.allows(&to.name),
            _ => true,
        }
    }

    /// Assigns every node of `graph` to its layer.
    #[must_use]
    pub fn assign(&self, graph: &ImportGraph) -> LayerMap {
        let assignments = graph
            .nodes()
            .map(|id| {
                let layer = self.position(graph.path(id));
                match layer {
                    Some(i) => debug!("{} -> layer {}", graph.path(id), self.layers[i].name),
                    None => debug!("{} is not in any layer", graph.path(id)),
                }
                layer
            })
            .collect();
        LayerMap {
            layers: self.layers.clone(),
            assignments,
        }
    }
}

/// Per-node layer assignment for one graph.
#[derive(Debug, Clone, Default)]
pub struct LayerMap {
    layers: Vec<Layer>,
    assignments: Vec<Option<usize>>,
}

impl LayerMap {
    /// Layer of a node, if assigned.
    #[must_use]
    pub fn layer_of(&self, id: NodeId) -> Option<&Layer> {
        self.assignments
            .get(id)
            .copied()
            .flatten()
            .map(|i| &self.layers[i])
    }

    /// Layer name of a node, if assigned.
    #[must_use]
    pub fn name_of(&self, id: NodeId) -> Option<&str> {
        self.layer_of(id).map(|l| l.name.as_str())
    }

    /// Nodes assigned to the named layer, in file order.
    #[must_use]
    pub fn members(&self, name: &str) -> Vec<NodeId> {
        self.assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.is_some_and(|i| self.layers[i].name == name))
            .map(|(id, _)| id)
            .collect()
    }

    /// Declared layers.
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns true if an edge from `from` to `to` crosses a forbidden
    /// boundary. Unassigned endpoints never do.
    #[must_use]
    pub fn is_violation(&self, from: NodeId, to: NodeId) -> bool {
        match (self.layer_of(from), self.layer_of(to)) {
            (Some(from), Some(to)) => !from.allows(&to.name),
            _ => false,
        }
    }

    /// Number of assigned nodes.
    #[must_use]
    pub fn assigned_count(&self) -> usize {
        self.assignments.iter().filter(|a| a.is_some()).count()
    }
}

//! Import graph construction.
//!
//! Files are nodes of a `petgraph` [`DiGraph`] and are referred to by dense
//! [`NodeId`]s (the node index). Dependency lists are also kept in declared
//! order, since petgraph walks a node's neighbours newest first and the
//! cycle and depth passes must be reproducible.

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use tracing::{debug, warn};

use crate::project::{Language, ProjectFile, ProjectInput};
use crate::resolver::ImportResolver;

/// Dense index of a file in an [`ImportGraph`]. Equal to the petgraph
/// [`NodeIndex::index`] of the file's node.
pub type NodeId = usize;

/// One raw import of a file, with its resolution outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportEdge {
    /// Importing file.
    pub source: String,
    /// Specifier as written.
    pub raw: String,
    /// Resolved project file, if any.
    pub resolved: Option<String>,
}

impl ImportEdge {
    /// Returns true if the specifier resolved to a project file.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}

/// The project's directed dependency graph.
///
/// Invariants: one node per distinct path, no node lists itself, and each
/// dependency list is an ordered set (first import wins).
#[derive(Debug, Clone, Default)]
pub struct ImportGraph {
    graph: DiGraph<ProjectFile, ()>,
    index: HashMap<String, NodeIndex>,
    dependencies: Vec<Vec<NodeId>>,
    edges: Vec<ImportEdge>,
}

impl ImportGraph {
    /// Builds the graph from walker output and raw imports.
    ///
    /// Directory entries and repeated paths are skipped. Unresolved imports
    /// and self-imports produce no edge.
    #[must_use]
    pub fn build(input: &ProjectInput) -> Self {
        GraphBuilder::new().build(input)
    }

    /// Number of files (nodes).
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns true if the graph has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// The underlying petgraph graph, for running its algorithms.
    #[must_use]
    pub fn as_digraph(&self) -> &DiGraph<ProjectFile, ()> {
        &self.graph
    }

    /// All files in walk order.
    pub fn files(&self) -> impl Iterator<Item = &ProjectFile> {
        self.graph.raw_nodes().iter().map(|n| &n.weight)
    }

    /// Path of a node.
    #[must_use]
    pub fn path(&self, id: NodeId) -> &str {
        &self.graph[NodeIndex::new(id)].path
    }

    /// Language of a node.
    #[must_use]
    pub fn language(&self, id: NodeId) -> Language {
        self.graph[NodeIndex::new(id)].language()
    }

    /// Looks up a node by path.
    #[must_use]
    pub fn node(&self, path: &str) -> Option<NodeId> {
        self.index.get(path).map(|n| n.index())
    }

    /// Iterates over node ids in walk order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.graph.node_indices().map(|n| n.index())
    }

    /// Resolved dependencies of a node, in declared order.
    #[must_use]
    pub fn dependencies(&self, id: NodeId) -> &[NodeId] {
        &self.dependencies[id]
    }

    /// Resolved dependency paths of a file; empty for unknown files.
    #[must_use]
    pub fn dependency_paths(&self, path: &str) -> Vec<&str> {
        self.node(path)
            .map(|id| {
                self.dependencies[id]
                    .iter()
                    .map(|&dep| self.path(dep))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of resolved dependencies of a node.
    #[must_use]
    pub fn out_degree(&self, id: NodeId) -> usize {
        self.dependencies[id].len()
    }

    /// Number of files importing each node (fan-in), indexed by node id.
    #[must_use]
    pub fn fan_in(&self) -> Vec<usize> {
        self.graph
            .node_indices()
            .map(|n| self.graph.neighbors_directed(n, Direction::Incoming).count())
            .collect()
    }

    /// Iterates over all resolved edges in walk order.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.graph
            .raw_edges()
            .iter()
            .map(|e| (e.source().index(), e.target().index()))
    }

    /// Total number of resolved edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Every raw import with its resolution outcome, in walk order.
    #[must_use]
    pub fn import_edges(&self) -> &[ImportEdge] {
        &self.edges
    }

    /// Raw imports that did not resolve to a project file.
    pub fn unresolved(&self) -> impl Iterator<Item = &ImportEdge> {
        self.edges.iter().filter(|e| !e.is_resolved())
    }

    /// Returns true if `from` directly depends on `to`.
    #[must_use]
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.graph
            .contains_edge(NodeIndex::new(from), NodeIndex::new(to))
    }
}

/// Assembles an [`ImportGraph`] from a [`ProjectInput`].
///
/// The builder holds no state between calls; every build starts fresh.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphBuilder;

impl GraphBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Builds the graph.
    #[must_use]
    pub fn build(self, input: &ProjectInput) -> ImportGraph {
        let mut graph: DiGraph<ProjectFile, ()> = DiGraph::new();
        let mut index: HashMap<String, NodeIndex> = HashMap::new();

        for file in input.files.iter().filter(|f| !f.is_directory) {
            if index.contains_key(&file.path) {
                debug!("Skipping duplicate file entry: {}", file.path);
                continue;
            }
            let node = graph.add_node(file.clone());
            index.insert(file.path.clone(), node);
        }

        for path in input.imports.keys() {
            if !index.contains_key(path) {
                warn!("Ignoring imports for unknown file: {}", path);
            }
        }

        let paths: Vec<String> = graph
            .raw_nodes()
            .iter()
            .map(|n| n.weight.path.clone())
            .collect();
        let resolver = ImportResolver::new(&paths);

        let mut dependencies: Vec<Vec<NodeId>> = vec![Vec::new(); paths.len()];
        let mut edges = Vec::new();

        for (id, path) in paths.iter().enumerate() {
            for import in input.imports_of(path) {
                let resolved = resolver.resolve(&import.specifier, path);
                edges.push(ImportEdge {
                    source: path.clone(),
                    raw: import.specifier.clone(),
                    resolved: resolved.map(str::to_string),
                });

                let Some(target) = resolved.and_then(|p| index.get(p).copied()) else {
                    debug!("Unresolved import in {}: {}", path, import.specifier);
                    continue;
                };
                let target_id = target.index();
                if target_id == id {
                    debug!("Dropping self-import in {}", path);
                    continue;
                }
                if !dependencies[id].contains(&target_id) {
                    dependencies[id].push(target_id);
                    graph.add_edge(NodeIndex::new(id), target, ());
                }
            }
        }

        ImportGraph {
            graph,
            index,
            dependencies,
            edges,
        }
    }
}

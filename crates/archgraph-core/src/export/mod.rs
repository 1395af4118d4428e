//! Graph rendering for GraphViz and Mermaid.
//!
//! Both exporters share [`GraphView`], which applies the layer and depth
//! filters and classifies every edge once.

mod dot;
mod mermaid;

pub use dot::DotExporter;
pub use mermaid::MermaidExporter;

use std::collections::{HashSet, VecDeque};

use crate::analysis::CycleDetector;
use crate::graph::{ImportGraph, NodeId};
use crate::layer::LayerMap;

/// Default graph title.
pub const DEFAULT_TITLE: &str = "Dependency Graph";

/// Rendering options shared by all exporters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Graph title.
    pub title: String,
    /// Colour nodes by layer.
    pub show_layers: bool,
    /// Draw boundary violations in red.
    pub highlight_violations: bool,
    /// Draw cycle edges in orange.
    pub show_cycles: bool,
    /// Only render files of this layer.
    pub filter_layer: Option<String>,
    /// Only render files within this many hops of a root.
    pub max_depth: Option<usize>,
    /// Label nodes with their last two path segments.
    pub simplify_paths: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            show_layers: true,
            highlight_violations: true,
            show_cycles: true,
            filter_layer: None,
            max_depth: None,
            simplify_paths: false,
        }
    }
}

/// How an edge is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Ordinary dependency.
    Normal,
    /// Part of a dependency cycle.
    Cycle,
    /// Crosses a forbidden layer boundary.
    Violation,
}

/// Border and fill colours for a known layer name.
#[must_use]
pub fn layer_colors(name: &str) -> Option<(&'static str, &'static str)> {
    let colors = match name {
        "domain" => ("#2E7D32", "#C8E6C9"),
        "application" => ("#1565C0", "#BBDEFB"),
        "infrastructure" => ("#C62828", "#FFCDD2"),
        "presentation" => ("#F57C00", "#FFE0B2"),
        "api" => ("#6A1B9A", "#E1BEE7"),
        "cmd" => ("#424242", "#E0E0E0"),
        "internal" => ("#00695C", "#B2DFDB"),
        _ => return None,
    };
    Some(colors)
}

/// Shortens a path to its last two segments.
#[must_use]
pub fn simplify_path(path: &str) -> &str {
    let path = path.strip_prefix("./").unwrap_or(path);
    match path.rmatch_indices('/').nth(1) {
        Some((i, _)) => &path[i + 1..],
        None => path,
    }
}

/// The filtered node set and edge classification for one export.
#[derive(Debug)]
pub struct GraphView<'a> {
    graph: &'a ImportGraph,
    layers: &'a LayerMap,
    options: &'a ExportOptions,
    nodes: Vec<NodeId>,
    slots: Vec<Option<usize>>,
    cycle_edges: HashSet<(NodeId, NodeId)>,
}

impl<'a> GraphView<'a> {
    /// Applies the filters in `options` to `graph`.
    #[must_use]
    pub fn new(graph: &'a ImportGraph, layers: &'a LayerMap, options: &'a ExportOptions) -> Self {
        let mut nodes: Vec<NodeId> = graph
            .nodes()
            .filter(|&id| match &options.filter_layer {
                Some(name) => layers.name_of(id) == Some(name.as_str()),
                None => true,
            })
            .collect();

        if let Some(max_depth) = options.max_depth.filter(|&d| d > 0) {
            nodes = filter_by_depth(graph, &nodes, max_depth);
        }

        let mut slots = vec![None; graph.len()];
        for (slot, &id) in nodes.iter().enumerate() {
            slots[id] = Some(slot);
        }

        let cycle_edges = if options.show_cycles {
            CycleDetector::new(graph)
                .find_all_cycles()
                .iter()
                .flat_map(|c| c.edges().collect::<Vec<_>>())
                .collect()
        } else {
            HashSet::new()
        };

        Self {
            graph,
            layers,
            options,
            nodes,
            slots,
            cycle_edges,
        }
    }

    /// Rendered nodes in file order.
    #[must_use]
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Output identifier of a rendered node (`n0`, `n1`, ...).
    #[must_use]
    pub fn id(&self, node: NodeId) -> Option<String> {
        self.slots[node].map(|slot| format!("n{slot}"))
    }

    /// Display label of a node.
    #[must_use]
    pub fn label(&self, node: NodeId) -> &'a str {
        let path = self.graph.path(node);
        if self.options.simplify_paths {
            simplify_path(path)
        } else {
            path
        }
    }

    /// Rendered edges leaving `node`, with their kind.
    pub fn edges_from(&self, node: NodeId) -> impl Iterator<Item = (NodeId, EdgeKind)> + '_ {
        self.graph
            .dependencies(node)
            .iter()
            .filter(move |&&to| self.slots[to].is_some())
            .map(move |&to| (to, self.edge_kind(node, to)))
    }

    /// Layer colours of a node when layer colouring is on.
    #[must_use]
    pub fn colors(&self, node: NodeId) -> Option<(&'static str, &'static str)> {
        if !self.options.show_layers {
            return None;
        }
        self.layers.name_of(node).and_then(layer_colors)
    }

    /// Returns true if the node belongs to any layer.
    #[must_use]
    pub fn is_assigned(&self, node: NodeId) -> bool {
        self.layers.layer_of(node).is_some()
    }

    /// Declared layer names.
    pub fn layer_names(&self) -> impl Iterator<Item = &'a str> {
        self.layers.layers().iter().map(|l| l.name.as_str())
    }

    /// The options this view was built with.
    #[must_use]
    pub fn options(&self) -> &ExportOptions {
        self.options
    }

    fn edge_kind(&self, from: NodeId, to: NodeId) -> EdgeKind {
        if self.options.show_cycles && self.cycle_edges.contains(&(from, to)) {
            EdgeKind::Cycle
        } else if self.options.highlight_violations && self.layers.is_violation(from, to) {
            EdgeKind::Violation
        } else {
            EdgeKind::Normal
        }
    }
}

/// Breadth-first search from the roots of `nodes` (files nobody imports),
/// keeping files within `max_depth` hops. Falls back to the first node when
/// every file is imported.
fn filter_by_depth(graph: &ImportGraph, nodes: &[NodeId], max_depth: usize) -> Vec<NodeId> {
    let fan_in = graph.fan_in();
    let mut roots: Vec<NodeId> = nodes.iter().copied().filter(|&id| fan_in[id] == 0).collect();
    if roots.is_empty() {
        roots.extend(nodes.first().copied());
    }

    let mut depth: Vec<Option<usize>> = vec![None; graph.len()];
    let mut queue: VecDeque<NodeId> = VecDeque::new();
    for &root in &roots {
        depth[root] = Some(0);
        queue.push_back(root);
    }

    while let Some(current) = queue.pop_front() {
        let current_depth = depth[current].unwrap_or(0);
        if current_depth >= max_depth {
            continue;
        }
        for &dep in graph.dependencies(current) {
            if depth[dep].is_none() {
                depth[dep] = Some(current_depth + 1);
                queue.push_back(dep);
            }
        }
    }

    nodes
        .iter()
        .copied()
        .filter(|&id| depth[id].is_some())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Layer, LayerResolver};
    use crate::project::ProjectInput;

    fn fixture() -> (ImportGraph, LayerMap) {
        let input = ProjectInput::new()
            .with_file("cmd/main.go", ["internal/app/svc.go"])
            .with_file("internal/app/svc.go", ["internal/domain/user.go"])
            .with_file("internal/domain/user.go", ["internal/app/svc.go"]);
        let graph = ImportGraph::build(&input);
        let layers = LayerResolver::new(vec![
            Layer::new("domain", "internal/domain/**", Vec::<String>::new()),
            Layer::new("application", "internal/app/**", ["domain"]),
        ])
        .assign(&graph);
        (graph, layers)
    }

    #[test]
    fn simplify_keeps_last_two_segments() {
        assert_eq!(simplify_path("internal/domain/user.go"), "domain/user.go");
        assert_eq!(simplify_path("./a/b.go"), "a/b.go");
        assert_eq!(simplify_path("main.go"), "main.go");
    }

    #[test]
    fn palette_knows_conventional_layers() {
        assert_eq!(layer_colors("domain"), Some(("#2E7D32", "#C8E6C9")));
        assert_eq!(layer_colors("custom"), None);
    }

    #[test]
    fn cycle_beats_violation() {
        let (graph, layers) = fixture();
        let options = ExportOptions::default();
        let view = GraphView::new(&graph, &layers, &options);
        let kinds: Vec<_> = view.edges_from(2).collect();
        assert_eq!(kinds, vec![(1, EdgeKind::Cycle)]);
    }

    #[test]
    fn violation_without_cycles() {
        let (graph, layers) = fixture();
        let options = ExportOptions {
            show_cycles: false,
            ..ExportOptions::default()
        };
        let view = GraphView::new(&graph, &layers, &options);
        let kinds: Vec<_> = view.edges_from(2).collect();
        assert_eq!(kinds, vec![(1, EdgeKind::Violation)]);
        assert_eq!(view.edges_from(1).next(), Some((2, EdgeKind::Normal)));
    }

    #[test]
    fn layer_filter_limits_nodes() {
        let (graph, layers) = fixture();
        let options = ExportOptions {
            filter_layer: Some("domain".into()),
            ..ExportOptions::default()
        };
        let view = GraphView::new(&graph, &layers, &options);
        assert_eq!(view.nodes(), &[2]);
        assert_eq!(view.edges_from(2).count(), 0);
    }

    #[test]
    fn depth_filter_walks_from_roots() {
        let (graph, layers) = fixture();
        let options = ExportOptions {
            max_depth: Some(1),
            ..ExportOptions::default()
        };
        let view = GraphView::new(&graph, &layers, &options);
        assert_eq!(view.nodes(), &[0, 1]);
        assert_eq!(view.id(1).as_deref(), Some("n1"));
        assert_eq!(view.id(2), None);
    }
}

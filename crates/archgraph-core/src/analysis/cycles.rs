//! Cycle and strongly-connected-component detection.
//!
//! Cycle enumeration walks the graph with an explicit stack so deep
//! dependency chains cannot overflow the call stack. Components come from
//! `petgraph::algo::tarjan_scc`.

use petgraph::algo::tarjan_scc;

use crate::graph::{ImportGraph, NodeId};
use crate::layer::LayerMap;

/// One dependency cycle, as discovered by depth-first search.
///
/// `nodes` starts at the node where the walk entered the cycle; the edge from
/// the last node back to the first closes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    /// Node ids in cycle order.
    pub nodes: Vec<NodeId>,
    /// File paths in cycle order.
    pub files: Vec<String>,
}

impl Cycle {
    fn from_nodes(graph: &ImportGraph, nodes: Vec<NodeId>) -> Self {
        let files = nodes.iter().map(|&n| graph.path(n).to_string()).collect();
        Self { nodes, files }
    }

    /// Number of files in the cycle.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true for an empty cycle. Never the case for detector output.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The file whose import closes the cycle.
    #[must_use]
    pub fn closing_file(&self) -> Option<&str> {
        self.files.last().map(String::as_str)
    }

    /// Returns true if `other` is the same cycle up to rotation.
    #[must_use]
    pub fn is_rotation_of(&self, other: &Self) -> bool {
        if self.nodes.len() != other.nodes.len() {
            return false;
        }
        let Some(first) = self.nodes.first() else {
            return other.nodes.is_empty();
        };
        let Some(offset) = other.nodes.iter().position(|n| n == first) else {
            return false;
        };
        let len = self.nodes.len();
        (0..len).all(|i| self.nodes[i] == other.nodes[(i + offset) % len])
    }

    /// Consecutive edges of the cycle, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        let len = self.nodes.len();
        (0..len).map(move |i| (self.nodes[i], self.nodes[(i + 1) % len]))
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for file in &self.files {
            write!(f, "{file} -> ")?;
        }
        match self.files.first() {
            Some(first) => f.write_str(first),
            None => Ok(()),
        }
    }
}

/// A maximal set of mutually reachable files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StronglyConnectedComponent {
    /// Member node ids in file order.
    pub nodes: Vec<NodeId>,
    /// Member paths in file order.
    pub files: Vec<String>,
}

impl StronglyConnectedComponent {
    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the component has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Finds cycles and strongly connected components in an [`ImportGraph`].
#[derive(Debug, Clone, Copy)]
pub struct CycleDetector<'a> {
    graph: &'a ImportGraph,
}

impl<'a> CycleDetector<'a> {
    /// Creates a detector over `graph`.
    #[must_use]
    pub fn new(graph: &'a ImportGraph) -> Self {
        Self { graph }
    }

    /// All cycles found by depth-first search, one per back edge.
    ///
    /// Roots are taken in file order and dependencies in declared order. Each
    /// back edge closes exactly one cycle, sliced from the current path, so no
    /// two reported cycles are rotations of each other. Cycles that share no
    /// back edge with the walk (for example a second loop through an already
    /// finished node) are not enumerated.
    #[must_use]
    pub fn find_all_cycles(&self) -> Vec<Cycle> {
        self.walk(|_| true, false)
    }

    /// Returns true if the graph contains at least one cycle.
    #[must_use]
    pub fn has_cycle(&self) -> bool {
        !self.walk(|_| true, true).is_empty()
    }

    /// Cycles within the subgraph induced by one layer's files.
    ///
    /// Edges leaving the layer are ignored. An unknown layer yields nothing.
    #[must_use]
    pub fn find_cycles_in_layer(&self, layers: &LayerMap, layer: &str) -> Vec<Cycle> {
        self.walk(|id| layers.name_of(id) == Some(layer), false)
    }

    /// Strongly connected components with at least two members.
    ///
    /// Computed with petgraph's Tarjan pass. Members are sorted into file
    /// order and components are ordered by their first member. Self-imports
    /// are dropped at build time, so a single file never forms a component.
    #[must_use]
    pub fn strongly_connected_components(&self) -> Vec<StronglyConnectedComponent> {
        let graph = self.graph;
        let mut components: Vec<Vec<NodeId>> = tarjan_scc(graph.as_digraph())
            .into_iter()
            .filter(|scc| scc.len() > 1)
            .map(|scc| {
                let mut nodes: Vec<NodeId> = scc.into_iter().map(|n| n.index()).collect();
                nodes.sort_unstable();
                nodes
            })
            .collect();

        components.sort_by_key(|c| c.first().copied());
        components
            .into_iter()
            .map(|nodes| StronglyConnectedComponent {
                files: nodes.iter().map(|&id| graph.path(id).to_string()).collect(),
                nodes,
            })
            .collect()
    }

    /// Per-node flag: true when the node belongs to a reported component.
    #[must_use]
    pub fn cyclic_nodes(&self) -> Vec<bool> {
        let mut flags = vec![false; self.graph.len()];
        for component in self.strongly_connected_components() {
            for id in component.nodes {
                flags[id] = true;
            }
        }
        flags
    }

    fn walk(&self, include: impl Fn(NodeId) -> bool, stop_at_first: bool) -> Vec<Cycle> {
        let graph = self.graph;
        let n = graph.len();
        let mut visited = vec![false; n];
        let mut on_stack = vec![false; n];
        let mut position = vec![0usize; n];
        let mut path: Vec<NodeId> = Vec::new();
        let mut cycles: Vec<Cycle> = Vec::new();

        for root in graph.nodes() {
            if visited[root] || !include(root) {
                continue;
            }

            let mut frames: Vec<(NodeId, usize)> = vec![(root, 0)];
            visited[root] = true;
            on_stack[root] = true;
            position[root] = path.len();
            path.push(root);

            while let Some(frame) = frames.last_mut() {
                let (node, next) = *frame;
                let deps = graph.dependencies(node);

                if next < deps.len() {
                    frame.1 += 1;
                    let dep = deps[next];
                    if !include(dep) {
                        continue;
                    }
                    if on_stack[dep] {
                        cycles.push(Cycle::from_nodes(graph, path[position[dep]..].to_vec()));
                        if stop_at_first {
                            return cycles;
                        }
                    } else if !visited[dep] {
                        visited[dep] = true;
                        on_stack[dep] = true;
                        position[dep] = path.len();
                        path.push(dep);
                        frames.push((dep, 0));
                    }
                    continue;
                }

                frames.pop();
                on_stack[node] = false;
                path.pop();
            }
        }

        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::{Layer, LayerResolver};
    use crate::project::ProjectInput;

    fn graph(edges: &[(&str, &[&str])]) -> ImportGraph {
        let input = edges.iter().fold(ProjectInput::new(), |input, (file, deps)| {
            input.with_file(file, deps.iter().copied())
        });
        ImportGraph::build(&input)
    }

    #[test]
    fn acyclic_graph_has_no_cycles() {
        let g = graph(&[("a.go", &["b.go"]), ("b.go", &["c.go"]), ("c.go", &[])]);
        let detector = CycleDetector::new(&g);
        assert!(detector.find_all_cycles().is_empty());
        assert!(!detector.has_cycle());
        assert!(detector.strongly_connected_components().is_empty());
    }

    #[test]
    fn finds_three_cycle() {
        let g = graph(&[("a.go", &["b.go"]), ("b.go", &["c.go"]), ("c.go", &["a.go"])]);
        let cycles = CycleDetector::new(&g).find_all_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].files, vec!["a.go", "b.go", "c.go"]);
        assert_eq!(cycles[0].to_string(), "a.go -> b.go -> c.go -> a.go");
        assert_eq!(cycles[0].closing_file(), Some("c.go"));
    }

    #[test]
    fn two_cycle_is_reported_once() {
        let g = graph(&[("a.go", &["b.go"]), ("b.go", &["a.go"])]);
        let cycles = CycleDetector::new(&g).find_all_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 2);
    }

    #[test]
    fn rotation_detection() {
        let g = graph(&[("a.go", &[]), ("b.go", &[]), ("c.go", &[])]);
        let abc = Cycle::from_nodes(&g, vec![0, 1, 2]);
        let bca = Cycle::from_nodes(&g, vec![1, 2, 0]);
        let acb = Cycle::from_nodes(&g, vec![0, 2, 1]);
        assert!(abc.is_rotation_of(&bca));
        assert!(!abc.is_rotation_of(&acb));
    }

    #[test]
    fn cycle_edges_close_the_loop() {
        let g = graph(&[("a.go", &[]), ("b.go", &[])]);
        let cycle = Cycle::from_nodes(&g, vec![0, 1]);
        let edges: Vec<_> = cycle.edges().collect();
        assert_eq!(edges, vec![(0, 1), (1, 0)]);
    }

    #[test]
    fn tail_before_cycle_is_excluded() {
        let g = graph(&[
            ("entry.go", &["a.go"]),
            ("a.go", &["b.go"]),
            ("b.go", &["a.go"]),
        ]);
        let cycles = CycleDetector::new(&g).find_all_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].files, vec!["a.go", "b.go"]);
    }

    #[test]
    fn scc_groups_mutually_reachable_files() {
        let g = graph(&[
            ("a.go", &["b.go"]),
            ("b.go", &["c.go", "d.go"]),
            ("c.go", &["a.go"]),
            ("d.go", &["e.go"]),
            ("e.go", &["d.go"]),
            ("f.go", &["a.go"]),
        ]);
        let sccs = CycleDetector::new(&g).strongly_connected_components();
        assert_eq!(sccs.len(), 2);
        assert_eq!(sccs[0].files, vec!["a.go", "b.go", "c.go"]);
        assert_eq!(sccs[1].files, vec!["d.go", "e.go"]);
    }

    #[test]
    fn cyclic_nodes_flags_members_only() {
        let g = graph(&[
            ("a.go", &["b.go"]),
            ("b.go", &["a.go"]),
            ("c.go", &["a.go"]),
        ]);
        let flags = CycleDetector::new(&g).cyclic_nodes();
        assert_eq!(flags, vec![true, true, false]);
    }

    #[test]
    fn layer_cycles_ignore_outside_edges() {
        let g = graph(&[
            ("domain/a.go", &["infra/x.go"]),
            ("infra/x.go", &["domain/a.go"]),
            ("domain/b.go", &["domain/c.go"]),
            ("domain/c.go", &["domain/b.go"]),
        ]);
        let layers = LayerResolver::new(vec![
            Layer::new("domain", "domain/**", Vec::<String>::new()),
            Layer::new("infra", "infra/**", ["domain"]),
        ])
        .assign(&g);
        let detector = CycleDetector::new(&g);

        let in_domain = detector.find_cycles_in_layer(&layers, "domain");
        assert_eq!(in_domain.len(), 1);
        assert_eq!(in_domain[0].files, vec!["domain/b.go", "domain/c.go"]);

        assert!(detector.find_cycles_in_layer(&layers, "infra").is_empty());
        assert!(detector.find_cycles_in_layer(&layers, "missing").is_empty());
        assert_eq!(detector.find_all_cycles().len(), 2);
    }

    fn ring(len: usize) -> ImportGraph {
        let names: Vec<String> = (0..len).map(|i| format!("f{i}.go")).collect();
        let mut input = ProjectInput::new();
        for (i, name) in names.iter().enumerate() {
            let next = names.get(i + 1).map_or_else(|| names[0].clone(), Clone::clone);
            input = input.with_file(name, [next]);
        }
        ImportGraph::build(&input)
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let g = ring(20_000);
        let detector = CycleDetector::new(&g);
        assert!(detector.has_cycle());
        let cycles = detector.find_all_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 20_000);
    }

    #[test]
    fn ring_forms_one_component_in_file_order() {
        let g = ring(2_000);
        let sccs = CycleDetector::new(&g).strongly_connected_components();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 2_000);
        assert_eq!(sccs[0].nodes, (0..2_000).collect::<Vec<_>>());
    }

    #[test]
    fn star_hub_yields_one_cycle_per_leaf() {
        let leaves: Vec<String> = (0..2_000).map(|i| format!("leaf/{i}.go")).collect();
        let mut input = ProjectInput::new().with_file("hub.go", leaves.iter().cloned());
        for leaf in &leaves {
            input = input.with_file(leaf, ["hub.go"]);
        }
        let g = ImportGraph::build(&input);
        let detector = CycleDetector::new(&g);

        let cycles = detector.find_all_cycles();
        assert_eq!(cycles.len(), 2_000);
        assert!(cycles.iter().all(|c| c.len() == 2 && c.files[0] == "hub.go"));
        for pair in cycles.windows(2) {
            assert!(!pair[0].is_rotation_of(&pair[1]));
        }

        let sccs = detector.strongly_connected_components();
        assert_eq!(sccs.len(), 1);
        assert_eq!(sccs[0].len(), 2_001);
    }
}

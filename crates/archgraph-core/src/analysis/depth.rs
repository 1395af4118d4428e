//! Dependency chain depth.
//!
//! `depth(f)` is 0 for a file without dependencies and otherwise one more
//! than the deepest dependency. Inside a cycle the walk stops at files already
//! on the current path, which count as depth 0, so figures for cyclic files
//! are lower bounds and depend on which file the walk entered first.

use crate::analysis::cycles::CycleDetector;
use crate::graph::{ImportGraph, NodeId};

/// Depth of one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileDepth {
    /// Node id.
    pub node: NodeId,
    /// Longest dependency chain below the file.
    pub depth: usize,
    /// Whether the file sits in a strongly connected component.
    pub in_cycle: bool,
}

/// Depths of every file, in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DepthReport {
    /// One entry per node.
    pub entries: Vec<FileDepth>,
}

impl DepthReport {
    /// Entry for a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&FileDepth> {
        self.entries.get(id)
    }

    /// Deepest chain in the project.
    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.entries.iter().map(|e| e.depth).max().unwrap_or(0)
    }

    /// Entries whose depth is strictly greater than `max`.
    pub fn exceeding(&self, max: usize) -> impl Iterator<Item = &FileDepth> {
        self.entries.iter().filter(move |e| e.depth > max)
    }
}

/// Computes and memoises dependency depths for one graph.
///
/// The memo lives as long as the analyzer; build a new one per run.
#[derive(Debug)]
pub struct DepthAnalyzer<'a> {
    graph: &'a ImportGraph,
    memo: Vec<Option<usize>>,
    on_path: Vec<bool>,
}

impl<'a> DepthAnalyzer<'a> {
    /// Creates an analyzer over `graph`.
    #[must_use]
    pub fn new(graph: &'a ImportGraph) -> Self {
        Self {
            graph,
            memo: vec![None; graph.len()],
            on_path: vec![false; graph.len()],
        }
    }

    /// Depth of a file by path; `None` for unknown files.
    pub fn depth_of(&mut self, path: &str) -> Option<usize> {
        self.graph.node(path).map(|id| self.depth(id))
    }

    /// Depth of a node.
    pub fn depth(&mut self, id: NodeId) -> usize {
        if let Some(depth) = self.memo[id] {
            return depth;
        }

        let graph = self.graph;
        // (node, next dependency index, deepest dependency seen so far)
        let mut frames: Vec<(NodeId, usize, usize)> = vec![(id, 0, 0)];
        self.on_path[id] = true;

        while let Some(frame) = frames.last_mut() {
            let (node, next, deepest) = *frame;
            let deps = graph.dependencies(node);

            if next < deps.len() {
                frame.1 += 1;
                let dep = deps[next];
                if let Some(depth) = self.memo[dep] {
                    frame.2 = deepest.max(depth);
                } else if !self.on_path[dep] {
                    self.on_path[dep] = true;
                    frames.push((dep, 0, 0));
                }
                continue;
            }

            frames.pop();
            let depth = if deps.is_empty() { 0 } else { deepest + 1 };
            self.memo[node] = Some(depth);
            self.on_path[node] = false;

            match frames.last_mut() {
                Some(parent) => parent.2 = parent.2.max(depth),
                None => return depth,
            }
        }

        0
    }

    /// Depths of every file, flagged with cycle membership.
    pub fn report(&mut self) -> DepthReport {
        let graph = self.graph;
        let in_cycle = CycleDetector::new(graph).cyclic_nodes();
        let entries = graph
            .nodes()
            .map(|node| FileDepth {
                node,
                depth: self.depth(node),
                in_cycle: in_cycle[node],
            })
            .collect();
        DepthReport { entries }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::ProjectInput;

    fn chain() -> ImportGraph {
        let input = ProjectInput::new()
            .with_file("a.go", ["b.go"])
            .with_file("b.go", ["c.go"])
            .with_file("c.go", ["d.go"])
            .with_file("d.go", Vec::<String>::new());
        ImportGraph::build(&input)
    }

    #[test]
    fn chain_depths() {
        let g = chain();
        let mut analyzer = DepthAnalyzer::new(&g);
        assert_eq!(analyzer.depth_of("a.go"), Some(3));
        assert_eq!(analyzer.depth_of("b.go"), Some(2));
        assert_eq!(analyzer.depth_of("c.go"), Some(1));
        assert_eq!(analyzer.depth_of("d.go"), Some(0));
        assert_eq!(analyzer.depth_of("missing.go"), None);
    }

    #[test]
    fn takes_deepest_branch() {
        let input = ProjectInput::new()
            .with_file("a.go", ["leaf.go", "b.go"])
            .with_file("b.go", ["c.go"])
            .with_file("c.go", Vec::<String>::new())
            .with_file("leaf.go", Vec::<String>::new());
        let g = ImportGraph::build(&input);
        assert_eq!(DepthAnalyzer::new(&g).depth_of("a.go"), Some(2));
    }

    #[test]
    fn cycle_terminates_and_counts_path_hit_as_zero() {
        let input = ProjectInput::new()
            .with_file("a.go", ["b.go"])
            .with_file("b.go", ["a.go"]);
        let g = ImportGraph::build(&input);
        let mut analyzer = DepthAnalyzer::new(&g);
        // b sees a on the path (0) so b = 1, a = 2.
        assert_eq!(analyzer.depth_of("a.go"), Some(2));
        assert_eq!(analyzer.depth_of("b.go"), Some(1));
    }

    #[test]
    fn report_flags_cycle_members() {
        let input = ProjectInput::new()
            .with_file("a.go", ["b.go"])
            .with_file("b.go", ["a.go"])
            .with_file("c.go", ["a.go"]);
        let g = ImportGraph::build(&input);
        let report = DepthAnalyzer::new(&g).report();
        assert!(report.get(0).is_some_and(|e| e.in_cycle));
        assert!(report.get(1).is_some_and(|e| e.in_cycle));
        assert!(report.get(2).is_some_and(|e| !e.in_cycle));
        assert_eq!(report.get(2).map(|e| e.depth), Some(3));
    }

    #[test]
    fn exceeding_is_exclusive() {
        let g = chain();
        let report = DepthAnalyzer::new(&g).report();
        let over_two: Vec<_> = report.exceeding(2).map(|e| e.node).collect();
        assert_eq!(over_two, vec![0]);
        let over_one: Vec<_> = report.exceeding(1).map(|e| e.node).collect();
        assert_eq!(over_one, vec![0, 1]);
        assert_eq!(report.max_depth(), 3);
    }
}

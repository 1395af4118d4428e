//! GraphViz DOT output.

use std::io::{self, Write};

use super::{EdgeKind, ExportOptions, GraphView};
use crate::graph::ImportGraph;
use crate::layer::LayerMap;

const UNASSIGNED_COLORS: (&str, &str) = ("gray", "#F5F5F5");
const PLAIN_COLORS: (&str, &str) = ("black", "#FFFFFF");

/// Renders an [`ImportGraph`] as a GraphViz digraph.
#[derive(Debug)]
pub struct DotExporter<'a> {
    graph: &'a ImportGraph,
    layers: &'a LayerMap,
    options: ExportOptions,
}

impl<'a> DotExporter<'a> {
    /// Creates an exporter.
    #[must_use]
    pub fn new(graph: &'a ImportGraph, layers: &'a LayerMap, options: ExportOptions) -> Self {
        Self {
            graph,
            layers,
            options,
        }
    }

    /// Writes the graph.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn export<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "digraph \"{}\" {{", escape(&self.options.title))?;
        writeln!(w, "  rankdir=LR;")?;
        writeln!(w, "  node [shape=box, style=rounded];")?;
        writeln!(w, "  edge [arrowhead=vee];")?;
        writeln!(w)?;

        let view = GraphView::new(self.graph, self.layers, &self.options);
        if view.nodes().is_empty() {
            writeln!(w, "  // No nodes to display")?;
            return writeln!(w, "}}");
        }

        for &node in view.nodes() {
            let (color, fill) = self.node_colors(&view, node);
            writeln!(
                w,
                "  {} [label=\"{}\", color=\"{color}\", fillcolor=\"{fill}\", style=\"rounded,filled\"];",
                slot(&view, node),
                escape(view.label(node)),
            )?;
        }
        writeln!(w)?;

        for &node in view.nodes() {
            for (to, kind) in view.edges_from(node) {
                let (color, style, width) = match kind {
                    EdgeKind::Cycle => ("orange", "bold", "2.0"),
                    EdgeKind::Violation => ("red", "bold", "2.0"),
                    EdgeKind::Normal => ("black", "solid", "1.0"),
                };
                writeln!(
                    w,
                    "  {} -> {} [color=\"{color}\", style=\"{style}\", penwidth={width}];",
                    slot(&view, node),
                    slot(&view, to),
                )?;
            }
        }

        if self.options.show_layers {
            self.write_legend(w, &view)?;
        }

        writeln!(w, "}}")
    }

    fn node_colors(&self, view: &GraphView<'_>, node: usize) -> (&'static str, &'static str) {
        if !self.options.show_layers {
            return PLAIN_COLORS;
        }
        if !view.is_assigned(node) {
            return UNASSIGNED_COLORS;
        }
        view.colors(node).unwrap_or(PLAIN_COLORS)
    }

    fn write_legend<W: Write>(&self, w: &mut W, view: &GraphView<'_>) -> io::Result<()> {
        writeln!(w)?;
        writeln!(w, "  // Legend")?;
        writeln!(w, "  subgraph cluster_legend {{")?;
        writeln!(w, "    label=\"Layers\";")?;
        writeln!(w, "    style=filled;")?;
        writeln!(w, "    fillcolor=\"#F0F0F0\";")?;
        for (i, name) in view.layer_names().enumerate() {
            let (color, fill) = super::layer_colors(name).unwrap_or(PLAIN_COLORS);
            writeln!(
                w,
                "    legend{i} [label=\"{}\", color=\"{color}\", fillcolor=\"{fill}\", style=\"rounded,filled\"];",
                escape(name)
            )?;
        }
        writeln!(w, "  }}")
    }
}

fn slot(view: &GraphView<'_>, node: usize) -> String {
    view.id(node).unwrap_or_default()
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

//! Mermaid flowchart output.

use std::io::{self, Write};

use super::{layer_colors, EdgeKind, ExportOptions, GraphView};
use crate::graph::ImportGraph;
use crate::layer::LayerMap;

/// Renders an [`ImportGraph`] as a Mermaid `graph`.
#[derive(Debug)]
pub struct MermaidExporter<'a> {
    graph: &'a ImportGraph,
    layers: &'a LayerMap,
    options: ExportOptions,
    direction: String,
}

impl<'a> MermaidExporter<'a> {
    /// Creates an exporter drawing left to right.
    #[must_use]
    pub fn new(graph: &'a ImportGraph, layers: &'a LayerMap, options: ExportOptions) -> Self {
        Self {
            graph,
            layers,
            options,
            direction: "LR".to_string(),
        }
    }

    /// Sets the flow direction (`LR`, `RL`, `TB`, `BT`).
    #[must_use]
    pub fn with_direction(mut self, direction: impl Into<String>) -> Self {
        self.direction = direction.into();
        self
    }

    /// Writes the graph.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn export<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "graph {}", self.direction)?;

        let view = GraphView::new(self.graph, self.layers, &self.options);
        if view.nodes().is_empty() {
            return writeln!(w, "  %% No nodes to display");
        }

        for &node in view.nodes() {
            let from = node_ref(&view, node);
            let mut has_edges = false;
            for (to, kind) in view.edges_from(node) {
                has_edges = true;
                let arrow = match kind {
                    EdgeKind::Cycle => "-.->|cycle|",
                    EdgeKind::Violation => "-.->|violation|",
                    EdgeKind::Normal => "-->",
                };
                writeln!(w, "  {from} {arrow} {}", node_ref(&view, to))?;
            }
            if !has_edges {
                writeln!(w, "  {from}")?;
            }
        }

        if self.options.show_layers {
            writeln!(w)?;
            writeln!(w, "  %% Layer styling")?;
            for &node in view.nodes() {
                let Some(name) = self.layers.name_of(node) else {
                    continue;
                };
                let Some((stroke, fill)) = layer_colors(name) else {
                    continue;
                };
                writeln!(
                    w,
                    "  style {} fill:{fill},stroke:{stroke},stroke-width:2px",
                    view.id(node).unwrap_or_default()
                )?;
            }
        }

        Ok(())
    }

    /// Writes the graph wrapped in a markdown code fence.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn export_markdown<W: Write>(&self, w: &mut W) -> io::Result<()> {
        writeln!(w, "```mermaid")?;
        self.export(w)?;
        writeln!(w, "```")
    }
}

fn node_ref(view: &GraphView<'_>, node: usize) -> String {
    format!(
        "{}[\"{}\"]",
        view.id(node).unwrap_or_default(),
        view.label(node).replace('"', "#quot;")
    )
}

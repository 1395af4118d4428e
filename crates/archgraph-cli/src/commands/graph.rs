//! Graph command implementation.

use anyhow::{Context, Result};
use archgraph_core::export::{DotExporter, ExportOptions, MermaidExporter, DEFAULT_TITLE};
use archgraph_core::{Analyzer, ImportGraph, LayerMap};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::GraphFormat;

/// Builds export options from command-line flags.
#[must_use]
#[allow(clippy::fn_params_excessive_bools)]
pub fn options(
    title: Option<String>,
    layer: Option<String>,
    max_depth: Option<usize>,
    show_layers: bool,
    show_cycles: bool,
    highlight_violations: bool,
    simplify_paths: bool,
) -> ExportOptions {
    ExportOptions {
        title: title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        show_layers,
        highlight_violations,
        show_cycles,
        filter_layer: layer,
        max_depth,
        simplify_paths,
    }
}

/// Runs the graph command, writing to stdout.
pub fn run(
    manifest: &Path,
    format: GraphFormat,
    options: ExportOptions,
    config_path: Option<&Path>,
) -> Result<()> {
    let (input, config) = super::load_project(manifest, config_path)?;

    if let Some(layer) = &options.filter_layer {
        if !config.layers.iter().any(|l| &l.name == layer) {
            tracing::warn!("Layer '{}' is not declared; the graph will be empty", layer);
        }
    }

    let analyzer = Analyzer::builder()
        .config(config)
        .build()
        .context("Failed to build analyzer")?;
    let (graph, layers) = analyzer.prepare(&input);

    tracing::info!(
        "Exporting {} files and {} edges",
        graph.len(),
        graph.edge_count()
    );

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_graph(&mut out, &graph, &layers, format, options)?;
    out.flush()?;
    Ok(())
}

fn write_graph<W: Write>(
    w: &mut W,
    graph: &ImportGraph,
    layers: &LayerMap,
    format: GraphFormat,
    options: ExportOptions,
) -> Result<()> {
    match format {
        GraphFormat::Dot => DotExporter::new(graph, layers, options).export(w)?,
        GraphFormat::Mermaid => MermaidExporter::new(graph, layers, options).export(w)?,
        GraphFormat::MermaidMd => {
            MermaidExporter::new(graph, layers, options).export_markdown(w)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use archgraph_core::{Layer, LayerResolver, ProjectInput};

    fn render(format: GraphFormat, options: ExportOptions) -> String {
        let input = ProjectInput::new()
            .with_file("domain/a.go", ["app/b.go"])
            .with_file("app/b.go", ["domain/a.go"]);
        let graph = ImportGraph::build(&input);
        let layers = LayerResolver::new(vec![
            Layer::new("domain", "domain/**", Vec::<String>::new()),
            Layer::new("app", "app/**", ["domain"]),
        ])
        .assign(&graph);

        let mut buf = Vec::new();
        write_graph(&mut buf, &graph, &layers, format, options).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn flags_map_to_options() {
        let opts = options(None, Some("app".into()), Some(2), false, true, false, true);
        assert_eq!(opts.title, DEFAULT_TITLE);
        assert!(!opts.show_layers);
        assert!(opts.show_cycles);
        assert!(!opts.highlight_violations);
        assert_eq!(opts.filter_layer.as_deref(), Some("app"));
        assert_eq!(opts.max_depth, Some(2));
        assert!(opts.simplify_paths);
    }

    #[test]
    fn dot_output() {
        let dot = render(GraphFormat::Dot, ExportOptions::default());
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("domain/a.go"));
    }

    #[test]
    fn mermaid_markdown_is_fenced() {
        let md = render(GraphFormat::MermaidMd, ExportOptions::default());
        assert!(md.starts_with("```mermaid"));
        assert!(md.trim_end().ends_with("```"));
        assert!(md.contains("graph LR"));
    }
}

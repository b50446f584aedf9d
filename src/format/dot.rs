//! Graphviz dot rendering of a dependency graph.

use std::io::Write;
use std::path::Path;

use crate::graph::DependencyGraph;
use crate::types::error::DepGraphResult;

/// Graph identifier used when none is configured.
pub const DEFAULT_GRAPH_NAME: &str = "Shared Library Dependencies";

/// Renders a [`DependencyGraph`] as a dot digraph.
///
/// Output is deterministic: nodes are emitted sorted by name, edges in
/// discovery order with their order value as the edge label.
#[derive(Debug, Clone)]
pub struct DotWriter {
    graph_name: String,
}

impl DotWriter {
    /// Create a writer using [`DEFAULT_GRAPH_NAME`].
    pub fn new() -> Self {
        Self {
            graph_name: DEFAULT_GRAPH_NAME.to_string(),
        }
    }

    /// Create a writer with a custom graph identifier.
    pub fn with_graph_name(name: impl Into<String>) -> Self {
        Self {
            graph_name: name.into(),
        }
    }

    /// Render the graph into a string. Lines are joined by `\n` with no
    /// trailing newline.
    pub fn render(&self, graph: &DependencyGraph, title: &str) -> String {
        let mut lines = Vec::with_capacity(graph.node_count() + graph.edge_count() + 8);
        lines.push(format!("digraph \"{}\" {{", escape(&self.graph_name)));
        lines.push(format!("    label=\"{}\";", escape(title)));
        lines.push("    labelloc=t;".to_string());
        lines.push("    fontsize=16;".to_string());
        lines.push("    fontname=\"Arial Bold\";".to_string());
        lines.push("    rankdir=TB;".to_string());
        lines.push("    node [shape=box, style=rounded];".to_string());

        for node in graph.nodes() {
            lines.push(format!("    \"{}\";", escape(&node.name)));
        }
        for edge in graph.edges() {
            lines.push(format!(
                "    \"{}\" -> \"{}\" [label=\"{}\"];",
                escape(&edge.source),
                escape(&edge.target),
                edge.order
            ));
        }

        lines.push("}".to_string());
        lines.join("\n")
    }

    /// Render the graph to any writer.
    pub fn write_to(
        &self,
        graph: &DependencyGraph,
        title: &str,
        writer: &mut impl Write,
    ) -> DepGraphResult<()> {
        writer.write_all(self.render(graph, title).as_bytes())?;
        Ok(())
    }

    /// Render the graph to a file, replacing any previous contents.
    pub fn write_to_file(
        &self,
        graph: &DependencyGraph,
        title: &str,
        path: &Path,
    ) -> DepGraphResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(graph, title, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl Default for DotWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escape a string for use inside a dot double-quoted identifier.
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            c => out.push(c),
        }
    }
    out
}

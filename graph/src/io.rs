//! Edge-list loading and DOT export.
//!
//! The edge-list format is one edge per line, `from to label`, with fields
//! separated by whitespace or commas. Node fields are non-negative integers.
//! Blank lines and lines starting with `#` are skipped.

use crate::error::{GraphError, GraphResult};
use crate::graph::LabeledGraph;
use pathq_core::NodeId;
use std::fs;
use std::path::Path;

impl LabeledGraph {
    /// Parse an edge list.
    pub fn from_edge_list(text: &str) -> GraphResult<Self> {
        let mut graph = LabeledGraph::new();

        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line
                .split(|c: char| c == ',' || c.is_whitespace())
                .filter(|f| !f.is_empty())
                .collect();
            let &[from, to, label] = fields.as_slice() else {
                return Err(GraphError::malformed_edge(
                    i + 1,
                    line,
                    format!("expected 3 fields, found {}", fields.len()),
                ));
            };

            let parse_node = |field: &str| {
                field.parse::<u64>().map(NodeId).map_err(|_| {
                    GraphError::malformed_edge(i + 1, line, format!("invalid node '{}'", field))
                })
            };
            graph.add_edge(parse_node(from)?, label, parse_node(to)?);
        }

        Ok(graph)
    }

    /// Load an edge-list file.
    pub fn load(path: impl AsRef<Path>) -> GraphResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| GraphError::io(path, e))?;
        Self::from_edge_list(&text)
    }

    /// Render the graph in GraphViz DOT format.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph {\n");
        for node in self.node_ids() {
            out.push_str(&format!("  {};\n", node));
        }
        for edge in self.all_edges() {
            out.push_str(&format!(
                "  {} -> {} [label=\"{}\"];\n",
                edge.from,
                edge.to,
                edge.label.as_str().replace('"', "\\\"")
            ));
        }
        out.push_str("}\n");
        out
    }

    /// Write the DOT rendering to a file.
    pub fn save_dot(&self, path: impl AsRef<Path>) -> GraphResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_dot()).map_err(|e| GraphError::io(path, e))
    }
}

//! Plain-text export: one line per level.

use std::fmt::Write;

use crate::graph::LayeredGraph;

use super::{Error, Exporter};

/// Writes each column as `<level>: <name>, <name>` and then one
/// `cycle: <node> -> <dependency>` line per cycle edge. Nodes with a known
/// type are written as `<name> (<type>)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export(&self, layered: &LayeredGraph) -> Result<String, Error> {
        let layering = layered.layering();
        let mut out = String::new();

        for (level, column) in layering.columns().iter().enumerate() {
            let names: Vec<String> = column
                .iter()
                .map(|node| match layered.node_type(node) {
                    Some(node_type) => format!("{node} ({node_type})"),
                    None => node.to_string(),
                })
                .collect();
            let line = if names.is_empty() {
                format!("{level}:")
            } else {
                format!("{level}: {}", names.join(", "))
            };
            writeln!(out, "{line}").map_err(|err| Error::Render(err.to_string()))?;
        }

        for (node, dependency) in layering.cycle_edges() {
            writeln!(out, "cycle: {node} -> {dependency}")
                .map_err(|err| Error::Render(err.to_string()))?;
        }

        Ok(out)
    }
}

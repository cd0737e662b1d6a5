//! JSON export of a layering.

use log::debug;

use crate::graph::LayeredGraph;

use super::{Error, Exporter};

/// Writes `{"order": [...], "levels": {...}, "cycle_edges": [[node, dep], ...],
/// "node_types": {...}}`.
#[derive(Debug, Clone, Copy)]
pub struct JsonExporter {
    pretty: bool,
}

impl JsonExporter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Exporter for JsonExporter {
    fn export(&self, layered: &LayeredGraph) -> Result<String, Error> {
        debug!(pretty = self.pretty; "Exporting layering as JSON");
        let json = if self.pretty {
            serde_json::to_string_pretty(layered)?
        } else {
            serde_json::to_string(layered)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use esparx_layering::{DependencyMap, NodeName, layer};
    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn test_compact_output() {
        let map: DependencyMap = [("a", vec![]), ("b", vec!["a"])].into_iter().collect();
        let layered = LayeredGraph::from(layer(&map));
        let json = JsonExporter::new(false).export(&layered).unwrap();

        assert_eq!(
            json,
            r#"{"order":["a","b"],"levels":{"a":0,"b":1},"cycle_edges":[],"node_types":{}}"#
        );
    }

    #[test]
    fn test_node_types_are_written() {
        let map: DependencyMap = [("data", vec![]), ("model", vec!["data"])]
            .into_iter()
            .collect();
        let node_types: IndexMap<NodeName, String> = [
            ("data".into(), "data".to_string()),
            ("model".into(), "model".to_string()),
        ]
        .into_iter()
        .collect();
        let layered = LayeredGraph::new(layer(&map), node_types);

        let json = JsonExporter::new(false).export(&layered).unwrap();
        assert!(json.ends_with(r#""node_types":{"data":"data","model":"model"}}"#));
    }

    #[test]
    fn test_pretty_output_is_multiline() {
        let map: DependencyMap = [("a", vec!["b"]), ("b", vec!["a"])].into_iter().collect();
        let json = JsonExporter::new(true)
            .export(&LayeredGraph::from(layer(&map)))
            .unwrap();

        assert!(json.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["cycle_edges"], serde_json::json!([["b", "a"]]));
    }
}

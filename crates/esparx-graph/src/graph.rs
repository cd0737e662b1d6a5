//! Parsed input and its layered form.
//!
//! A [`Graph`] is what [`LayeringBuilder::parse`](crate::LayeringBuilder::parse)
//! produces: the dependency map and, for registry input, the type of each
//! artifact. A [`LayeredGraph`] pairs the computed [`Layering`] with the type
//! of every laid-out node so a renderer can style nodes without going back to
//! the registry records.

use indexmap::IndexMap;
use serde::Serialize;

use esparx_layering::{DependencyMap, Layering, NodeName};

use crate::model::{Pipeline, UNKNOWN_ARTIFACT_TYPE};

/// A dependency graph ready to be laid out.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    map: DependencyMap,
    artifact_types: Option<IndexMap<NodeName, String>>,
}

impl Graph {
    /// Creates a graph from a bare dependency map, which carries no types.
    pub fn from_dependency_map(map: DependencyMap) -> Self {
        Self {
            map,
            artifact_types: None,
        }
    }

    /// Creates a graph from registry records, keeping each artifact's type.
    pub fn from_pipeline(pipeline: &Pipeline) -> Self {
        Self {
            map: pipeline.dependency_map(),
            artifact_types: Some(pipeline.artifact_types()),
        }
    }

    pub fn dependency_map(&self) -> &DependencyMap {
        &self.map
    }

    /// Returns `true` if the input described artifact types.
    pub fn has_artifact_types(&self) -> bool {
        self.artifact_types.is_some()
    }

    /// Returns the type of `node`.
    ///
    /// `None` for dependency-map input. Registry input answers
    /// [`UNKNOWN_ARTIFACT_TYPE`] for names that are not artifacts.
    pub fn artifact_type(&self, node: &str) -> Option<&str> {
        let types = self.artifact_types.as_ref()?;
        Some(types.get(node).map_or(UNKNOWN_ARTIFACT_TYPE, String::as_str))
    }

    /// Resolves the type of every node that received a level.
    pub(crate) fn node_types(&self, layering: &Layering) -> IndexMap<NodeName, String> {
        if !self.has_artifact_types() {
            return IndexMap::new();
        }

        layering
            .levels()
            .keys()
            .filter_map(|node| {
                let artifact_type = self.artifact_type(node)?;
                Some((node.clone(), artifact_type.to_string()))
            })
            .collect()
    }
}

/// A [`Layering`] together with the type of each node.
///
/// Serializes as the layering's fields followed by `node_types`, which is
/// empty when the input carried no types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LayeredGraph {
    #[serde(flatten)]
    layering: Layering,
    node_types: IndexMap<NodeName, String>,
}

impl LayeredGraph {
    pub fn new(layering: Layering, node_types: IndexMap<NodeName, String>) -> Self {
        Self {
            layering,
            node_types,
        }
    }

    pub fn layering(&self) -> &Layering {
        &self.layering
    }

    pub fn node_types(&self) -> &IndexMap<NodeName, String> {
        &self.node_types
    }

    /// Returns the type of `node`, if one was resolved.
    pub fn node_type(&self, node: &str) -> Option<&str> {
        self.node_types.get(node).map(String::as_str)
    }
}

impl From<Layering> for LayeredGraph {
    fn from(layering: Layering) -> Self {
        Self::new(layering, IndexMap::new())
    }
}

//! Registry records that describe a dependency graph.
//!
//! The registry serves artifacts and the connections between them. A
//! [`Pipeline`] bundles both and converts them into the [`DependencyMap`] the
//! layering consumes: each connection `source -> target` makes `source` a
//! predecessor of `target`.

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use esparx_layering::{DependencyMap, NodeName};

/// Type reported for names that have no artifact record or no type.
pub const UNKNOWN_ARTIFACT_TYPE: &str = "unknown";

/// A registered artifact (dataset, code, model, hyperparameters, results).
///
/// Only the fields needed for layout are kept; anything else in the record
/// is ignored on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Artifact {
    name: String,

    #[serde(default)]
    artifact_type: Option<String>,
}

impl Artifact {
    /// Creates an artifact with the given name and no type.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artifact_type: None,
        }
    }

    /// Sets the artifact type, e.g. `"data"` or `"model"`.
    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = Some(artifact_type.into());
        self
    }

    /// Returns the artifact name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the artifact type, if the record carried one.
    pub fn artifact_type(&self) -> Option<&str> {
        self.artifact_type.as_deref()
    }
}

/// Reference to an artifact by name.
///
/// Accepts both the nested `{"name": "..."}` form of connection responses and
/// a bare string as used when connections are created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "ArtifactRefRepr")]
pub struct ArtifactRef {
    name: String,
}

impl ArtifactRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ArtifactRefRepr {
    Name(String),
    Object { name: String },
}

impl From<ArtifactRefRepr> for ArtifactRef {
    fn from(repr: ArtifactRefRepr) -> Self {
        match repr {
            ArtifactRefRepr::Name(name) | ArtifactRefRepr::Object { name } => Self { name },
        }
    }
}

/// A directed connection: `target` was produced from `source`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Connection {
    source: ArtifactRef,
    target: ArtifactRef,
}

impl Connection {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: ArtifactRef::new(source),
            target: ArtifactRef::new(target),
        }
    }

    pub fn source(&self) -> &ArtifactRef {
        &self.source
    }

    pub fn target(&self) -> &ArtifactRef {
        &self.target
    }
}

/// Artifacts and connections of one pipeline, or of the global view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Pipeline {
    #[serde(default)]
    name: Option<String>,

    #[serde(default)]
    artifacts: Vec<Artifact>,

    #[serde(default)]
    connections: Vec<Connection>,
}

impl Pipeline {
    /// Creates a pipeline from its records.
    pub fn new(artifacts: Vec<Artifact>, connections: Vec<Connection>) -> Self {
        Self {
            name: None,
            artifacts,
            connections,
        }
    }

    /// Sets the pipeline name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn artifacts(&self) -> &[Artifact] {
        &self.artifacts
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// Builds the dependency map for this pipeline.
    ///
    /// Every artifact becomes a key, in artifact order, even without
    /// connections. Each connection then appends its source to its target's
    /// predecessors. A connection whose target is not one of the artifacts is
    /// dropped; one whose source is unknown is kept and becomes a dangling
    /// reference.
    pub fn dependency_map(&self) -> DependencyMap {
        let mut map = DependencyMap::new();
        for artifact in &self.artifacts {
            map.add_node(artifact.name());
        }

        for connection in &self.connections {
            let target = connection.target.name();
            if !map.contains(target) {
                debug!(
                    from = connection.source.name(),
                    to = target;
                    "Dropping connection to unknown artifact"
                );
                continue;
            }
            map.add_dependency(target, connection.source.name());
        }

        map
    }

    /// Maps each artifact name to its type, in artifact order.
    ///
    /// Artifacts without a type map to [`UNKNOWN_ARTIFACT_TYPE`]. If a name
    /// is listed twice, the first record wins.
    pub fn artifact_types(&self) -> IndexMap<NodeName, String> {
        let mut types = IndexMap::with_capacity(self.artifacts.len());
        for artifact in &self.artifacts {
            types
                .entry(NodeName::from(artifact.name()))
                .or_insert_with(|| {
                    artifact
                        .artifact_type()
                        .unwrap_or(UNKNOWN_ARTIFACT_TYPE)
                        .to_string()
                });
        }
        types
    }
}

//! e-SparX Graph - builds and lays out artifact dependency graphs.
//!
//! Reads registry records (artifacts and their connections) or a ready-made
//! dependency map, computes a cycle-tolerant layering and exports it as JSON
//! or text for a visualization layer to place on screen.

pub mod config;
pub mod export;
pub mod model;

mod error;
mod graph;

pub use esparx_layering::{DependencyMap, Layering, Level, NodeName, layer};

pub use error::EsparxError;
pub use graph::{Graph, LayeredGraph};

use log::{debug, info, trace, warn};

use config::{AppConfig, InputFormat};
use model::Pipeline;

/// Builder for reading, layering and exporting dependency graphs.
///
/// # Examples
///
/// ```rust
/// use esparx_graph::{LayeringBuilder, config::AppConfig};
///
/// let source = r#"{
///     "artifacts": [{"name": "data"}, {"name": "model"}],
///     "connections": [{"source": {"name": "data"}, "target": {"name": "model"}}]
/// }"#;
///
/// let builder = LayeringBuilder::new(AppConfig::default());
///
/// let graph = builder.parse(source).expect("Failed to parse");
/// let layered = builder.layer(&graph);
/// assert_eq!(layered.layering().level("model"), Some(1));
/// assert_eq!(layered.node_type("model"), Some("unknown"));
///
/// let json = builder.export(&layered).expect("Failed to export");
/// assert!(json.contains("\"node_types\""));
/// ```
#[derive(Default)]
pub struct LayeringBuilder {
    config: AppConfig,
}

impl LayeringBuilder {
    /// Create a new builder with the given configuration.
    ///
    /// # Arguments
    ///
    /// * `config` - Input and output settings
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration in use.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a source document into a [`Graph`].
    ///
    /// The configured [`InputFormat`] decides whether `source` is a registry
    /// export or a plain dependency map. Only registry exports carry
    /// artifact types.
    ///
    /// # Errors
    ///
    /// Returns [`EsparxError::Parse`] if `source` is not valid JSON of the
    /// expected shape.
    pub fn parse(&self, source: &str) -> Result<Graph, EsparxError> {
        let format = self.config.input().format();
        info!(format:%; "Parsing input");

        let graph = match format {
            InputFormat::Pipeline => {
                let pipeline: Pipeline = serde_json::from_str(source)
                    .map_err(|err| EsparxError::new_parse_error(err, format, source))?;
                debug!(
                    pipeline = pipeline.name().unwrap_or("<unnamed>"),
                    artifacts = pipeline.artifacts().len(),
                    connections = pipeline.connections().len();
                    "Pipeline records loaded"
                );
                Graph::from_pipeline(&pipeline)
            }
            InputFormat::DependencyMap => {
                let map: DependencyMap = serde_json::from_str(source)
                    .map_err(|err| EsparxError::new_parse_error(err, format, source))?;
                Graph::from_dependency_map(map)
            }
        };

        trace!(map:? = graph.dependency_map(); "Dependency map");
        Ok(graph)
    }

    /// Lay out a parsed graph.
    ///
    /// This never fails; cycles are reported through
    /// [`Layering::cycle_edges`] and logged as a warning. Every node that
    /// received a level is tagged with its artifact type when the input
    /// carried types.
    pub fn layer(&self, graph: &Graph) -> LayeredGraph {
        let map = graph.dependency_map();
        info!(nodes = map.len(); "Layering dependency graph");
        let layering = esparx_layering::layer(map);

        if layering.has_cycles() {
            warn!(
                cycle_edges = layering.cycle_edges().len();
                "Dependency graph contains cycles, levels of cycle members are approximate"
            );
        }
        info!(levels = layering.max_level().map_or(0, |max| max + 1); "Layering calculated");

        let node_types = graph.node_types(&layering);
        debug!(typed_nodes = node_types.len(); "Node types resolved");
        LayeredGraph::new(layering, node_types)
    }

    /// Export a layered graph with the configured
    /// [`OutputFormat`](config::OutputFormat).
    ///
    /// # Errors
    ///
    /// Returns [`EsparxError::Export`] if the exporter fails.
    pub fn export(&self, layered: &LayeredGraph) -> Result<String, EsparxError> {
        let exporter = export::exporter_for(self.config.output());
        let document = exporter.export(layered)?;
        info!(format:% = self.config.output().format(); "Layering exported");
        Ok(document)
    }
}

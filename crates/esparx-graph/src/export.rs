pub mod json;
pub mod text;

use crate::{
    config::{OutputConfig, OutputFormat},
    graph::LayeredGraph,
};

/// Turns a [`LayeredGraph`] into a document.
pub trait Exporter {
    fn export(&self, layered: &LayeredGraph) -> Result<String, Error>;
}

/// Builds the exporter selected by `config`.
pub fn exporter_for(config: &OutputConfig) -> Box<dyn Exporter> {
    match config.format() {
        OutputFormat::Json => Box::new(json::JsonExporter::new(config.pretty())),
        OutputFormat::Text => Box::new(text::TextExporter),
    }
}

#[derive(Debug)]
pub enum Error {
    Render(String),
    Json(serde_json::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Render(msg) => write!(f, "Render error: {msg}"),
            Self::Json(err) => write!(f, "JSON error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Render(_) => None,
            Self::Json(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

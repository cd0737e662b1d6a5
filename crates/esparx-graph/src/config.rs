//! Configuration types for e-SparX graph layering.
//!
//! This module provides configuration structures that control how input
//! documents are read and how layerings are exported. All types implement
//! [`serde::Deserialize`] for loading from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining input and output settings.
//! - [`InputConfig`] - Selects the [`InputFormat`] of the source document.
//! - [`OutputConfig`] - Selects the [`OutputFormat`] and its options.
//!
//! # Example
//!
//! ```
//! # use esparx_graph::config::{AppConfig, InputFormat, OutputFormat};
//! let config = AppConfig::default();
//! assert_eq!(config.input().format(), InputFormat::Pipeline);
//! assert_eq!(config.output().format(), OutputFormat::Json);
//! assert!(config.output().pretty());
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

/// Top-level configuration combining input and output settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Input configuration section.
    #[serde(default)]
    input: InputConfig,

    /// Output configuration section.
    #[serde(default)]
    output: OutputConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified input and output configurations.
    ///
    /// # Arguments
    ///
    /// * `input` - How source documents are interpreted.
    /// * `output` - How layerings are exported.
    pub fn new(input: InputConfig, output: OutputConfig) -> Self {
        Self { input, output }
    }

    /// Returns the input configuration.
    pub fn input(&self) -> &InputConfig {
        &self.input
    }

    /// Returns the output configuration.
    pub fn output(&self) -> &OutputConfig {
        &self.output
    }

    /// Replaces the input format, keeping everything else.
    pub fn with_input_format(mut self, format: InputFormat) -> Self {
        self.input.format = format;
        self
    }

    /// Replaces the output format, keeping everything else.
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output.format = format;
        self
    }
}

/// Input document configuration.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct InputConfig {
    /// Shape of the source document.
    #[serde(default)]
    format: InputFormat,
}

impl InputConfig {
    pub fn new(format: InputFormat) -> Self {
        Self { format }
    }

    /// Returns the [`InputFormat`] of source documents.
    pub fn format(&self) -> InputFormat {
        self.format
    }
}

/// Export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Export format.
    #[serde(default)]
    format: OutputFormat,

    /// Whether JSON output is indented.
    #[serde(default = "default_pretty")]
    pretty: bool,
}

fn default_pretty() -> bool {
    true
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

impl OutputConfig {
    /// Creates a new [`OutputConfig`].
    ///
    /// # Arguments
    ///
    /// * `format` - Export format.
    /// * `pretty` - Indent JSON output. Ignored by the text format.
    pub fn new(format: OutputFormat, pretty: bool) -> Self {
        Self { format, pretty }
    }

    /// Returns the [`OutputFormat`].
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Returns `true` if JSON output should be indented.
    pub fn pretty(&self) -> bool {
        self.pretty
    }
}

/// Shape of a source document.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// Registry export: `{"artifacts": [...], "connections": [...]}`.
    #[default]
    Pipeline,
    /// A JSON object mapping each node to its predecessors.
    DependencyMap,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pipeline => write!(f, "pipeline"),
            Self::DependencyMap => write!(f, "dependency-map"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pipeline" => Ok(Self::Pipeline),
            "dependency-map" => Ok(Self::DependencyMap),
            _ => Err(format!(
                "unknown input format `{s}`, expected `pipeline` or `dependency-map`"
            )),
        }
    }
}

/// Export format of a layering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// `{"order": [...], "levels": {...}, "cycle_edges": [...]}`.
    #[default]
    Json,
    /// One line per level, followed by detected cycle edges.
    Text,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Text => write!(f, "text"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "text" => Ok(Self::Text),
            _ => Err(format!(
                "unknown output format `{s}`, expected `json` or `text`"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();

        assert_eq!(config.input().format(), InputFormat::Pipeline);
        assert_eq!(config.output().format(), OutputFormat::Json);
        assert!(config.output().pretty());
    }

    #[test]
    fn test_full_document() {
        let config: AppConfig = toml::from_str(
            r#"
            [input]
            format = "dependency-map"

            [output]
            format = "text"
            pretty = false
            "#,
        )
        .unwrap();

        assert_eq!(config.input().format(), InputFormat::DependencyMap);
        assert_eq!(config.output().format(), OutputFormat::Text);
        assert!(!config.output().pretty());
    }

    #[test]
    fn test_partial_output_section_keeps_pretty_default() {
        let config: AppConfig = toml::from_str("[output]\nformat = \"json\"").unwrap();

        assert!(config.output().pretty());
    }

    #[test]
    fn test_unknown_format_is_rejected() {
        let result: Result<AppConfig, _> = toml::from_str("[input]\nformat = \"yaml\"");

        assert!(result.is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_input_format(InputFormat::DependencyMap)
            .with_output_format(OutputFormat::Text);

        assert_eq!(config.input().format(), InputFormat::DependencyMap);
        assert_eq!(config.output().format(), OutputFormat::Text);
        assert!(config.output().pretty());
    }

    #[test]
    fn test_format_names_round_trip_through_display() {
        for format in [InputFormat::Pipeline, InputFormat::DependencyMap] {
            assert_eq!(format.to_string().parse::<InputFormat>(), Ok(format));
        }
        for format in [OutputFormat::Json, OutputFormat::Text] {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
        assert!("svg".parse::<OutputFormat>().is_err());
    }
}

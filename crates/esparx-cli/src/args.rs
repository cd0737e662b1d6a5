//! Command-line argument definitions for the e-SparX layering CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, format overrides, and logging verbosity.

use clap::Parser;

use esparx_graph::config::{InputFormat, OutputFormat};

/// Command-line arguments for the e-SparX layering tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input JSON file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output file; prints to stdout when omitted
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Input format (pipeline, dependency-map), overrides the config file
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// Output format (json, text), overrides the config file
    #[arg(long)]
    pub output_format: Option<OutputFormat>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

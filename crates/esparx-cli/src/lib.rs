//! CLI logic for the e-SparX layering tool.
//!
//! This module contains the core CLI logic: it reads an input document,
//! lays out its dependency graph and writes the exported layering.

pub mod error_adapter;

mod args;
mod config;

pub use args::Args;

use std::{
    fs,
    io::{self, Write},
};

use log::info;

use esparx_graph::{EsparxError, LayeringBuilder};

/// Run the e-SparX layering CLI application
///
/// This function processes the input file through the layering pipeline
/// and writes the result to the output file, or to stdout when no output
/// path is given.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `EsparxError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Input parsing errors
/// - Export errors
pub fn run(args: &Args) -> Result<(), EsparxError> {
    info!(
        input_path = args.input,
        output_path:? = args.output;
        "Processing dependency graph"
    );

    // Load configuration, then apply command-line overrides
    let mut app_config = config::load_config(args.config.as_ref())?;
    if let Some(format) = args.input_format {
        app_config = app_config.with_input_format(format);
    }
    if let Some(format) = args.output_format {
        app_config = app_config.with_output_format(format);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder = LayeringBuilder::new(app_config);
    let graph = builder.parse(&source)?;
    let layered = builder.layer(&graph);
    let document = builder.export(&layered)?;

    match &args.output {
        Some(path) => {
            fs::write(path, document)?;
            info!(output_file = path; "Layering written");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(document.as_bytes())?;
            if !document.ends_with('\n') {
                writeln!(stdout)?;
            }
        }
    }

    Ok(())
}

//! `esparx-layer`: lays out a dependency graph read from a file.

use std::{process, str::FromStr};

use clap::Parser;
use log::{LevelFilter, debug, error, info};
use miette::GraphicalReportHandler;

use esparx_cli::{Args, error_adapter::to_reportable};
use esparx_graph::EsparxError;

fn main() {
    miette::set_panic_hook();

    let args = Args::parse();
    init_logging(&args.log_level);
    debug!(args:?; "Parsed arguments");

    if let Err(err) = esparx_cli::run(&args) {
        report(&err);
        process::exit(1);
    }

    info!("Layering finished");
}

/// Sets up env_logger, falling back to `warn` on an unrecognised level.
fn init_logging(level: &str) {
    let filter = LevelFilter::from_str(level).unwrap_or_else(|_| {
        eprintln!("Unknown log level '{level}', logging warnings only");
        LevelFilter::Warn
    });

    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(filter)
        .init();
    info!(log_level:? = filter; "Logger ready");
}

/// Logs `err` as a miette report, or as plain text if rendering fails.
fn report(err: &EsparxError) {
    let mut rendered = String::new();
    match GraphicalReportHandler::new().render_report(&mut rendered, &to_reportable(err)) {
        Ok(()) => error!("{rendered}"),
        Err(_) => error!("{err}"),
    }
}

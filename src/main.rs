//! Entry point: wires CLI → config → render → print.
//!
//! This is the thin orchestrator around `pipeline::run`. It installs the
//! error-report hooks, sets up logging, and is the only place an error
//! turns into a process exit.

mod anchor;
mod cli;
mod config;
mod error;
mod fsio;
mod pipeline;
mod printer;
mod render;

use std::io;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::config::Config;
use crate::printer::ChromiumPrinter;

fn main() -> color_eyre::Result<()> {
    // Install color_eyre error/panic hooks for readable reports.
    color_eyre::install()?;

    // Parse CLI arguments. Missing or empty flags exit here with usage.
    let cli = Cli::parse();

    // RUST_LOG wins over the -v/-q flags.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    let config = Config::from_cli(&cli)?;
    let printer = ChromiumPrinter::new(config.browser.as_str(), config.no_sandbox);

    match pipeline::run(&config, &printer) {
        Ok(outputs) => {
            debug!(html = %outputs.html.display(), "intermediate HTML kept");
            if !cli.quiet {
                println!("{}", outputs.pdf.display());
            }
            Ok(())
        }
        Err(err) => {
            // The report below carries the cause.
            error!(input = %config.input.display(), "conversion failed");
            Err(err.into())
        }
    }
}

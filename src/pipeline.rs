//! The conversion pipeline: markdown → HTML file → PDF file.
//!
//! Strictly linear. The first failing stage ends the run; outputs written
//! by earlier stages are left where they are.

use std::path::PathBuf;

use tracing::info;

use crate::config::Config;
use crate::error::Result;
use crate::fsio;
use crate::printer::PdfPrinter;
use crate::render;

/// Files produced by a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    pub html: PathBuf,
    pub pdf: PathBuf,
}

/// Runs all three stages for `config`, printing with `printer`.
pub fn run(config: &Config, printer: &dyn PdfPrinter) -> Result<Outputs> {
    let markdown = fsio::read_file(&config.input)?;
    info!(input = %config.input.display(), bytes = markdown.len(), "read markdown");

    let html = render::render_page(&markdown, &config.title(), &config.stylesheet);
    let html_path = config.html_path();
    fsio::write_file(&html_path, &html)?;
    info!(html = %html_path.display(), bytes = html.len(), "wrote HTML");

    let pdf_path = config.pdf_path();
    printer.print(&html_path, &pdf_path)?;
    info!(pdf = %pdf_path.display(), "wrote PDF");

    Ok(Outputs {
        html: html_path,
        pdf: pdf_path,
    })
}

#[cfg(test)]
#[path = "pipeline_tests.rs"]
mod tests;

//! PDF printing through an external headless browser.
//!
//! The pipeline only sees the `PdfPrinter` trait, so tests can swap in a
//! fake and never need a browser on `PATH`.

use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use tracing::{debug, info};

use crate::error::{Error, Result};

/// Prints an HTML file to a PDF file.
pub trait PdfPrinter {
    /// Blocks until `pdf` has been written from `html`, or fails.
    fn print(&self, html: &Path, pdf: &Path) -> Result<()>;
}

/// Drives a Chromium-family browser in headless print mode.
#[derive(Debug, Clone)]
pub struct ChromiumPrinter {
    program: String,
    no_sandbox: bool,
}

impl ChromiumPrinter {
    pub fn new(program: impl Into<String>, no_sandbox: bool) -> Self {
        Self {
            program: program.into(),
            no_sandbox,
        }
    }

    /// The browser command line, excluding the program itself.
    pub fn args(&self, html: &Path, pdf: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(7);
        if self.no_sandbox {
            args.push("--no-sandbox".into());
        }
        args.push("--disable-gpu".into());
        // No browser window.
        args.push("--headless".into());
        // No file name / date in the page margins.
        args.push("--print-to-pdf-no-header".into());
        // Print only once layout and compositing have finished.
        args.push("--run-all-compositor-stages-before-draw".into());

        let mut print_to = OsString::from("--print-to-pdf=");
        print_to.push(pdf.as_os_str());
        args.push(print_to);

        args.push(html.as_os_str().to_owned());
        args
    }
}

impl PdfPrinter for ChromiumPrinter {
    fn print(&self, html: &Path, pdf: &Path) -> Result<()> {
        let args = self.args(html, pdf);
        debug!(program = %self.program, ?args, "launching browser");
        info!(html = %html.display(), pdf = %pdf.display(), "printing PDF");

        // No timeout: a hung browser hangs us too.
        let status = Command::new(&self.program)
            .args(&args)
            .status()
            .map_err(|source| Error::BrowserLaunch {
                program: self.program.clone(),
                source,
            })?;

        if !status.success() {
            return Err(Error::BrowserFailed {
                program: self.program.clone(),
                status,
            });
        }

        debug!(%status, "browser exited");
        Ok(())
    }
}

#[cfg(test)]
#[path = "printer_tests.rs"]
mod tests;

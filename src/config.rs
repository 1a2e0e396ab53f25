//! Validated run configuration.
//!
//! Built once from the parsed CLI and handed to each pipeline stage by
//! reference. Nothing here is mutated after construction.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::cli::Cli;
use crate::error::{Error, Result};

/// Suffix appended to the input path for the intermediate HTML page.
pub const HTML_SUFFIX: &str = ".html";
/// Suffix appended to the input path for the printed PDF.
pub const PDF_SUFFIX: &str = ".pdf";

/// Settings for a single markdown → PDF conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Markdown source file.
    pub input: PathBuf,
    /// Stylesheet reference, emitted verbatim into the page's `<link>`.
    pub stylesheet: String,
    /// Headless browser program name or path.
    pub browser: String,
    /// Pass `--no-sandbox` to the browser.
    pub no_sandbox: bool,
}

impl Config {
    /// Builds a config, rejecting empty required values.
    pub fn new(
        input: impl Into<PathBuf>,
        stylesheet: impl Into<String>,
        browser: impl Into<String>,
    ) -> Result<Self> {
        let input = input.into();
        let stylesheet = stylesheet.into();
        let browser = browser.into();

        if input.as_os_str().is_empty() {
            return Err(Error::MissingArgument { flag: "input" });
        }
        if stylesheet.is_empty() {
            return Err(Error::MissingArgument { flag: "css" });
        }
        if browser.is_empty() {
            return Err(Error::MissingArgument { flag: "browser" });
        }

        Ok(Self {
            input,
            stylesheet,
            browser,
            no_sandbox: false,
        })
    }

    /// Builds a config from parsed command-line flags.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let mut config = Self::new(cli.input_path(), cli.css.as_str(), cli.browser.as_str())?;
        config.no_sandbox = cli.no_sandbox;
        Ok(config)
    }

    /// `<input>.html`, written next to the source.
    pub fn html_path(&self) -> PathBuf {
        with_suffix(&self.input, HTML_SUFFIX)
    }

    /// `<input>.pdf`, written next to the source.
    pub fn pdf_path(&self) -> PathBuf {
        with_suffix(&self.input, PDF_SUFFIX)
    }

    /// Page title: the input path exactly as supplied.
    pub fn title(&self) -> String {
        self.input.to_string_lossy().into_owned()
    }
}

/// Appends `suffix` to the full file name (`doc.md` → `doc.md.html`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut raw: OsString = path.as_os_str().to_owned();
    raw.push(suffix);
    PathBuf::from(raw)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

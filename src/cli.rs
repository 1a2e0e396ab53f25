//! CLI argument definition for litex.
//!
//! This module is intentionally free of non-clap dependencies; validation
//! beyond "present and non-empty" happens in `config`.

use std::path::PathBuf;

use clap::Parser;
use clap::builder::NonEmptyStringValueParser;

/// Headless browser invoked when `--browser` is not given.
pub const DEFAULT_BROWSER: &str = "chromium-browser";

/// LiTeX — Convert markdown files to PDF.
#[derive(Parser, Debug)]
#[command(
    name = "litex",
    version,
    about = "LiTeX — Convert markdown files to PDF",
    long_about = "LiTeX — Convert markdown files to PDF.\n\n\
Renders the markdown file to a standalone HTML page next to it \
(<input>.html), then prints that page to <input>.pdf with a headless browser."
)]
pub struct Cli {
    /// Markdown file to convert to PDF.
    #[arg(long, value_name = "PATH", value_parser = NonEmptyStringValueParser::new())]
    pub input: String,

    /// CSS file to apply to markdown.
    #[arg(long, value_name = "PATH", value_parser = NonEmptyStringValueParser::new())]
    pub css: String,

    /// Headless browser binary used to print the PDF.
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "LITEX_BROWSER",
        default_value = DEFAULT_BROWSER,
        value_parser = NonEmptyStringValueParser::new()
    )]
    pub browser: String,

    /// Run the browser without its sandbox (needed as root in containers).
    #[arg(long, env = "LITEX_NO_SANDBOX")]
    pub no_sandbox: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "LITEX_VERBOSE", conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "LITEX_QUIET")]
    pub quiet: bool,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "warn"
        }
    }

    /// The input path as a `PathBuf`.
    pub fn input_path(&self) -> PathBuf {
        PathBuf::from(&self.input)
    }
}

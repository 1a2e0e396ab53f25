//! Error taxonomy for the conversion pipeline.
//!
//! Every variant is fatal. Stages return `Err` straight up to `main`,
//! which logs it once and exits with a non-zero status.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

use thiserror::Error;

/// All failures the pipeline can produce.
#[derive(Debug, Error)]
pub enum Error {
    // ── Arguments ────────────────────────────────────────────────
    /// A required flag was empty.
    #[error("missing value for --{flag}\nPlease fill command line arguments. See --help for help.")]
    MissingArgument { flag: &'static str },

    // ── File I/O ─────────────────────────────────────────────────
    /// The markdown source (or any other input) could not be read.
    #[error("can not read file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The intermediate HTML could not be written.
    #[error("can not write file '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    // ── External browser ─────────────────────────────────────────
    /// The browser process could not be started at all.
    #[error("could not execute '{program}': {source}\nMaybe {program} is not installed?")]
    BrowserLaunch {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The browser ran but did not exit cleanly.
    #[error("'{program}' exited with {status}\nMaybe {program} is not installed correctly?")]
    BrowserFailed { program: String, status: ExitStatus },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

//! Whole-file read/write helpers that attach the failing path to errors.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

use crate::error::{Error, Result};

/// Permission bits for files we create: owner rw, group/other r.
#[cfg(unix)]
const FILE_MODE: u32 = 0o644;

/// Reads the entire file into memory.
pub fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `data` to `path`, creating or truncating it.
///
/// Not atomic: a failure part-way through can leave a truncated file.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let to_err = |source: io::Error| Error::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }

    let mut file = options.open(path).map_err(to_err)?;
    file.write_all(data).map_err(to_err)?;
    file.flush().map_err(to_err)
}

#[cfg(test)]
#[path = "fsio_tests.rs"]
mod tests;

//! Source Loader
//!
//! Reads the whole program text into memory before parsing starts. Input is
//! either drained from standard input or read from a file; both paths end in
//! the same UTF-8 check and the same optional size limit.

use std::fmt;
use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use crate::errors::{ExtractError, Result, Stage};

/// Where the program text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceInput {
    Stdin,
    File(PathBuf),
}

impl SourceInput {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(SourceInput::Stdin, SourceInput::File)
    }

    /// Name used for this input in diagnostics.
    pub fn origin(&self) -> String {
        match self {
            SourceInput::Stdin => "<stdin>".to_string(),
            SourceInput::File(path) => path.display().to_string(),
        }
    }

    /// Load the complete source text.
    ///
    /// An empty standard input yields an empty string, not an error.
    pub fn load(&self, max_input_bytes: Option<u64>) -> Result<String> {
        let origin = self.origin();
        match self {
            SourceInput::Stdin => read_from(io::stdin().lock(), &origin, max_input_bytes, 0),
            SourceInput::File(path) => {
                let io_error = |error| ExtractError::Io {
                    origin: origin.clone(),
                    error,
                };
                let file = File::open(path).map_err(io_error)?;
                let metadata = file.metadata().map_err(io_error)?;
                if metadata.is_dir() {
                    return Err(io_error(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        "is a directory",
                    )));
                }
                check_limit(metadata.len(), max_input_bytes)?;
                read_from(file, &origin, max_input_bytes, metadata.len())
            }
        }
    }
}

impl fmt::Display for SourceInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin())
    }
}

/// Drain `reader` to end-of-stream and decode the bytes as UTF-8.
///
/// `size_hint` pre-sizes the buffer; the limit is enforced on the bytes
/// actually read, so a reader that grows past its hint is still caught.
pub fn read_from<R: Read>(
    reader: R,
    origin: &str,
    max_input_bytes: Option<u64>,
    size_hint: u64,
) -> Result<String> {
    let mut buffer = Vec::new();
    let hint = max_input_bytes.map_or(size_hint, |max| size_hint.min(max));
    buffer
        .try_reserve_exact(usize::try_from(hint).unwrap_or(usize::MAX))
        .map_err(|e| ExtractError::resource_exhausted(Stage::Loading, e))?;

    // Read one byte past the limit to tell "exactly at the limit" from "over".
    let read = match max_input_bytes {
        Some(max) => reader.take(max.saturating_add(1)).read_to_end(&mut buffer),
        None => {
            let mut reader = reader;
            reader.read_to_end(&mut buffer)
        }
    };
    read.map_err(|error| ExtractError::Io {
        origin: origin.to_string(),
        error,
    })?;
    check_limit(buffer.len() as u64, max_input_bytes)?;

    String::from_utf8(buffer).map_err(|e| ExtractError::Undecodable {
        origin: origin.to_string(),
        error: e.utf8_error(),
    })
}

fn check_limit(len: u64, max_input_bytes: Option<u64>) -> Result<()> {
    match max_input_bytes {
        Some(max) if len > max => Err(ExtractError::resource_exhausted(
            Stage::Loading,
            format!("input is larger than the {} byte limit", max),
        )),
        _ => Ok(()),
    }
}

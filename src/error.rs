use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced while reading or parsing dotenv sources.
///
/// Only hard failures live here. A `$NAME` reference to an undefined
/// variable expands to the empty string, and requested names missing
/// from every source are reported through
/// [`Lookup::not_found`](crate::Lookup) instead.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// A source could not be opened or read to the end, e.g. the path
    /// is a directory or permission was denied.
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },

    /// A reader handed directly to [`parse`](crate::parse) or
    /// [`parse_into`](crate::parse_into) failed mid-stream.
    #[error("read error: {0}")]
    Io(#[from] io::Error),

    /// A non-ignored line carries neither `=` nor `:`, so no key can be
    /// separated from a value.
    #[error("line {lineno}: cannot separate key from value in {line:?}")]
    Format { lineno: usize, line: String },
}

//! Dotenv-style configuration with a configurable merge policy.
//!
//! `punto` parses `.env` documents into a string-to-string mapping,
//! merges any number of files with the process environment, and expands
//! `$NAME` / `${NAME}` references inside values.
//!
//! A `.env` file looks something like:
//!
//! ```text
//! SOME_ENV_VAR=somevalue
//! ```
//!
//! To read all variables from both the file and the system:
//!
//! ```no_run
//! let lookup = punto::get()?;
//! # Ok::<(), punto::Error>(())
//! ```
//!
//! By default dotenv variables take precedence over system variables;
//! set [`Options::system_first`] for the opposite. To check that
//! specific variables are available somewhere, list them in
//! [`Options::variables`] and inspect [`Lookup::not_found`]:
//!
//! ```no_run
//! use punto::Options;
//!
//! let options = Options {
//!     variables: vec!["ENV_VAR1".into(), "ENV_VAR2".into()],
//!     ..Options::default()
//! };
//! let lookup = options.get()?;
//! assert!(lookup.not_found.is_empty());
//! # Ok::<(), punto::Error>(())
//! ```
//!
//! Files other than `.env` work too:
//!
//! ```no_run
//! let lookup = punto::get_from(["file1", "file2"])?;
//! # Ok::<(), punto::Error>(())
//! ```
//!
//! Parse failures and unreadable files abort the lookup with an
//! [`Error`]; an interpolation reference to an undefined name is not an
//! error and expands to the empty string.

use std::path::PathBuf;

pub mod error;
pub use error::Error;
pub use error::Result;

pub mod options;
pub use options::read_files_into;
pub use options::Lookup;
pub use options::Options;
pub use options::DEFAULT_PATH;

mod merge;
mod parser;

pub use parser::parse;
pub use parser::parse_into;

/// Looks up every variable from [`DEFAULT_PATH`] and the process
/// environment with default options.
#[inline]
pub fn get() -> Result<Lookup> {
    Options::default().get()
}

/// Like [`get`], but reads the given files in order instead of
/// [`DEFAULT_PATH`].
#[inline]
pub fn get_from<I, P>(paths: I) -> Result<Lookup>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    let options = Options {
        files: paths.into_iter().map(Into::into).collect(),
        ..Options::default()
    };
    options.get()
}

use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::{merge, parser};

/// File read when [`Options::files`] is empty.
pub const DEFAULT_PATH: &str = ".env";

/// Lookup configuration with plain optional fields.
///
/// The zero value ([`Options::default`]) reads [`DEFAULT_PATH`],
/// resolves every variable, and lets file values override system ones.
///
/// ```no_run
/// use punto::Options;
///
/// let options = Options {
///     files: vec!["config/.env".into(), "config/local.env".into()],
///     variables: vec!["DATABASE_URL".into()],
///     system_first: true,
/// };
/// let lookup = options.get()?;
/// # Ok::<(), punto::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Sources to read, in order; later files overwrite earlier ones on
    /// key collision. Empty means `[".env"]`.
    pub files: Vec<PathBuf>,

    /// Names to resolve selectively. Empty means every variable from
    /// the files and the system environment.
    pub variables: Vec<String>,

    /// On collision the system value wins. Defaults to `false`: dotenv
    /// overrides system.
    pub system_first: bool,
}

/// Outcome of a lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Lookup {
    /// Resolved variables.
    pub variables: HashMap<String, String>,

    /// Requested names found in no source, in request order. Always
    /// empty in full-set mode; callers asking for specific variables
    /// must check it.
    pub not_found: Vec<String>,
}

impl Options {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configured files and resolves against a snapshot of
    /// the process environment.
    pub fn get(&self) -> Result<Lookup> {
        self.get_with_system(&merge::system_snapshot())
    }

    /// Like [`get`](Self::get) with a caller-supplied system snapshot.
    pub fn get_with_system(&self, system: &HashMap<String, String>) -> Result<Lookup> {
        let mut file_vars = HashMap::new();
        self.read_into(&mut file_vars)?;

        if self.variables.is_empty() {
            return Ok(Lookup {
                variables: merge::merge_all(file_vars, system, self.system_first),
                not_found: Vec::new(),
            });
        }

        let (variables, not_found) =
            merge::select(&self.variables, &file_vars, system, self.system_first);
        Ok(Lookup { variables, not_found })
    }

    fn read_into(&self, vars: &mut HashMap<String, String>) -> Result<()> {
        if self.files.is_empty() {
            return read_source(Path::new(DEFAULT_PATH), vars);
        }

        read_files_into(&self.files, vars)
    }
}

/// Reads and merges dotenv files in order, later files overwriting
/// earlier ones on key collision. The process environment is not
/// consulted.
///
/// The first failure stops aggregation and is returned; `vars` then
/// holds the merge of the fully-processed earlier sources, and the
/// failing source contributes nothing.
pub fn read_files_into<P: AsRef<Path>>(
    paths: &[P],
    vars: &mut HashMap<String, String>,
) -> Result<()> {
    for path in paths {
        read_source(path.as_ref(), vars)?;
    }

    Ok(())
}

fn read_source(path: &Path, vars: &mut HashMap<String, String>) -> Result<()> {
    let file = File::open(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;

    // Each document is parsed into a fresh mapping so interpolation
    // only sees same-document assignments, never earlier sources.
    let mut parsed = HashMap::new();
    parser::parse_into(BufReader::new(file), &mut parsed).map_err(|err| match err {
        Error::Io(source) => Error::Read {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;

    tracing::debug!(
        path = %path.display(),
        variables = parsed.len(),
        "parsed dotenv source"
    );
    vars.extend(parsed);

    Ok(())
}

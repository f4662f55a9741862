use std::collections::HashMap;
use std::env as stdenv;
use std::ffi::OsString;
use std::path::PathBuf;

/// Name of the path-list variable consulted for external commands.
pub const PATH_VAR: &str = "PATH";

/// Name of the variable `cd` falls back to when given no target.
pub const HOME_VAR: &str = "HOME";

/// User-level view of the process environment used by the dispatcher.
///
/// Lookups consult `vars` first and fall back to the live process
/// environment, so a value changed in the process after startup is seen on
/// the next lookup. Nothing is snapshotted.
///
/// `vars` starts empty; tests (and embedders) put overrides there instead of
/// mutating the process environment.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    /// Overrides that shadow variables of the same name in the process.
    pub vars: HashMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value of an environment variable.
    ///
    /// Looks up the key in `self.vars` first, falling back to `std::env::var_os`.
    pub fn get_var(&self, key: &str) -> Option<OsString> {
        self.vars
            .get(key)
            .map(OsString::from)
            .or_else(|| stdenv::var_os(key))
    }

    /// Set or override an environment variable in `self.vars`.
    pub fn set_var(&mut self, key: impl Into<String>, val: impl Into<String>) {
        self.vars.insert(key.into(), val.into());
    }

    /// Ordered list of directories to search, re-read on every call.
    ///
    /// An unset `PATH` gives an empty list. Empty entries of a set `PATH` are
    /// kept as empty paths, which join to names relative to the working
    /// directory.
    pub fn search_path(&self) -> Vec<PathBuf> {
        search_path_from(self.get_var(PATH_VAR))
    }

    /// The home directory, if `HOME` is set to something non-empty.
    pub fn home_dir(&self) -> Option<PathBuf> {
        self.get_var(HOME_VAR)
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
    }
}

/// Split a `PATH` value into its directories; `None` (unset) gives none.
pub fn search_path_from(value: Option<OsString>) -> Vec<PathBuf> {
    match value {
        Some(paths) => stdenv::split_paths(&paths).collect(),
        None => Vec::new(),
    }
}

//! Ordered directory search for bare library names.

use std::path::{Path, PathBuf};

use crate::types::DEFAULT_SEARCH_PATHS;

/// An ordered list of directories in which bare library names are looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// The directories, in lookup order.
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Return the first `dir/name` that is a regular file (symlinks are
    /// followed), or `None`. No recursion, no globbing.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        self.dirs
            .iter()
            .map(|dir| dir.join(name))
            .find(|candidate| candidate.is_file())
    }

    /// Insert `extra` directories right after a leading `.` entry (or at
    /// the front when there is none), keeping their relative order.
    pub fn with_extra_dirs(mut self, extra: &[PathBuf]) -> Self {
        let at = usize::from(self.dirs.first().is_some_and(|d| d == Path::new(".")));
        let tail = self.dirs.split_off(at);
        self.dirs.extend(extra.iter().cloned());
        self.dirs.extend(tail);
        self
    }
}

impl Default for SearchPath {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect())
    }
}

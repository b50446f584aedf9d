//! Static strategy: `DT_NEEDED` entries plus a directory search.

use std::path::{Path, PathBuf};

use crate::format::read_needed;
use crate::types::DepGraphResult;

use super::{DependencyRef, DependencySource, SearchPath};

/// Reads needed-library names straight from each artifact's dynamic section.
#[derive(Debug, Clone, Default)]
pub struct ElfSource {
    search_path: SearchPath,
}

impl ElfSource {
    pub fn new(search_path: SearchPath) -> Self {
        Self { search_path }
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }
}

impl DependencySource for ElfSource {
    fn direct_dependencies(&self, artifact: &Path) -> DepGraphResult<Vec<DependencyRef>> {
        let needed = read_needed(artifact)?;
        log::debug!("{}: {} needed entries", artifact.display(), needed.len());
        Ok(needed.into_iter().map(DependencyRef::named).collect())
    }

    fn locate(&self, dependency: &DependencyRef) -> Option<PathBuf> {
        self.search_path.resolve(&dependency.name)
    }
}

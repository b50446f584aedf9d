//! Run configuration with TOML persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::resolve::ldd_source::DEFAULT_LDD_COMMAND;
use crate::resolve::SearchPath;
use crate::types::{DepGraphError, DepGraphResult, DEFAULT_SEARCH_PATHS};

/// Settings for a dependency-graph run.
///
/// Every field is optional in the TOML file; missing fields take their
/// default values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directories the static strategy searches, in order.
    pub search_paths: Vec<PathBuf>,

    /// Loader-diagnostic command used by the dynamic strategy.
    pub ldd_command: String,

    /// Directory the dot file is written to.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: DEFAULT_SEARCH_PATHS.iter().map(PathBuf::from).collect(),
            ldd_command: DEFAULT_LDD_COMMAND.to_string(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> DepGraphResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DepGraphError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| DepGraphError::Config(format!("{}: {e}", path.display())))
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> DepGraphResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| DepGraphError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load from `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> DepGraphResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// The static-strategy resolver for these settings.
    pub fn search_path(&self) -> SearchPath {
        SearchPath::new(self.search_paths.clone())
    }

    /// Add extra search directories after the current directory.
    pub fn add_search_dirs(&mut self, extra: &[PathBuf]) {
        if extra.is_empty() {
            return;
        }
        self.search_paths = SearchPath::new(std::mem::take(&mut self.search_paths))
            .with_extra_dirs(extra)
            .dirs()
            .to_vec();
    }
}

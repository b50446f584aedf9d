//! Dynamic strategy: ask the system loader through `ldd`.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::format::parse_ldd_output;
use crate::types::{DepGraphError, DepGraphResult};

use super::{DependencyRef, DependencySource};

/// Default loader-diagnostic command.
pub const DEFAULT_LDD_COMMAND: &str = "ldd";

/// Runs the loader-diagnostic tool on each artifact and parses its report.
#[derive(Debug, Clone)]
pub struct LddSource {
    command: String,
}

impl LddSource {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the tool and return the dependency paths it reports.
    ///
    /// A tool that starts but exits unsuccessfully (e.g. "not a dynamic
    /// executable") yields an empty list with a warning.
    pub fn run(&self, artifact: &Path) -> DepGraphResult<Vec<PathBuf>> {
        let output = Command::new(&self.command)
            .arg(artifact)
            .output()
            .map_err(|source| DepGraphError::ToolUnavailable {
                tool: self.command.clone(),
                source,
            })?;

        if !output.status.success() {
            log::warn!(
                "{} failed on {} ({}): {}",
                self.command,
                artifact.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            );
            return Ok(Vec::new());
        }

        Ok(parse_ldd_output(&String::from_utf8_lossy(&output.stdout)))
    }
}

impl Default for LddSource {
    fn default() -> Self {
        Self::new(DEFAULT_LDD_COMMAND)
    }
}

impl DependencySource for LddSource {
    fn direct_dependencies(&self, artifact: &Path) -> DepGraphResult<Vec<DependencyRef>> {
        let paths = self.run(artifact)?;
        log::debug!("{}: {} reported by {}", artifact.display(), paths.len(), self.command);
        Ok(paths.into_iter().map(DependencyRef::at_path).collect())
    }

    /// The reported path, if it names an existing file. Bare names (from
    /// "not found" report lines) never resolve.
    fn locate(&self, dependency: &DependencyRef) -> Option<PathBuf> {
        dependency
            .path
            .as_ref()
            .filter(|path| path.parent().is_some_and(|dir| !dir.as_os_str().is_empty()))
            .filter(|path| path.is_file())
            .cloned()
    }
}

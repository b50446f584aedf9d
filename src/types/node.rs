//! Library nodes and their resolution state.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::LibraryName;

/// Where a library's backing artifact was found, if anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "status", content = "path", rename_all = "snake_case")]
pub enum Resolution {
    /// The artifact exists at this path.
    Resolved(PathBuf),
    /// No artifact could be located. The node is a terminal leaf.
    Unresolved,
}

impl Resolution {
    /// The resolved path, or `None` for an unresolved library.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Resolved(path) => Some(path),
            Self::Unresolved => None,
        }
    }

    /// Return a human-readable name for this state.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Resolved(_) => "resolved",
            Self::Unresolved => "unresolved",
        }
    }
}

/// One library in the dependency graph, keyed by its name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Node {
    /// Basename the library is referenced by.
    pub name: LibraryName,
    /// Resolution state, fixed when the node is created.
    pub resolution: Resolution,
}

impl Node {
    /// A node backed by an artifact at `path`.
    pub fn resolved(name: impl Into<LibraryName>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            resolution: Resolution::Resolved(path.into()),
        }
    }

    /// A node whose artifact could not be located.
    pub fn unresolved(name: impl Into<LibraryName>) -> Self {
        Self {
            name: name.into(),
            resolution: Resolution::Unresolved,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved(_))
    }
}

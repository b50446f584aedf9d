//! Dependency resolution strategies.
//!
//! A strategy answers two questions for the graph builder: what does this
//! artifact directly depend on, and where is the artifact behind a given
//! dependency. [`ElfSource`] reads `DT_NEEDED` entries and looks names up on
//! a [`SearchPath`]; [`LddSource`] asks the system loader via `ldd`, which
//! already reports concrete paths.

pub mod elf_source;
pub mod ldd_source;
pub mod search_path;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::format::DEFAULT_GRAPH_NAME;
use crate::types::{library_name, DepGraphError, DepGraphResult, LibraryName};

pub use elf_source::ElfSource;
pub use ldd_source::LddSource;
pub use search_path::SearchPath;

/// One direct dependency as reported by a strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRef {
    /// Node key for the dependency.
    pub name: LibraryName,
    /// Concrete path, when the strategy reports one.
    pub path: Option<PathBuf>,
}

impl DependencyRef {
    /// A dependency known only by its bare name.
    pub fn named(name: impl Into<LibraryName>) -> Self {
        Self {
            name: name.into(),
            path: None,
        }
    }

    /// A dependency reported as a path; its name is the basename.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        Self {
            name: library_name(&path),
            path: Some(path),
        }
    }
}

/// The capability the graph builder traverses with.
pub trait DependencySource {
    /// Direct dependencies of the artifact at `artifact`, in declaration order.
    ///
    /// Duplicates are reported as declared.
    fn direct_dependencies(&self, artifact: &Path) -> DepGraphResult<Vec<DependencyRef>>;

    /// Locate the artifact behind `dependency`, or `None` if it cannot be found.
    fn locate(&self, dependency: &DependencyRef) -> Option<PathBuf>;
}

impl<S: DependencySource + ?Sized> DependencySource for &S {
    fn direct_dependencies(&self, artifact: &Path) -> DepGraphResult<Vec<DependencyRef>> {
        (**self).direct_dependencies(artifact)
    }

    fn locate(&self, dependency: &DependencyRef) -> Option<PathBuf> {
        (**self).locate(dependency)
    }
}

impl<S: DependencySource + ?Sized> DependencySource for Box<S> {
    fn direct_dependencies(&self, artifact: &Path) -> DepGraphResult<Vec<DependencyRef>> {
        (**self).direct_dependencies(artifact)
    }

    fn locate(&self, dependency: &DependencyRef) -> Option<PathBuf> {
        (**self).locate(dependency)
    }
}

/// Which strategy governs a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Read `DT_NEEDED` entries from the ELF dynamic section.
    Elf,
    /// Query the system loader through `ldd`.
    Ldd,
}

impl Strategy {
    /// Short name, also used in output file names.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Elf => "elf",
            Self::Ldd => "ldd",
        }
    }

    /// Parse a strategy from its short name.
    pub fn from_name(name: &str) -> DepGraphResult<Self> {
        match name.to_lowercase().as_str() {
            "elf" | "static" => Ok(Self::Elf),
            "ldd" | "dynamic" => Ok(Self::Ldd),
            _ => Err(DepGraphError::UnknownStrategy(name.to_string())),
        }
    }

    /// Identifier of the rendered dot graph.
    pub fn graph_name(&self) -> String {
        match self {
            Self::Elf => DEFAULT_GRAPH_NAME.to_string(),
            Self::Ldd => format!("{DEFAULT_GRAPH_NAME} (via ldd)"),
        }
    }

    /// Build the source for this strategy from `config`.
    pub fn source(&self, config: &Config) -> Box<dyn DependencySource> {
        match self {
            Self::Elf => Box::new(ElfSource::new(config.search_path())),
            Self::Ldd => Box::new(LddSource::new(config.ldd_command.clone())),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

//! The dependency edge struct.

use serde::Serialize;

use super::LibraryName;

/// A directed "depends on" relationship between two libraries.
///
/// Edges are never deduplicated: two libraries depending on the same target
/// produce two edges, and a library declaring the same dependency twice
/// produces two edges with identical endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    /// The library that declares the dependency.
    pub source: LibraryName,
    /// The library being depended on.
    pub target: LibraryName,
    /// Discovery order, 1-based and unique across the whole traversal.
    pub order: u64,
}

impl Edge {
    /// Create a new edge.
    pub fn new(source: impl Into<LibraryName>, target: impl Into<LibraryName>, order: u64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            order,
        }
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} (#{})", self.source, self.target, self.order)
    }
}

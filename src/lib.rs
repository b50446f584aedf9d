//! elf-depgraph: shared-library dependency graphs for ELF artifacts.
//!
//! Walks the transitive `DT_NEEDED` closure of an executable or library,
//! either by reading each artifact's dynamic section or by asking the system
//! loader through `ldd`, and renders the result as a Graphviz dot digraph
//! whose edges carry their global discovery order.

pub mod cli;
pub mod config;
pub mod format;
pub mod graph;
pub mod resolve;
pub mod types;

// Re-export commonly used types at the crate root
pub use config::Config;
pub use format::{parse_ldd_output, parse_ldd_output_with, read_needed, DotWriter, ElfFile, MappedElf};
pub use graph::{DependencyGraph, GraphBuilder};
pub use resolve::{DependencyRef, DependencySource, ElfSource, LddSource, SearchPath, Strategy};
pub use types::{
    library_name, DepGraphError, DepGraphResult, Edge, LibraryName, Node, Resolution,
    DEFAULT_SEARCH_PATHS,
};

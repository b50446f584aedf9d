//! Error types for the elf-depgraph library.

use std::path::PathBuf;

use thiserror::Error;

/// All errors that can occur while building or rendering a dependency graph.
#[derive(Error, Debug)]
pub enum DepGraphError {
    /// The root artifact does not exist or is not a regular file.
    #[error("Root artifact not found: {}", .0.display())]
    RootNotFound(PathBuf),

    /// Invalid magic bytes in the ELF identification block.
    #[error("Invalid magic bytes in ELF header")]
    InvalidMagic,

    /// ELF class byte is neither ELFCLASS32 nor ELFCLASS64.
    #[error("Unsupported ELF class: {0}")]
    UnsupportedClass(u8),

    /// ELF data-encoding byte is neither little- nor big-endian.
    #[error("Unsupported ELF data encoding: {0}")]
    UnsupportedEncoding(u8),

    /// File is empty or a table runs past its end.
    #[error("File is empty or truncated")]
    Truncated,

    /// Corrupt data at a given offset.
    #[error("Corrupt data at offset {0}")]
    Corrupt(u64),

    /// The loader-diagnostic tool could not be started.
    #[error("Failed to invoke {tool}: {source}")]
    ToolUnavailable {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// A node with this name already exists in the graph.
    #[error("Library {0} is already a node in the graph")]
    DuplicateNode(String),

    /// An edge endpoint names a library with no node.
    #[error("Edge references unknown library: {0}")]
    UnknownNode(String),

    /// Edge order values are not the contiguous run 1..=E.
    #[error("Edge order out of sequence: expected {expected}, got {got}")]
    OrderGap { expected: u64, got: u64 },

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Unrecognised resolution strategy name.
    #[error("Unknown strategy: {0} (expected \"elf\" or \"ldd\")")]
    UnknownStrategy(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DepGraphError {
    /// True for errors meaning "this file is not a well-formed ELF artifact".
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::InvalidMagic
                | Self::UnsupportedClass(_)
                | Self::UnsupportedEncoding(_)
                | Self::Truncated
                | Self::Corrupt(_)
        )
    }
}

/// Convenience result type for elf-depgraph operations.
pub type DepGraphResult<T> = Result<T, DepGraphError>;

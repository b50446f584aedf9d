//! All data types for the elf-depgraph library.

pub mod edge;
pub mod error;
pub mod header;
pub mod node;

use std::path::Path;

pub use edge::Edge;
pub use error::{DepGraphError, DepGraphResult};
pub use header::{ElfClass, ElfHeader, Endian, SectionHeader};
pub use node::{Node, Resolution};

/// The basename a library is referenced by. Unique key for graph nodes.
pub type LibraryName = String;

/// Magic bytes at the start of every ELF file.
pub const ELF_MAGIC: [u8; 4] = [0x7F, b'E', b'L', b'F'];

/// Length of the ELF identification block.
pub const EI_NIDENT: usize = 16;

pub const ELFCLASS32: u8 = 1;
pub const ELFCLASS64: u8 = 2;
pub const ELFDATA2LSB: u8 = 1;
pub const ELFDATA2MSB: u8 = 2;

/// Section type of a string table.
pub const SHT_STRTAB: u32 = 3;
/// Section type of the dynamic-linking table.
pub const SHT_DYNAMIC: u32 = 6;

/// Dynamic tag terminating the table.
pub const DT_NULL: u64 = 0;
/// Dynamic tag naming a needed library.
pub const DT_NEEDED: u64 = 1;
/// Dynamic tag naming the artifact's own shared-object name.
pub const DT_SONAME: u64 = 14;

/// Directories the static resolver checks, in order.
pub const DEFAULT_SEARCH_PATHS: [&str; 5] = [".", "/lib", "/usr/lib", "/lib64", "/usr/lib64"];

/// Returns the basename of `path` as a library name.
///
/// Falls back to the whole path when it has no final component (e.g. `/`).
pub fn library_name(path: &Path) -> LibraryName {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

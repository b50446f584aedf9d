//! Binary and textual formats: ELF input, `ldd` reports, dot output.

pub mod dot;
pub mod elf;
pub mod ldd;

pub use dot::{DotWriter, DEFAULT_GRAPH_NAME};
pub use elf::{read_needed, ElfFile, MappedElf};
pub use ldd::{parse_ldd_output, parse_ldd_output_with};

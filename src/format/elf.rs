//! Dynamic-section access for ELF artifacts.

use std::path::Path;

use memmap2::Mmap;

use crate::types::error::{DepGraphError, DepGraphResult};
use crate::types::header::{ElfHeader, SectionHeader};
use crate::types::{LibraryName, DT_NEEDED, DT_NULL, DT_SONAME, EI_NIDENT, SHT_DYNAMIC};

/// A parsed view over the bytes of one ELF artifact.
pub struct ElfFile<'a> {
    data: &'a [u8],
    header: ElfHeader,
    sections: Vec<SectionHeader>,
}

impl<'a> ElfFile<'a> {
    /// Parse the file header and section table of `data`.
    pub fn parse(data: &'a [u8]) -> DepGraphResult<Self> {
        let header = ElfHeader::parse(data)?;
        let sections = read_section_table(data, &header)?;
        Ok(Self {
            data,
            header,
            sections,
        })
    }

    /// Get the file header.
    pub fn header(&self) -> &ElfHeader {
        &self.header
    }

    /// All section headers, in table order.
    pub fn sections(&self) -> &[SectionHeader] {
        &self.sections
    }

    /// The dynamic-linking section, if the artifact has one.
    pub fn dynamic_section(&self) -> Option<&SectionHeader> {
        self.sections.iter().find(|s| s.sh_type == SHT_DYNAMIC)
    }

    /// Names of all `DT_NEEDED` entries, in on-disk order.
    ///
    /// An artifact without a dynamic section has no needed libraries.
    /// Duplicate declarations are kept.
    pub fn needed_libraries(&self) -> DepGraphResult<Vec<LibraryName>> {
        let Some(dynamic) = self.dynamic_section() else {
            return Ok(Vec::new());
        };
        let strtab = self.linked_string_table(dynamic)?;

        let mut needed = Vec::new();
        for (tag, value) in self.dynamic_entries(dynamic)? {
            if tag == DT_NEEDED {
                needed.push(read_c_string(strtab, value)?);
            }
        }
        Ok(needed)
    }

    /// The artifact's own `DT_SONAME`, if it declares one.
    pub fn soname(&self) -> DepGraphResult<Option<LibraryName>> {
        let Some(dynamic) = self.dynamic_section() else {
            return Ok(None);
        };
        let strtab = self.linked_string_table(dynamic)?;
        for (tag, value) in self.dynamic_entries(dynamic)? {
            if tag == DT_SONAME {
                return read_c_string(strtab, value).map(Some);
            }
        }
        Ok(None)
    }

    /// Bytes of the string table named by `section.link`.
    fn linked_string_table(&self, section: &SectionHeader) -> DepGraphResult<&'a [u8]> {
        let index = usize::try_from(section.link).map_err(|_| DepGraphError::Truncated)?;
        let strtab = self
            .sections
            .get(index)
            .ok_or(DepGraphError::Corrupt(section.offset))?;
        let range = strtab.file_range(self.data.len())?;
        Ok(&self.data[range])
    }

    /// `(d_tag, d_val)` pairs up to the first `DT_NULL` or the section end.
    fn dynamic_entries(&self, section: &SectionHeader) -> DepGraphResult<Vec<(u64, u64)>> {
        let class = self.header.class;
        let endian = self.header.endian;
        let range = section.file_range(self.data.len())?;
        let table = &self.data[range];
        let step = class.dyn_entry_size();
        let word = step / 2;

        let mut entries = Vec::with_capacity(table.len() / step);
        for offset in (0..table.len()).step_by(step) {
            if offset + step > table.len() {
                break;
            }
            let tag = endian.read_word(class, table, offset)?;
            if tag == DT_NULL {
                break;
            }
            let value = endian.read_word(class, table, offset + word)?;
            entries.push((tag, value));
        }
        Ok(entries)
    }
}

/// Read every section header. A file without a section table yields none.
fn read_section_table(data: &[u8], header: &ElfHeader) -> DepGraphResult<Vec<SectionHeader>> {
    if header.section_table_offset == 0 {
        return Ok(Vec::new());
    }
    let table_start =
        usize::try_from(header.section_table_offset).map_err(|_| DepGraphError::Truncated)?;
    let entry_size = match usize::from(header.section_entry_size) {
        0 => header.class.section_header_size(),
        declared if declared < header.class.section_header_size() => {
            return Err(DepGraphError::Corrupt(header.section_table_offset));
        }
        declared => declared,
    };

    // Extended numbering: the real count lives in section 0's sh_size.
    let count = if header.section_count == 0 {
        let first = SectionHeader::parse(data, header, table_start)?;
        usize::try_from(first.size).map_err(|_| DepGraphError::Truncated)?
    } else {
        usize::from(header.section_count)
    };

    let table_len = count
        .checked_mul(entry_size)
        .ok_or(DepGraphError::Truncated)?;
    if table_start
        .checked_add(table_len)
        .map_or(true, |end| end > data.len())
    {
        return Err(DepGraphError::Truncated);
    }

    (0..count)
        .map(|i| SectionHeader::parse(data, header, table_start + i * entry_size))
        .collect()
}

/// Decode the NUL-terminated string at `offset` inside `strtab`.
fn read_c_string(strtab: &[u8], offset: u64) -> DepGraphResult<String> {
    let start = usize::try_from(offset).map_err(|_| DepGraphError::Corrupt(offset))?;
    let tail = strtab.get(start..).ok_or(DepGraphError::Corrupt(offset))?;
    let len = tail
        .iter()
        .position(|&b| b == 0)
        .ok_or(DepGraphError::Corrupt(offset))?;
    Ok(String::from_utf8_lossy(&tail[..len]).into_owned())
}

/// Read-only memory-mapped access to an ELF artifact on disk.
pub struct MappedElf {
    mmap: Mmap,
}

impl MappedElf {
    /// Map the file at `path`.
    pub fn open(path: &Path) -> DepGraphResult<Self> {
        let file = std::fs::File::open(path)?;
        if file.metadata()?.len() < EI_NIDENT as u64 {
            return Err(DepGraphError::Truncated);
        }
        // SAFETY: the mapping is read-only and lives no longer than `self`;
        // concurrent truncation by another process is outside our control,
        // as with any mmap reader.
        let mmap = unsafe { Mmap::map(&file)? };
        Ok(Self { mmap })
    }

    /// Parse the mapped bytes.
    pub fn elf(&self) -> DepGraphResult<ElfFile<'_>> {
        ElfFile::parse(&self.mmap)
    }
}

/// Needed-library names of the artifact at `path`, in on-disk order.
pub fn read_needed(path: &Path) -> DepGraphResult<Vec<LibraryName>> {
    let mapped = MappedElf::open(path)?;
    let elf = mapped.elf()?;
    elf.needed_libraries()
}

//! ELF file header and section header records.

use crate::types::error::{DepGraphError, DepGraphResult};
use crate::types::{ELFCLASS32, ELFCLASS64, ELFDATA2LSB, ELFDATA2MSB, ELF_MAGIC, EI_NIDENT};

/// Word size of the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElfClass {
    Elf32,
    Elf64,
}

impl ElfClass {
    /// Size of one section header record on disk.
    pub fn section_header_size(self) -> usize {
        match self {
            Self::Elf32 => 40,
            Self::Elf64 => 64,
        }
    }

    /// Size of one dynamic-section entry on disk.
    pub fn dyn_entry_size(self) -> usize {
        match self {
            Self::Elf32 => 8,
            Self::Elf64 => 16,
        }
    }

    /// Size of the ELF file header.
    pub fn header_size(self) -> usize {
        match self {
            Self::Elf32 => 52,
            Self::Elf64 => 64,
        }
    }
}

/// Byte order of every multi-byte field in the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endian {
    Little,
    Big,
}

impl Endian {
    fn bytes<const N: usize>(data: &[u8], offset: usize) -> DepGraphResult<[u8; N]> {
        let end = offset.checked_add(N).ok_or(DepGraphError::Truncated)?;
        data.get(offset..end)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(DepGraphError::Truncated)
    }

    pub fn read_u16(self, data: &[u8], offset: usize) -> DepGraphResult<u16> {
        let b = Self::bytes::<2>(data, offset)?;
        Ok(match self {
            Self::Little => u16::from_le_bytes(b),
            Self::Big => u16::from_be_bytes(b),
        })
    }

    pub fn read_u32(self, data: &[u8], offset: usize) -> DepGraphResult<u32> {
        let b = Self::bytes::<4>(data, offset)?;
        Ok(match self {
            Self::Little => u32::from_le_bytes(b),
            Self::Big => u32::from_be_bytes(b),
        })
    }

    pub fn read_u64(self, data: &[u8], offset: usize) -> DepGraphResult<u64> {
        let b = Self::bytes::<8>(data, offset)?;
        Ok(match self {
            Self::Little => u64::from_le_bytes(b),
            Self::Big => u64::from_be_bytes(b),
        })
    }

    /// Read an address-sized word: 4 bytes for ELF32, 8 for ELF64.
    pub fn read_word(self, class: ElfClass, data: &[u8], offset: usize) -> DepGraphResult<u64> {
        match class {
            ElfClass::Elf32 => self.read_u32(data, offset).map(u64::from),
            ElfClass::Elf64 => self.read_u64(data, offset),
        }
    }
}

/// The parts of the ELF file header needed to walk the section table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElfHeader {
    pub class: ElfClass,
    pub endian: Endian,
    /// Object file type (`e_type`).
    pub file_type: u16,
    /// Target architecture (`e_machine`).
    pub machine: u16,
    /// Byte offset of the section header table, 0 if absent.
    pub section_table_offset: u64,
    /// Size of one section header record as declared by the file.
    pub section_entry_size: u16,
    /// Section count as declared by `e_shnum` (0 may mean "extended").
    pub section_count: u16,
    /// Index of the section-name string table.
    pub section_names_index: u16,
}

impl ElfHeader {
    /// Parse the file header from the start of `data`.
    ///
    /// Field offsets (ELF32 / ELF64):
    /// - 0x00..0x10: identification (magic, class, data, version, ABI)
    /// - 0x10 / 0x10: e_type (u16)
    /// - 0x12 / 0x12: e_machine (u16)
    /// - 0x20 / 0x28: e_shoff (word)
    /// - 0x2E / 0x3A: e_shentsize (u16)
    /// - 0x30 / 0x3C: e_shnum (u16)
    /// - 0x32 / 0x3E: e_shstrndx (u16)
    pub fn parse(data: &[u8]) -> DepGraphResult<Self> {
        let ident = data.get(..EI_NIDENT).ok_or(DepGraphError::Truncated)?;
        if ident[..4] != ELF_MAGIC {
            return Err(DepGraphError::InvalidMagic);
        }

        let class = match ident[4] {
            ELFCLASS32 => ElfClass::Elf32,
            ELFCLASS64 => ElfClass::Elf64,
            other => return Err(DepGraphError::UnsupportedClass(other)),
        };
        let endian = match ident[5] {
            ELFDATA2LSB => Endian::Little,
            ELFDATA2MSB => Endian::Big,
            other => return Err(DepGraphError::UnsupportedEncoding(other)),
        };

        if data.len() < class.header_size() {
            return Err(DepGraphError::Truncated);
        }

        let (shoff_at, tail_at) = match class {
            ElfClass::Elf32 => (0x20, 0x2E),
            ElfClass::Elf64 => (0x28, 0x3A),
        };

        Ok(Self {
            class,
            endian,
            file_type: endian.read_u16(data, 0x10)?,
            machine: endian.read_u16(data, 0x12)?,
            section_table_offset: endian.read_word(class, data, shoff_at)?,
            section_entry_size: endian.read_u16(data, tail_at)?,
            section_count: endian.read_u16(data, tail_at + 2)?,
            section_names_index: endian.read_u16(data, tail_at + 4)?,
        })
    }
}

/// One entry of the section header table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionHeader {
    pub sh_type: u32,
    pub offset: u64,
    pub size: u64,
    pub link: u32,
    pub entry_size: u64,
}

impl SectionHeader {
    /// Parse the section header starting at `offset`.
    pub fn parse(data: &[u8], header: &ElfHeader, offset: usize) -> DepGraphResult<Self> {
        let e = header.endian;
        match header.class {
            ElfClass::Elf32 => Ok(Self {
                sh_type: e.read_u32(data, offset + 4)?,
                offset: e.read_u32(data, offset + 16)?.into(),
                size: e.read_u32(data, offset + 20)?.into(),
                link: e.read_u32(data, offset + 24)?,
                entry_size: e.read_u32(data, offset + 36)?.into(),
            }),
            ElfClass::Elf64 => Ok(Self {
                sh_type: e.read_u32(data, offset + 4)?,
                offset: e.read_u64(data, offset + 24)?,
                size: e.read_u64(data, offset + 32)?,
                link: e.read_u32(data, offset + 40)?,
                entry_size: e.read_u64(data, offset + 56)?,
            }),
        }
    }

    /// The byte range this section occupies in the file, bounds-checked.
    pub fn file_range(&self, file_len: usize) -> DepGraphResult<std::ops::Range<usize>> {
        let start = usize::try_from(self.offset).map_err(|_| DepGraphError::Truncated)?;
        let len = usize::try_from(self.size).map_err(|_| DepGraphError::Truncated)?;
        let end = start.checked_add(len).ok_or(DepGraphError::Truncated)?;
        if end > file_len {
            return Err(DepGraphError::Truncated);
        }
        Ok(start..end)
    }
}

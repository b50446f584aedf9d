//! Shared test fixtures: synthetic ELF images and an in-memory dependency source.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

use elf_depgraph::types::DepGraphError;
use elf_depgraph::{library_name, DepGraphResult, DependencyRef, DependencySource};

// ==================== Synthetic ELF images ====================

/// Shape of a synthetic ELF image.
#[derive(Debug, Clone)]
pub struct ElfSpec<'a> {
    pub class64: bool,
    pub big_endian: bool,
    pub needed: &'a [&'a str],
    pub soname: Option<&'a str>,
    /// Emit a dynamic section at all.
    pub dynamic: bool,
}

impl<'a> ElfSpec<'a> {
    pub fn elf64(needed: &'a [&'a str]) -> Self {
        Self {
            class64: true,
            big_endian: false,
            needed,
            soname: None,
            dynamic: true,
        }
    }

    pub fn elf32_be(needed: &'a [&'a str]) -> Self {
        Self {
            class64: false,
            big_endian: true,
            needed,
            soname: None,
            dynamic: true,
        }
    }

    pub fn statically_linked() -> Self {
        Self {
            class64: true,
            big_endian: false,
            needed: &[],
            soname: None,
            dynamic: false,
        }
    }
}

struct Buf {
    bytes: Vec<u8>,
    class64: bool,
    big: bool,
}

impl Buf {
    fn int(&mut self, value: u64, width: usize) {
        let le = value.to_le_bytes();
        let mut out = le[..width].to_vec();
        if self.big {
            out.reverse();
        }
        self.bytes.extend_from_slice(&out);
    }

    fn u16(&mut self, v: u64) {
        self.int(v, 2)
    }

    fn u32(&mut self, v: u64) {
        self.int(v, 4)
    }

    fn word(&mut self, v: u64) {
        self.int(v, if self.class64 { 8 } else { 4 })
    }

    fn align(&mut self, to: usize) {
        while self.bytes.len() % to != 0 {
            self.bytes.push(0);
        }
    }
}

/// Build an ELF image with a section table holding `[null, .dynstr, .dynamic]`
/// (or just `[null]` when `spec.dynamic` is false).
pub fn build_elf(spec: &ElfSpec) -> Vec<u8> {
    let header_size = if spec.class64 { 64 } else { 52 };
    let sh_size = if spec.class64 { 64 } else { 40 };
    let dyn_size = if spec.class64 { 16 } else { 8 };

    // .dynstr
    let mut dynstr = vec![0u8];
    let mut needed_offsets = Vec::new();
    for name in spec.needed {
        needed_offsets.push(dynstr.len() as u64);
        dynstr.extend_from_slice(name.as_bytes());
        dynstr.push(0);
    }
    let soname_offset = spec.soname.map(|name| {
        let off = dynstr.len() as u64;
        dynstr.extend_from_slice(name.as_bytes());
        dynstr.push(0);
        off
    });

    let mut body = Buf {
        bytes: vec![0u8; header_size],
        class64: spec.class64,
        big: spec.big_endian,
    };

    let dynstr_off = body.bytes.len() as u64;
    if spec.dynamic {
        body.bytes.extend_from_slice(&dynstr);
    }
    body.align(8);

    let dynamic_off = body.bytes.len() as u64;
    let mut dyn_count = 0u64;
    if spec.dynamic {
        for off in &needed_offsets {
            body.word(1);
            body.word(*off);
            dyn_count += 1;
        }
        if let Some(off) = soname_offset {
            body.word(14);
            body.word(off);
            dyn_count += 1;
        }
        body.word(0);
        body.word(0);
        dyn_count += 1;
    }
    body.align(8);

    let shoff = body.bytes.len() as u64;
    let section_count: u64 = if spec.dynamic { 3 } else { 1 };

    // null section
    body.bytes.extend(std::iter::repeat(0u8).take(sh_size));
    if spec.dynamic {
        section_header(&mut body, 3, dynstr_off, dynstr.len() as u64, 0, 0);
        section_header(
            &mut body,
            6,
            dynamic_off,
            dyn_count * dyn_size as u64,
            1,
            dyn_size as u64,
        );
    }

    // file header, written last now that offsets are known
    let mut head = Buf {
        bytes: Vec::new(),
        class64: spec.class64,
        big: spec.big_endian,
    };
    head.bytes.extend_from_slice(&[0x7F, b'E', b'L', b'F']);
    head.bytes.push(if spec.class64 { 2 } else { 1 });
    head.bytes.push(if spec.big_endian { 2 } else { 1 });
    head.bytes.push(1);
    head.bytes.extend_from_slice(&[0u8; 9]);
    head.u16(3); // e_type: ET_DYN
    head.u16(62); // e_machine
    head.u32(1); // e_version
    head.word(0); // e_entry
    head.word(0); // e_phoff
    head.word(shoff);
    head.u32(0); // e_flags
    head.u16(header_size as u64);
    head.u16(0); // e_phentsize
    head.u16(0); // e_phnum
    head.u16(sh_size as u64);
    head.u16(section_count);
    head.u16(0); // e_shstrndx
    assert_eq!(head.bytes.len(), header_size);

    body.bytes[..header_size].copy_from_slice(&head.bytes);
    body.bytes
}

fn section_header(buf: &mut Buf, sh_type: u64, offset: u64, size: u64, link: u64, entsize: u64) {
    buf.u32(0); // sh_name
    buf.u32(sh_type);
    buf.word(0); // sh_flags
    buf.word(0); // sh_addr
    buf.word(offset);
    buf.word(size);
    buf.u32(link);
    buf.u32(0); // sh_info
    buf.word(8); // sh_addralign
    buf.word(entsize);
}

/// Write a 64-bit little-endian library `name` needing `needed` into `dir`.
pub fn write_elf(dir: &Path, name: &str, needed: &[&str]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, build_elf(&ElfSpec::elf64(needed))).unwrap();
    path
}

// ==================== In-memory dependency source ====================

/// A dependency source backed by a name -> needed-names table.
///
/// Every library listed in `deps` locates to `/fake/<name>`; libraries in
/// `missing` never locate; libraries in `malformed` fail extraction.
/// Extraction calls are counted per library name.
#[derive(Default)]
pub struct FakeSource {
    pub deps: HashMap<String, Vec<String>>,
    pub missing: HashSet<String>,
    pub malformed: HashSet<String>,
    pub tool_missing: bool,
    pub calls: RefCell<HashMap<String, usize>>,
}

impl FakeSource {
    pub fn new(table: &[(&str, &[&str])]) -> Self {
        let deps = table
            .iter()
            .map(|(name, needed)| {
                (
                    name.to_string(),
                    needed.iter().map(|s| s.to_string()).collect(),
                )
            })
            .collect();
        Self {
            deps,
            ..Self::default()
        }
    }

    pub fn missing(mut self, name: &str) -> Self {
        self.missing.insert(name.to_string());
        self
    }

    pub fn malformed(mut self, name: &str) -> Self {
        self.malformed.insert(name.to_string());
        self
    }

    pub fn calls_for(&self, name: &str) -> usize {
        self.calls.borrow().get(name).copied().unwrap_or(0)
    }
}

impl DependencySource for FakeSource {
    fn direct_dependencies(&self, artifact: &Path) -> DepGraphResult<Vec<DependencyRef>> {
        let name = library_name(artifact);
        *self.calls.borrow_mut().entry(name.clone()).or_default() += 1;
        if self.tool_missing {
            return Err(DepGraphError::ToolUnavailable {
                tool: "fake-ldd".to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            });
        }
        if self.malformed.contains(&name) {
            return Err(DepGraphError::Corrupt(0));
        }
        Ok(self
            .deps
            .get(&name)
            .map(|needed| needed.iter().map(DependencyRef::named).collect())
            .unwrap_or_default())
    }

    fn locate(&self, dependency: &DependencyRef) -> Option<PathBuf> {
        if self.missing.contains(&dependency.name) {
            None
        } else {
            Some(PathBuf::from("/fake").join(&dependency.name))
        }
    }
}

/// Create an (empty) root artifact named `name` so the builder accepts it.
pub fn root_file(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"root").unwrap();
    path
}

/// Edges as `(source, target, order)` tuples for compact assertions.
pub fn edge_tuples(graph: &elf_depgraph::DependencyGraph) -> Vec<(String, String, u64)> {
    graph
        .edges()
        .iter()
        .map(|e| (e.source.clone(), e.target.clone(), e.order))
        .collect()
}

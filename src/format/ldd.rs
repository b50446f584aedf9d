//! Parsing of the loader-diagnostic (`ldd`) textual report.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

/// Trailing load-address annotation, e.g. ` (0x00007ffd5b5f1000)`.
static ADDRESS_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*\(0x[0-9a-fA-F]+\)\s*$").expect("address pattern is a valid regex")
});

/// Names of the kernel-provided virtual shared objects, which have no file.
const VDSO_MARKERS: [&str; 2] = ["linux-vdso.so", "linux-gate.so"];

/// Parse an `ldd` report into dependency paths, in report order.
///
/// Recognised line shapes:
/// - `libfoo.so.1 => /usr/lib/libfoo.so.1 (0x...)`: the path after `=>`.
/// - `libfoo.so.1 => not found`: the bare name `libfoo.so.1`, which never
///   resolves to a file and so becomes an unresolved node.
/// - `/lib64/ld-linux-x86-64.so.2 (0x...)`: the path, kept only if it is
///   absolute and `is_file` accepts it.
///
/// vDSO lines, blank lines and anything else are skipped.
pub fn parse_ldd_output_with(output: &str, is_file: impl Fn(&Path) -> bool) -> Vec<PathBuf> {
    let mut dependencies = Vec::new();

    for line in output.lines().map(str::trim) {
        if line.is_empty() || VDSO_MARKERS.iter().any(|m| line.contains(m)) {
            continue;
        }

        if let Some((name, target)) = line.split_once("=>") {
            let target = target.split('(').next().unwrap_or_default().trim();
            if target.is_empty() {
                continue;
            }
            if target == "not found" {
                let name = name.trim();
                if !name.is_empty() {
                    dependencies.push(PathBuf::from(name));
                }
                continue;
            }
            dependencies.push(PathBuf::from(target));
        } else {
            let candidate = ADDRESS_SUFFIX.replace(line, "");
            let candidate = Path::new(candidate.trim());
            if candidate.is_absolute() && is_file(candidate) {
                dependencies.push(candidate.to_path_buf());
            }
        }
    }

    dependencies
}

/// Parse an `ldd` report, checking bare paths against the real filesystem.
pub fn parse_ldd_output(output: &str) -> Vec<PathBuf> {
    parse_ldd_output_with(output, Path::is_file)
}

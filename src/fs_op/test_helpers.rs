//! Test-only helpers shared by the unit tests under `fs_op`, `scan` and `sync`.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

/// A scratch directory that does not count as hidden.
///
/// `tempfile` names its directories `.tmpXXXX` by default, and every path
/// below a dot folder is ignored by the scanner, so tests need their own
/// prefix.
pub fn scratch_dir() -> TempDir {
    tempfile::Builder::new()
        .prefix("binobj-test-")
        .tempdir()
        .expect("create scratch dir")
}

/// Write `contents` to `root/rel`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dirs");
    }
    fs::write(&path, contents).expect("write fixture file");
}

/// A minimal project file declaring the given output paths.
pub fn project_xml(output_paths: &[&str]) -> String {
    let mut xml = String::from("<Project Sdk=\"Microsoft.NET.Sdk\">\n");
    for p in output_paths {
        xml.push_str("  <PropertyGroup>\n");
        xml.push_str(&format!("    <OutputPath>{}</OutputPath>\n", p));
        xml.push_str("  </PropertyGroup>\n");
    }
    xml.push_str("</Project>\n");
    xml
}

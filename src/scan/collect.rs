//! Candidate discovery: walk the source tree for project and solution files
//! and derive the directories that should be redirected.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use super::extract::OutputPathExtractor;
use crate::app::settings::Settings;
use crate::errors::ScanError;
use crate::fs_op::path::{is_under_hidden_dir, normalize};

/// The directories found by one scan, split by kind.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Candidates {
    /// `obj`-style directories next to every project and solution.
    pub intermediate: BTreeSet<PathBuf>,
    /// Declared build output directories.
    pub output: BTreeSet<PathBuf>,
    pub projects: usize,
    pub solutions: usize,
}

impl Candidates {
    pub fn is_empty(&self) -> bool {
        self.intermediate.is_empty() && self.output.is_empty()
    }
}

/// Walks a source tree and classifies what it finds.
#[derive(Debug, Clone)]
pub struct Collector {
    extractor: OutputPathExtractor,
    project_extensions: Vec<String>,
    solution_extensions: Vec<String>,
    intermediate_dir: String,
}

impl Collector {
    pub fn new(settings: &Settings) -> Self {
        Self {
            extractor: OutputPathExtractor::new(settings.collapse_to_bin),
            project_extensions: settings.project_extensions.clone(),
            solution_extensions: settings.solution_extensions.clone(),
            intermediate_dir: settings.intermediate_dir.clone(),
        }
    }

    /// Scan `source_root` and return the two candidate sets.
    ///
    /// Dot folders are pruned from the walk, so nothing inside `.git`, `.vs`
    /// and the like contributes. Links are not followed, which also keeps the
    /// walk out of junctions created by earlier runs. Any walk or read failure
    /// aborts the scan.
    pub fn collect(&self, source_root: &Path) -> Result<Candidates, ScanError> {
        let source_root = normalize(source_root);
        let mut candidates = Candidates::default();

        let walker = WalkDir::new(&source_root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_dot_dir(e));

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            let Some(dir) = path.parent() else {
                continue;
            };
            // The root itself was validated by the caller; this covers
            // collectors driven directly from tests or other frontends.
            if is_under_hidden_dir(dir) {
                continue;
            }

            if has_extension(path, &self.project_extensions) {
                candidates.projects += 1;
                self.add_project(path, dir, &mut candidates)?;
            } else if has_extension(path, &self.solution_extensions) {
                candidates.solutions += 1;
                tracing::debug!("solution: {}", path.display());
                candidates.intermediate.insert(dir.join(&self.intermediate_dir));
            }
        }

        tracing::info!(
            "scanned {}: {} projects, {} solutions, {} intermediate and {} output candidates",
            source_root.display(),
            candidates.projects,
            candidates.solutions,
            candidates.intermediate.len(),
            candidates.output.len()
        );
        Ok(candidates)
    }

    fn add_project(&self, path: &Path, dir: &Path, candidates: &mut Candidates) -> Result<(), ScanError> {
        tracing::debug!("project: {}", path.display());
        let text = read_descriptor(path)?;

        // Normalized paths carry no trailing separator, so `bin` and `bin\`
        // land on the same set entry.
        candidates.output.extend(self.extractor.output_paths(&text, dir));
        candidates.intermediate.insert(dir.join(&self.intermediate_dir));
        Ok(())
    }
}

/// Read a descriptor as text.
///
/// Only I/O failures are errors. A UTF-16 byte order mark selects that
/// encoding, a UTF-8 one is dropped, and anything else is read as UTF-8 with
/// invalid bytes replaced, so a legacy code page descriptor still yields its
/// ASCII `<OutputPath>` values.
fn read_descriptor(path: &Path) -> Result<String, ScanError> {
    let bytes = fs::read(path).map_err(|source| ScanError::ReadDescriptor {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_text(&bytes))
}

fn decode_text(bytes: &[u8]) -> String {
    match bytes {
        [0xef, 0xbb, 0xbf, rest @ ..] => String::from_utf8_lossy(rest).into_owned(),
        [0xff, 0xfe, rest @ ..] => decode_utf16(rest, u16::from_le_bytes),
        [0xfe, 0xff, rest @ ..] => decode_utf16(rest, u16::from_be_bytes),
        _ => String::from_utf8_lossy(bytes).into_owned(),
    }
}

fn decode_utf16(bytes: &[u8], unit: fn([u8; 2]) -> u16) -> String {
    let units = bytes.chunks_exact(2).map(|pair| unit([pair[0], pair[1]]));
    char::decode_utf16(units)
        .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
        .collect()
}

fn is_dot_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir() && entry.file_name().to_string_lossy().starts_with('.')
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

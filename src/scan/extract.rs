//! Output path extraction from project files.
//!
//! This is deliberately a textual match on `<OutputPath>` elements rather than
//! an MSBuild evaluation: conditions, imports and property expansion are not
//! interpreted. Property references such as `$(Configuration)` therefore end
//! up as literal segments, which the `bin` collapse usually folds away.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};

use regex::Regex;

use crate::fs_op::path::{absolutize, is_under_hidden_dir};

/// How many trailing segments are searched for a `bin` boundary.
const BIN_SEARCH_DEPTH: usize = 4;

/// Extracts declared output directories from project file text.
///
/// Build one per run and share it; it owns the compiled pattern.
#[derive(Debug, Clone)]
pub struct OutputPathExtractor {
    pattern: Regex,
    collapse_to_bin: bool,
}

impl OutputPathExtractor {
    pub fn new(collapse_to_bin: bool) -> Self {
        // Literal pattern; compiling it cannot fail.
        let pattern = Regex::new(r"<OutputPath(?:\s[^>]*)?>([^<]+)</OutputPath>")
            .expect("OutputPath pattern compiles");
        Self {
            pattern,
            collapse_to_bin,
        }
    }

    /// Every declared output directory in `text`, resolved against
    /// `project_dir`.
    ///
    /// Results are absolute and normalized; declarations that land in a dot
    /// folder are dropped. Duplicates are left for the caller to collapse.
    pub fn output_paths<'a>(
        &'a self,
        text: &'a str,
        project_dir: &'a Path,
    ) -> impl Iterator<Item = PathBuf> + 'a {
        self.pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim())
            .filter(|fragment| !fragment.is_empty())
            .filter_map(move |fragment| self.resolve(fragment, project_dir))
    }

    fn resolve(&self, fragment: &str, project_dir: &Path) -> Option<PathBuf> {
        let fragment = fragment.replace(['\\', '/'], &MAIN_SEPARATOR.to_string());
        let resolved = absolutize(Path::new(&fragment), project_dir);

        if is_under_hidden_dir(&resolved) {
            tracing::debug!("ignoring output path in dot folder: {}", resolved.display());
            return None;
        }

        if self.collapse_to_bin {
            Some(collapse_to_bin(&resolved))
        } else {
            Some(resolved)
        }
    }
}

impl Default for OutputPathExtractor {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Truncate `path` at the nearest `bin` segment among its last few segments,
/// so `proj/bin/Debug/net8.0` becomes `proj/bin`. Paths without such a
/// segment are returned unchanged.
pub fn collapse_to_bin(path: &Path) -> PathBuf {
    let parts: Vec<Component> = path.components().collect();
    let n = parts.len();

    for back in 1..=BIN_SEARCH_DEPTH.min(n.saturating_sub(1)) {
        let idx = n - back;
        if let Component::Normal(name) = parts[idx] {
            if name.to_string_lossy().eq_ignore_ascii_case("bin") {
                return parts[..=idx].iter().collect();
            }
        }
    }
    path.to_path_buf()
}

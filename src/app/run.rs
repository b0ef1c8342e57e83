//! One complete pass: scan the source tree, then converge both candidate sets.

use std::path::Path;

use crate::app::settings::{OutputLayout, Settings};
use crate::errors::ScanError;
use crate::fs_op::path::{is_under_hidden_dir, normalize, PathError};
use crate::fs_op::JunctionOps;
use crate::scan::{Candidates, Collector};
use crate::sync::{CandidateKind, SyncReport, Synchronizer, TargetMapping};

/// Scan `source_root` and link its build directories under `junction_root`.
///
/// Intermediate directories mirror their relative path under the junction
/// root. Output directories go to the aggregate folder: all onto the folder
/// itself in the shared layout, each to its mirrored path in the mirrored
/// layout.
///
/// Only scan errors are returned; per-candidate failures are in the report.
pub fn run<J: JunctionOps>(
    source_root: &Path,
    junction_root: &Path,
    settings: &Settings,
    links: J,
) -> Result<SyncReport, ScanError> {
    let source_root = normalize(source_root);
    let junction_root = normalize(junction_root);
    if is_under_hidden_dir(&source_root) {
        return Err(PathError::Hidden(source_root).into());
    }

    let candidates = Collector::new(settings).collect(&source_root)?;
    Ok(synchronize_candidates(
        &source_root,
        &junction_root,
        &candidates,
        settings,
        links,
    ))
}

/// Converge already collected candidates.
pub fn synchronize_candidates<J: JunctionOps>(
    source_root: &Path,
    junction_root: &Path,
    candidates: &Candidates,
    settings: &Settings,
    links: J,
) -> SyncReport {
    let sync = Synchronizer::new(links);
    let aggregate_root = junction_root.join(&settings.aggregate_dir);
    let output_mapping = match settings.output_layout {
        OutputLayout::Shared => TargetMapping::Shared,
        OutputLayout::Mirrored => TargetMapping::Mirror,
    };

    let mut report = sync.synchronize(
        source_root,
        junction_root,
        &candidates.intermediate,
        CandidateKind::Intermediate,
        TargetMapping::Mirror,
    );
    report.merge(sync.synchronize(
        source_root,
        &aggregate_root,
        &candidates.output,
        CandidateKind::Output,
        output_mapping,
    ));
    report
}

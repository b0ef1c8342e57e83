use std::path::{Component, Path, PathBuf};

use super::report::{CandidateKind, JunctionEntry, Outcome, SyncReport};
use crate::fs_op::path::{absolutize, make_relative, normalize, same_path};
use crate::fs_op::{create, remove, JunctionOps, LinkError};

/// How a candidate's junction target is derived from the junction root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetMapping {
    /// `junction_root` joined with the candidate's path relative to the
    /// source root.
    Mirror,
    /// `junction_root` itself, shared by every candidate in the set.
    Shared,
}

/// Converges candidate directories onto junctions.
///
/// Every candidate is processed on its own: a failure is recorded in the
/// report and the batch carries on.
#[derive(Debug, Clone)]
pub struct Synchronizer<J> {
    links: J,
}

impl<J: JunctionOps> Synchronizer<J> {
    pub fn new(links: J) -> Self {
        Self { links }
    }

    /// Process one candidate set against `junction_root`.
    pub fn synchronize<I, P>(
        &self,
        source_root: &Path,
        junction_root: &Path,
        paths: I,
        kind: CandidateKind,
        mapping: TargetMapping,
    ) -> SyncReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = SyncReport::default();
        for path in paths {
            let source = normalize(path.as_ref());
            let (target, outcome) = match target_for(source_root, junction_root, &source, mapping) {
                Ok(target) => {
                    let outcome = self.converge(&source, &target).unwrap_or_else(Outcome::Failed);
                    (Some(target), outcome)
                }
                Err(err) => (None, Outcome::Failed(err)),
            };

            let entry = JunctionEntry {
                kind,
                source,
                target,
                outcome,
            };
            log_entry(&entry);
            report.push(entry);
        }
        report
    }

    fn converge(&self, path: &Path, target: &Path) -> Result<Outcome, LinkError> {
        let inspect = |source: std::io::Error| LinkError::Inspect {
            path: path.to_path_buf(),
            source,
        };

        if self.links.is_junction(path).map_err(inspect)? {
            let recorded = self.links.read_target(path).map_err(inspect)?;
            let recorded = match path.parent() {
                Some(parent) if recorded.is_relative() => absolutize(&recorded, parent),
                _ => recorded,
            };
            if !same_path(&recorded, target) {
                return Ok(Outcome::Conflict { existing: recorded });
            }
            return Ok(if create::ensure_dir(target)? {
                Outcome::Repaired
            } else {
                Outcome::AlreadyCorrect
            });
        }

        // A real directory can only make way for the junction when nothing
        // lives in it. Non-empty ones stay and the create below reports them.
        let cleared_stale_dir = path.is_dir() && remove::remove_empty_tree(path)?;

        create::ensure_parent_exists(path)?;
        create::ensure_dir(target)?;

        self.links
            .create(path, target)
            .map_err(|source| LinkError::Create {
                link: path.to_path_buf(),
                target: target.to_path_buf(),
                source,
            })?;
        Ok(Outcome::Created { cleared_stale_dir })
    }
}

/// Compute where `path` should point.
pub fn target_for(
    source_root: &Path,
    junction_root: &Path,
    path: &Path,
    mapping: TargetMapping,
) -> Result<PathBuf, LinkError> {
    match mapping {
        TargetMapping::Shared => Ok(normalize(junction_root)),
        TargetMapping::Mirror => {
            let unmappable = || LinkError::Unmappable {
                path: path.to_path_buf(),
            };
            let rel = make_relative(source_root, path).map_err(|_| unmappable())?;
            let escapes = rel.as_os_str().is_empty()
                || rel
                    .components()
                    .any(|c| !matches!(c, Component::Normal(_)));
            if escapes {
                return Err(unmappable());
            }
            Ok(normalize(&junction_root.join(rel)))
        }
    }
}

fn log_entry(entry: &JunctionEntry) {
    let source = entry.source.display();
    match &entry.outcome {
        Outcome::AlreadyCorrect => tracing::debug!("{} junction up to date: {}", entry.kind, source),
        Outcome::Repaired => tracing::info!("{} junction target recreated: {}", entry.kind, source),
        Outcome::Created { cleared_stale_dir } => tracing::info!(
            cleared_stale_dir = *cleared_stale_dir,
            "{} junction created: {}",
            entry.kind,
            source
        ),
        Outcome::Conflict { existing } => tracing::debug!(
            "{} junction points elsewhere, leaving it: {} -> {}",
            entry.kind,
            source,
            existing.display()
        ),
        Outcome::Failed(err) => tracing::warn!("{} junction failed: {}: {}", entry.kind, source, err),
    }
}

use std::fmt;
use std::path::{Path, PathBuf};

use crate::fs_op::LinkError;

/// Which candidate set a path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Intermediate,
    Output,
}

impl fmt::Display for CandidateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CandidateKind::Intermediate => write!(f, "intermediate"),
            CandidateKind::Output => write!(f, "output"),
        }
    }
}

/// What happened to one candidate.
#[derive(Debug)]
pub enum Outcome {
    /// The junction already pointed at the computed target; nothing changed.
    AlreadyCorrect,
    /// The junction was right but its target directory was missing and has
    /// been recreated.
    Repaired,
    /// A new junction was created. `cleared_stale_dir` is set when an empty
    /// real directory had to be removed first.
    Created { cleared_stale_dir: bool },
    /// A junction pointing somewhere else was found and left alone.
    Conflict { existing: PathBuf },
    Failed(LinkError),
}

impl Outcome {
    /// `true` for outcomes that changed something on disk.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Outcome::Repaired | Outcome::Created { .. })
    }
}

/// One processed candidate.
#[derive(Debug)]
pub struct JunctionEntry {
    pub kind: CandidateKind,
    pub source: PathBuf,
    /// `None` when no target could be computed for the source.
    pub target: Option<PathBuf>,
    pub outcome: Outcome,
}

impl JunctionEntry {
    /// Entries worth showing to the user: every change and every failure.
    pub fn is_notable(&self) -> bool {
        self.outcome.is_mutation() || matches!(self.outcome, Outcome::Failed(_))
    }
}

impl fmt::Display for JunctionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let target = self
            .target
            .as_deref()
            .map(Path::display)
            .map(|d| d.to_string())
            .unwrap_or_else(|| "?".to_string());

        match &self.outcome {
            Outcome::AlreadyCorrect => write!(f, "unchanged junction:")?,
            Outcome::Repaired => write!(f, "repaired junction:")?,
            Outcome::Created {
                cleared_stale_dir: true,
            } => write!(f, "junction (replaced empty directory):")?,
            Outcome::Created { .. } => write!(f, "junction:")?,
            Outcome::Conflict { existing } => {
                return write!(
                    f,
                    "skipped junction:\n  from {}\n    to {} (expected {})",
                    self.source.display(),
                    existing.display(),
                    target
                );
            }
            Outcome::Failed(_) => write!(f, "FAILED junction:")?,
        }
        write!(f, "\n  from {}\n    to {}", self.source.display(), target)?;
        if let Outcome::Failed(err) = &self.outcome {
            write!(f, "\n  error: {}", err)?;
        }
        Ok(())
    }
}

/// Per-candidate results of one or more synchronizer passes.
#[derive(Debug, Default)]
pub struct SyncReport {
    entries: Vec<JunctionEntry>,
}

impl SyncReport {
    pub fn push(&mut self, entry: JunctionEntry) {
        self.entries.push(entry);
    }

    /// Append the entries of another pass.
    pub fn merge(&mut self, other: SyncReport) {
        self.entries.extend(other.entries);
    }

    pub fn entries(&self) -> &[JunctionEntry] {
        &self.entries
    }

    pub fn entry_for(&self, source: &Path) -> Option<&JunctionEntry> {
        self.entries.iter().find(|e| e.source == source)
    }

    /// Changes and failures, in processing order.
    pub fn notable(&self) -> impl Iterator<Item = &JunctionEntry> {
        self.entries.iter().filter(|e| e.is_notable())
    }

    pub fn mutation_count(&self) -> usize {
        self.entries.iter().filter(|e| e.outcome.is_mutation()).count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &JunctionEntry> {
        self.entries
            .iter()
            .filter(|e| matches!(e.outcome, Outcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    pub fn summary(&self) -> Summary {
        let mut s = Summary::default();
        for entry in &self.entries {
            match entry.outcome {
                Outcome::AlreadyCorrect => s.unchanged += 1,
                Outcome::Repaired => s.repaired += 1,
                Outcome::Created { .. } => s.created += 1,
                Outcome::Conflict { .. } => s.conflicts += 1,
                Outcome::Failed(_) => s.failed += 1,
            }
        }
        s
    }
}

/// Outcome counts for the closing status line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub repaired: usize,
    pub unchanged: usize,
    pub conflicts: usize,
    pub failed: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} created, {} repaired, {} unchanged, {} skipped, {} failed",
            self.created, self.repaired, self.unchanged, self.conflicts, self.failed
        )
    }
}

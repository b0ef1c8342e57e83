//! Junction convergence for discovered candidates.

pub mod report;
pub mod synchronizer;

pub use report::{CandidateKind, JunctionEntry, Outcome, Summary, SyncReport};
pub use synchronizer::{target_for, Synchronizer, TargetMapping};

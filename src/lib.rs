//! binobj-junction
//!
//! Finds the build output directories of a .NET style source tree (the `obj`
//! folder next to every project and solution, and the `bin` folders declared
//! through `<OutputPath>`) and replaces them with directory junctions into a
//! separate junction root. Builds keep writing to `bin`/`obj` as usual while
//! the bytes live outside the checkout.
//!
//! Layers, leaf first:
//! - [`fs_op`]: path arithmetic, directory helpers and the link primitive.
//! - [`scan`]: project/solution discovery and `<OutputPath>` extraction.
//! - [`sync`]: per-candidate convergence and the resulting report.
//! - [`app`]: settings and the top-level [`app::run`].

pub mod app;
pub mod errors;
pub mod fs_op;
pub mod scan;
pub mod sync;

// Re-export commonly used items
pub use app::{run, OutputLayout, Settings};
pub use errors::{ScanError, SettingsError};
pub use fs_op::{JunctionOps, LinkError, NativeJunctions, PathError};
pub use scan::{Candidates, Collector, OutputPathExtractor};
pub use sync::{CandidateKind, JunctionEntry, Outcome, SyncReport, Synchronizer, TargetMapping};

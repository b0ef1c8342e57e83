//! Application layer: settings and the top-level run.

pub mod run;
pub mod settings;

pub use run::{run, synchronize_candidates};
pub use settings::{load_settings, OutputLayout, Settings};

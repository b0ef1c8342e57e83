//! Discovery of the directories to redirect.

pub mod collect;
pub mod extract;

pub use collect::{Candidates, Collector};
pub use extract::OutputPathExtractor;

//! Filesystem primitives: path arithmetic, directory creation and cleanup,
//! and the directory link abstraction.

pub mod create;
pub mod error;
pub mod junction;
pub mod path;
pub mod remove;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use error::LinkError;
pub use junction::{JunctionOps, NativeJunctions};
pub use path::PathError;

use std::io;
use std::path::Path;

/// Create `path` and any missing parents.
///
/// Returns `true` when the directory had to be created and `false` when it was
/// already there, so callers can tell a repair from a no-op.
pub fn ensure_dir(path: &Path) -> io::Result<bool> {
    if path.is_dir() {
        return Ok(false);
    }
    std::fs::create_dir_all(path)?;
    Ok(true)
}

/// Ensure the parent directory of `path` exists.
pub fn ensure_parent_exists(path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

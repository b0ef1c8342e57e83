//! Directory link primitive.
//!
//! On Windows a redirected directory is an NTFS junction (created through the
//! `junction` crate, no elevation required). On Unix the closest equivalent is
//! a directory symbolic link. Callers only see the [`JunctionOps`] trait, so
//! the synchronizer and its tests do not care which one is in play.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// The operations the synchronizer needs from the platform.
///
/// Each call is expected to be atomic on its own and to report failures per
/// path through `io::Result`.
pub trait JunctionOps {
    /// Returns `true` when `path` itself is a junction. The link is not
    /// followed, so a junction whose target is gone still counts.
    fn is_junction(&self, path: &Path) -> io::Result<bool>;

    /// Read the recorded target of the junction at `path`.
    fn read_target(&self, path: &Path) -> io::Result<PathBuf>;

    /// Create a junction at `link` pointing at the existing directory `target`.
    /// Fails if anything already occupies `link`.
    fn create(&self, link: &Path, target: &Path) -> io::Result<()>;
}

/// [`JunctionOps`] backed by the running platform.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeJunctions;

impl JunctionOps for NativeJunctions {
    fn is_junction(&self, path: &Path) -> io::Result<bool> {
        let meta = match fs::symlink_metadata(path) {
            Ok(meta) => meta,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e),
        };
        if !meta.file_type().is_symlink() {
            return Ok(false);
        }

        #[cfg(windows)]
        {
            // Symlinks and junctions share the reparse-point bit; only the
            // mount-point flavour is ours.
            Ok(junction::get_target(path).is_ok())
        }

        #[cfg(not(windows))]
        {
            Ok(true)
        }
    }

    fn read_target(&self, path: &Path) -> io::Result<PathBuf> {
        #[cfg(windows)]
        {
            junction::get_target(path)
        }

        #[cfg(not(windows))]
        {
            fs::read_link(path)
        }
    }

    fn create(&self, link: &Path, target: &Path) -> io::Result<()> {
        #[cfg(windows)]
        {
            junction::create(target, link)
        }

        #[cfg(unix)]
        {
            std::os::unix::fs::symlink(target, link)
        }

        #[cfg(not(any(windows, unix)))]
        {
            let _ = (link, target);
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "directory links are not supported on this platform",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_op::test_helpers::scratch_dir;

    #[test]
    fn create_then_read_back_target() -> io::Result<()> {
        let tmp = scratch_dir();
        let target = tmp.path().join("store");
        fs::create_dir(&target)?;
        let link = tmp.path().join("obj");

        NativeJunctions.create(&link, &target)?;

        assert!(NativeJunctions.is_junction(&link)?);
        assert_eq!(NativeJunctions.read_target(&link)?, target);
        // The link resolves to the target directory.
        assert!(link.is_dir());
        Ok(())
    }

    #[test]
    fn plain_directory_is_not_a_junction() -> io::Result<()> {
        let tmp = scratch_dir();
        let dir = tmp.path().join("obj");
        fs::create_dir(&dir)?;
        assert!(!NativeJunctions.is_junction(&dir)?);
        Ok(())
    }

    #[test]
    fn missing_path_is_not_a_junction() -> io::Result<()> {
        let tmp = scratch_dir();
        assert!(!NativeJunctions.is_junction(&tmp.path().join("nope"))?);
        Ok(())
    }

    #[test]
    fn dangling_junction_is_still_detected() -> io::Result<()> {
        let tmp = scratch_dir();
        let target = tmp.path().join("gone");
        fs::create_dir(&target)?;
        let link = tmp.path().join("obj");
        NativeJunctions.create(&link, &target)?;
        fs::remove_dir(&target)?;

        assert!(NativeJunctions.is_junction(&link)?);
        assert_eq!(NativeJunctions.read_target(&link)?, target);
        Ok(())
    }

    #[test]
    fn create_over_existing_directory_fails() -> io::Result<()> {
        let tmp = scratch_dir();
        let target = tmp.path().join("store");
        fs::create_dir(&target)?;
        let link = tmp.path().join("obj");
        fs::create_dir(&link)?;
        fs::write(link.join("keep.txt"), b"x")?;

        assert!(NativeJunctions.create(&link, &target).is_err());
        assert!(link.join("keep.txt").exists());
        Ok(())
    }
}

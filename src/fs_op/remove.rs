use std::fs;
use std::io;
use std::path::Path;

/// Returns `true` when nothing but (possibly nested) empty directories lives
/// under `path`.
///
/// Any file makes the tree non-empty, and so does any link: a link is never
/// followed, because its target belongs to someone else and must not be
/// walked or deleted through it.
pub fn is_tree_empty(path: &Path) -> io::Result<bool> {
    for entry in fs::read_dir(path)? {
        let entry = entry?;
        // `DirEntry::file_type` does not follow links. On Windows junctions
        // report as symlinks here as well.
        let file_type = entry.file_type()?;
        if file_type.is_symlink() || !file_type.is_dir() {
            return Ok(false);
        }
        if !is_tree_empty(&entry.path())? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Remove a stale directory tree so a junction can take its place.
///
/// The tree is re-checked right before removal; a tree that gained content in
/// the meantime is left alone and `Ok(false)` is returned.
pub fn remove_empty_tree(path: &Path) -> io::Result<bool> {
    if !is_tree_empty(path)? {
        return Ok(false);
    }
    fs::remove_dir_all(path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_op::junction::{JunctionOps, NativeJunctions};
    use crate::fs_op::test_helpers::scratch_dir;

    #[test]
    fn nested_empty_directories_are_empty() {
        let td = scratch_dir();
        let obj = td.path().join("obj");
        fs::create_dir_all(obj.join("Debug/net8.0")).unwrap();
        fs::create_dir_all(obj.join("Release")).unwrap();
        assert!(is_tree_empty(&obj).unwrap());
    }

    #[test]
    fn deep_file_makes_tree_non_empty() {
        let td = scratch_dir();
        let obj = td.path().join("obj");
        fs::create_dir_all(obj.join("Debug/net8.0")).unwrap();
        fs::write(obj.join("Debug/net8.0/app.dll"), b"x").unwrap();
        assert!(!is_tree_empty(&obj).unwrap());
    }

    #[test]
    fn nested_link_makes_tree_non_empty() {
        let td = scratch_dir();
        let elsewhere = td.path().join("elsewhere");
        fs::create_dir_all(&elsewhere).unwrap();
        let obj = td.path().join("obj");
        fs::create_dir_all(&obj).unwrap();
        NativeJunctions
            .create(&obj.join("linked"), &elsewhere)
            .unwrap();

        // The link target is empty, but the link itself still counts.
        assert!(!is_tree_empty(&obj).unwrap());
    }

    #[test]
    fn remove_empty_tree_deletes_only_empty_trees() {
        let td = scratch_dir();
        let empty = td.path().join("empty");
        fs::create_dir_all(empty.join("a/b")).unwrap();
        assert!(remove_empty_tree(&empty).unwrap());
        assert!(!empty.exists());

        let full = td.path().join("full");
        fs::create_dir_all(&full).unwrap();
        fs::write(full.join("f.txt"), b"x").unwrap();
        assert!(!remove_empty_tree(&full).unwrap());
        assert!(full.join("f.txt").exists());
    }
}

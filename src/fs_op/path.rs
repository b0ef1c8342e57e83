use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Errors that can occur when resolving or relating paths.
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    Empty,
    Hidden(PathBuf),
    NotFound(PathBuf),
    NotDirectory(PathBuf),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathError::Empty => write!(f, "empty path"),
            PathError::Hidden(p) => write!(
                f,
                "path must not be inside a dot folder (like .git or .svn): {}",
                p.display()
            ),
            PathError::NotFound(p) => write!(f, "path does not exist: {}", p.display()),
            PathError::NotDirectory(p) => write!(f, "not a directory: {}", p.display()),
        }
    }
}

impl std::error::Error for PathError {}

/// Returns `true` when any segment of `path` is a dot folder such as `.git`.
///
/// `.` and `..` are navigation, not folder names, and never count.
pub fn is_under_hidden_dir(path: &Path) -> bool {
    path.components().any(|c| match c {
        Component::Normal(name) => name.to_string_lossy().starts_with('.'),
        _ => false,
    })
}

/// Lexically collapse `.` and `..` segments and drop trailing separators.
///
/// The filesystem is never consulted, so links inside `path` are not
/// resolved. A `..` at the root stays at the root; leading `..` segments of a
/// relative path are kept.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Resolve `path` against `base` when it is relative, then normalize.
pub fn absolutize(path: &Path, base: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&base.join(path))
    }
}

/// Resolve and validate a user-supplied root directory.
///
/// Behaviour:
/// - Empty `input` is an error.
/// - Relative paths are resolved relative to `base`.
/// - The result must not sit inside a dot folder.
/// - The result must exist and be a directory.
pub fn resolve_root(input: &str, base: &Path) -> Result<PathBuf, PathError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PathError::Empty);
    }

    let candidate = absolutize(Path::new(input), base);

    if is_under_hidden_dir(&candidate) {
        return Err(PathError::Hidden(candidate));
    }
    if !candidate.exists() {
        return Err(PathError::NotFound(candidate));
    }
    if !candidate.is_dir() {
        return Err(PathError::NotDirectory(candidate));
    }
    Ok(candidate)
}

/// Compute `to_path` relative to `from_root`.
///
/// When the two paths do not share an absolute-path scheme (different drive
/// or UNC prefix, or one rooted and one not) no relative form exists and
/// `to_path` is returned unchanged; callers must be prepared for that.
pub fn make_relative(from_root: &Path, to_path: &Path) -> Result<PathBuf, PathError> {
    if from_root.as_os_str().is_empty() || to_path.as_os_str().is_empty() {
        return Err(PathError::Empty);
    }

    let from = normalize(from_root);
    let to = normalize(to_path);

    if scheme(&from) != scheme(&to) {
        return Ok(to_path.to_path_buf());
    }

    let from_parts: Vec<Component> = from.components().collect();
    let to_parts: Vec<Component> = to.components().collect();
    let common = from_parts
        .iter()
        .zip(to_parts.iter())
        .take_while(|(a, b)| same_component(a, b))
        .count();

    let mut rel = PathBuf::new();
    for _ in common..from_parts.len() {
        rel.push("..");
    }
    for part in &to_parts[common..] {
        rel.push(part.as_os_str());
    }
    Ok(rel)
}

/// Compare two paths after normalization. Windows paths compare without
/// regard to ASCII case, matching the filesystem.
pub fn same_path(a: &Path, b: &Path) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if cfg!(windows) {
        a.to_string_lossy()
            .eq_ignore_ascii_case(&b.to_string_lossy())
    } else {
        a == b
    }
}

// The leading prefix/root components, which decide whether two paths can be
// related at all.
fn scheme(path: &Path) -> (Option<String>, bool) {
    let mut prefix = None;
    let mut rooted = false;
    for component in path.components() {
        match component {
            Component::Prefix(p) => {
                prefix = Some(p.as_os_str().to_string_lossy().to_ascii_lowercase())
            }
            Component::RootDir => rooted = true,
            _ => break,
        }
    }
    (prefix, rooted)
}

fn same_component(a: &Component, b: &Component) -> bool {
    if cfg!(windows) {
        a.as_os_str()
            .to_string_lossy()
            .eq_ignore_ascii_case(&b.as_os_str().to_string_lossy())
    } else {
        a == b
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs_op::test_helpers::scratch_dir;
    use std::fs;

    #[test]
    fn dot_folders_are_hidden() {
        assert!(is_under_hidden_dir(Path::new("/src/.git/hooks")));
        assert!(is_under_hidden_dir(Path::new("/src/app/.vs")));
        assert!(!is_under_hidden_dir(Path::new("/src/app/obj")));
        // A dot inside a name is not a dot folder.
        assert!(!is_under_hidden_dir(Path::new("/src/my.app/bin")));
    }

    #[test]
    fn navigation_segments_are_not_hidden() {
        assert!(!is_under_hidden_dir(Path::new("./src/../lib")));
    }

    #[test]
    fn normalize_collapses_parent_segments() {
        assert_eq!(
            normalize(Path::new("/src/app/../lib/./bin/")),
            PathBuf::from("/src/lib/bin")
        );
        assert_eq!(normalize(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(normalize(Path::new("../a/../../b")), PathBuf::from("../../b"));
    }

    #[test]
    fn absolutize_joins_relative_onto_base() {
        assert_eq!(
            absolutize(Path::new("../out"), Path::new("/src/app")),
            PathBuf::from("/src/out")
        );
        assert_eq!(
            absolutize(Path::new("/abs/out"), Path::new("/src/app")),
            PathBuf::from("/abs/out")
        );
    }

    #[test]
    fn relative_path_of_descendant() {
        let rel = make_relative(Path::new("/src"), Path::new("/src/app/obj")).unwrap();
        assert_eq!(rel, PathBuf::from("app").join("obj"));
    }

    #[test]
    fn relative_path_ascends_for_siblings() {
        let rel = make_relative(Path::new("/src/app"), Path::new("/src/lib/obj")).unwrap();
        assert_eq!(rel, PathBuf::from("..").join("lib").join("obj"));
    }

    #[test]
    fn relative_path_of_root_itself_is_empty() {
        let rel = make_relative(Path::new("/src/"), Path::new("/src")).unwrap();
        assert_eq!(rel, PathBuf::new());
    }

    #[test]
    fn empty_inputs_are_rejected() {
        assert_eq!(
            make_relative(Path::new(""), Path::new("/src")),
            Err(PathError::Empty)
        );
        assert_eq!(
            make_relative(Path::new("/src"), Path::new("")),
            Err(PathError::Empty)
        );
    }

    #[test]
    fn unrelated_schemes_return_target_unchanged() {
        let rel = make_relative(Path::new("/src"), Path::new("relative/obj")).unwrap();
        assert_eq!(rel, PathBuf::from("relative/obj"));
    }

    #[test]
    fn same_path_ignores_trailing_separator() {
        assert!(same_path(Path::new("/j/app/obj/"), Path::new("/j/app/obj")));
        assert!(!same_path(Path::new("/j/app/obj"), Path::new("/j/lib/obj")));
    }

    #[test]
    fn resolve_root_accepts_existing_directory() {
        let td = scratch_dir();
        let sub = td.path().join("repo");
        fs::create_dir_all(&sub).unwrap();
        let got = resolve_root("repo", td.path()).unwrap();
        assert_eq!(got, sub);
    }

    #[test]
    fn resolve_root_rejects_dot_folder() {
        let td = scratch_dir();
        let sub = td.path().join(".git").join("repo");
        fs::create_dir_all(&sub).unwrap();
        let err = resolve_root(&sub.to_string_lossy(), td.path()).unwrap_err();
        assert!(matches!(err, PathError::Hidden(p) if p == sub));
    }

    #[test]
    fn resolve_root_rejects_missing_and_files() {
        let td = scratch_dir();
        let missing = td.path().join("missing");
        assert_eq!(
            resolve_root(&missing.to_string_lossy(), td.path()),
            Err(PathError::NotFound(missing))
        );

        let file = td.path().join("file.txt");
        fs::write(&file, "hello").unwrap();
        assert_eq!(
            resolve_root(&file.to_string_lossy(), td.path()),
            Err(PathError::NotDirectory(file))
        );

        assert_eq!(resolve_root("   ", td.path()), Err(PathError::Empty));
    }
}

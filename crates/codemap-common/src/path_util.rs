use std::path::{Path, PathBuf};

/// Canonicalizes `path` and converts it to forward-slash form, so ids and
/// displayed paths are stable across Windows and Unix.
pub fn normalize_path(path: &Path) -> PathBuf {
    let canonical = dunce::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let as_str = canonical.to_string_lossy().replace('\\', "/");
    PathBuf::from(as_str)
}

/// Renders `path` relative to `root` as a forward-slash string, for use as
/// the project-relative path stored on nodes and file analyses.
pub fn relative_str(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.to_string_lossy().replace('\\', "/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn relative_str_strips_root() {
        let root = Path::new("/proj");
        let path = Path::new("/proj/src/main.rs");
        assert_eq!(relative_str(root, path), "src/main.rs");
    }

    #[test]
    fn normalize_path_resolves_existing_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let sub = tmp.path().join("a");
        fs::create_dir(&sub).unwrap();
        let normalized = normalize_path(&sub);
        assert!(normalized.to_string_lossy().contains("a"));
    }
}

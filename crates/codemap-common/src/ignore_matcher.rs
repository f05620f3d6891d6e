use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

/// The project-wide blocked-directory/file set, applied regardless of
/// whether a `.gitignore` is present.
pub const BLOCKED_DIRS: &[&str] = &[
    ".git",
    "node_modules",
    "vendor",
    "target",
    "dist",
    "build",
    "venv",
    ".venv",
    "__pycache__",
    ".pytest_cache",
    ".mypy_cache",
    ".idea",
    ".vscode",
];

/// Compiles a `.gitignore` at the project root into a pure `matches(path)`
/// predicate, per the walker's external interface.
pub struct IgnoreMatcher {
    gitignore: Option<Gitignore>,
}

impl IgnoreMatcher {
    /// Builds a matcher from the `.gitignore` at `root`, if one exists.
    /// Never fails: a missing or unreadable `.gitignore` yields an
    /// always-false matcher, not an error.
    pub fn from_root(root: &Path) -> Self {
        let gitignore_path = root.join(".gitignore");
        if !gitignore_path.exists() {
            return Self { gitignore: None };
        }
        let mut builder = GitignoreBuilder::new(root);
        let gitignore = match builder.add(&gitignore_path) {
            Some(err) => {
                tracing::warn!(path = %gitignore_path.display(), error = %err, "failed to read .gitignore");
                None
            }
            None => builder.build().ok(),
        };
        Self { gitignore }
    }

    /// An ignore matcher with no `.gitignore` backing — only the blocked
    /// directory/file set applies.
    pub fn none() -> Self {
        Self { gitignore: None }
    }

    /// Returns true if `path` should be skipped (file) or pruned
    /// (directory) by the walker.
    pub fn matches(&self, path: &Path, is_dir: bool) -> bool {
        if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
            if BLOCKED_DIRS.contains(&name) {
                return true;
            }
        }
        match &self.gitignore {
            Some(gi) => gi.matched(path, is_dir).is_ignore(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn blocked_dir_is_always_ignored() {
        let matcher = IgnoreMatcher::none();
        assert!(matcher.matches(Path::new("/proj/target"), true));
        assert!(matcher.matches(Path::new("/proj/node_modules"), true));
        assert!(!matcher.matches(Path::new("/proj/src"), true));
    }

    #[test]
    fn gitignore_pattern_is_honored() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".gitignore"), "*.log\nbuild_output/\n").unwrap();
        let matcher = IgnoreMatcher::from_root(tmp.path());
        assert!(matcher.matches(&tmp.path().join("debug.log"), false));
        assert!(matcher.matches(&tmp.path().join("build_output"), true));
        assert!(!matcher.matches(&tmp.path().join("main.rs"), false));
    }

    #[test]
    fn missing_gitignore_yields_permissive_matcher() {
        let tmp = tempfile::tempdir().unwrap();
        let matcher = IgnoreMatcher::from_root(tmp.path());
        assert!(!matcher.matches(&tmp.path().join("anything.rs"), false));
    }
}

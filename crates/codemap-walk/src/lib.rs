//! Depth-first project walker. Generalizes the language-specific walk
//! functions of a single-language extractor into one walk over any source
//! tree, honoring an [`IgnoreMatcher`] and the language filter flag.

use codemap_common::ignore_matcher::IgnoreMatcher;
use codemap_common::lang::Language;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// What the walker hands to the caller for each visited file.
pub struct VisitedFile {
    pub absolute: PathBuf,
    pub relative: String,
    pub language: Option<Language>,
    pub len: u64,
}

/// Outcome a visit callback can request.
pub enum VisitOutcome {
    Continue,
    SkipSubtree,
}

/// Walks `root` depth-first, pruning blocked directories and anything the
/// ignore matcher rejects, and invoking `visit` for each file encountered.
///
/// When `language_filter` is true, files for which [`Language::detect`]
/// returns `None` are skipped before `visit` is called. I/O errors reading
/// directory entries propagate; `visit` itself decides how to handle
/// per-file read/parse failures.
pub fn walk(
    root: &Path,
    ignore: &IgnoreMatcher,
    language_filter: bool,
    mut visit: impl FnMut(VisitedFile) -> VisitOutcome,
) -> std::io::Result<()> {
    let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
        let is_dir = entry.file_type().is_dir();
        entry.path() == root || !ignore.matches(entry.path(), is_dir)
    });

    for entry in walker {
        let entry = entry.map_err(|e| std::io::Error::other(e.to_string()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if ignore.matches(path, false) {
            continue;
        }

        let language = Language::detect(path);
        if language_filter && language.is_none() {
            continue;
        }

        let len = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let relative = codemap_common::path_util::relative_str(root, path);

        match visit(VisitedFile {
            absolute: path.to_path_buf(),
            relative,
            language,
            len,
        }) {
            VisitOutcome::Continue => {}
            VisitOutcome::SkipSubtree => {
                // Files have no subtree of their own; nothing further to prune here.
            }
        }
    }

    Ok(())
}

/// Convenience wrapper collecting every visited file into a `Vec`.
pub fn collect(root: &Path, ignore: &IgnoreMatcher, language_filter: bool) -> std::io::Result<Vec<VisitedFile>> {
    let mut out = Vec::new();
    walk(root, ignore, language_filter, |file| {
        out.push(file);
        VisitOutcome::Continue
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn visits_each_file_once_and_prunes_blocked_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("main.rs"), "fn main() {}").unwrap();
        fs::create_dir(tmp.path().join("target")).unwrap();
        fs::write(tmp.path().join("target/junk.rs"), "").unwrap();

        let ignore = IgnoreMatcher::none();
        let files = collect(tmp.path(), &ignore, false).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, "main.rs");
    }

    #[test]
    fn language_filter_skips_unknown_extensions() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("a.rs"), "").unwrap();
        fs::write(tmp.path().join("README.md"), "").unwrap();

        let ignore = IgnoreMatcher::none();
        let files = collect(tmp.path(), &ignore, true).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].relative, "a.rs");
    }

    #[test]
    fn empty_root_yields_no_files() {
        let tmp = tempfile::tempdir().unwrap();
        let ignore = IgnoreMatcher::none();
        let files = collect(tmp.path(), &ignore, false).unwrap();
        assert!(files.is_empty());
    }
}

use codemap_common::lang::Language;
use std::env;
use std::path::PathBuf;

/// The grammar directory discovery order. Grammars are statically linked in
/// this build (see `DESIGN.md` Open Question 1), so this is used only to
/// produce a diagnostic at `debug` level about where a grammar directory
/// *would* have been found — useful for operators migrating from a
/// dynamic-load deployment, not load-bearing for `load_language`.
pub fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(dir) = env::var("CODEMAP_GRAMMAR_DIR") {
        dirs.push(PathBuf::from(dir));
    }
    if let Ok(exe) = env::current_exe() {
        if let Some(parent) = exe.parent() {
            dirs.push(parent.join("grammars"));
            if let Some(grandparent) = parent.parent() {
                dirs.push(grandparent.join("lib/grammars"));
            }
        }
    }
    dirs.push(PathBuf::from("/opt/homebrew/opt/codemap/libexec/grammars"));
    dirs.push(PathBuf::from("/usr/local/opt/codemap/libexec/grammars"));
    dirs.push(PathBuf::from("/usr/local/lib/codemap/grammars"));
    if let Some(home) = dirs::home_dir() {
        dirs.push(home.join(".codemap/grammars"));
    }
    dirs.push(PathBuf::from("./grammars"));
    dirs.push(PathBuf::from("./scanner/grammars"));

    dirs
}

/// Logs, at `debug`, the first candidate directory that exists for `lang`'s
/// filename convention — or that none do, which is expected for a
/// natively-linked build.
pub fn discover(lang: Language) {
    let filename = format!("libtree-sitter-{}.so", lang.id());
    let found = candidate_dirs().into_iter().find(|dir| dir.join(&filename).exists());
    match found {
        Some(dir) => tracing::debug!(?lang, dir = %dir.display(), "grammar directory present (unused: native binding)"),
        None => tracing::debug!(?lang, "no grammar directory found (expected: native binding in use)"),
    }
}

mod dirs {
    use std::path::PathBuf;

    /// Minimal `$HOME` lookup so this module doesn't need a dependency on
    /// the `dirs` crate just for one path.
    pub fn home_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(PathBuf::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn candidate_dirs_is_non_empty() {
        assert!(!candidate_dirs().is_empty());
    }

    #[test]
    fn discover_does_not_panic_when_absent() {
        discover(Language::Rust);
    }
}

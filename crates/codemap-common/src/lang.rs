use std::path::Path;

/// A supported source language. The extension table in [`Language::detect`]
/// is the sole oracle for parseability — nothing downstream second-guesses it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Language {
    Go,
    Python,
    JavaScript,
    TypeScript,
    Rust,
    Ruby,
    C,
    Cpp,
    Java,
    Swift,
    Bash,
    Kotlin,
    CSharp,
    Php,
    Dart,
    R,
}

impl Language {
    /// All languages this build knows the identifier for, in declaration order.
    pub const ALL: [Language; 16] = [
        Language::Go,
        Language::Python,
        Language::JavaScript,
        Language::TypeScript,
        Language::Rust,
        Language::Ruby,
        Language::C,
        Language::Cpp,
        Language::Java,
        Language::Swift,
        Language::Bash,
        Language::Kotlin,
        Language::CSharp,
        Language::Php,
        Language::Dart,
        Language::R,
    ];

    /// The canonical identifier used in diagnostics and grammar filenames.
    pub fn id(self) -> &'static str {
        match self {
            Language::Go => "go",
            Language::Python => "python",
            Language::JavaScript => "javascript",
            Language::TypeScript => "typescript",
            Language::Rust => "rust",
            Language::Ruby => "ruby",
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Java => "java",
            Language::Swift => "swift",
            Language::Bash => "bash",
            Language::Kotlin => "kotlin",
            Language::CSharp => "c_sharp",
            Language::Php => "php",
            Language::Dart => "dart",
            Language::R => "r",
        }
    }

    /// Detects a language from a file path by extension alone.
    /// Case-insensitive; returns `None` for unknown extensions.
    pub fn detect(path: &Path) -> Option<Language> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        Some(match ext.as_str() {
            "go" => Language::Go,
            "py" | "pyi" => Language::Python,
            "js" | "jsx" | "mjs" | "cjs" => Language::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Language::TypeScript,
            "rs" => Language::Rust,
            "rb" => Language::Ruby,
            "c" | "h" => Language::C,
            "cc" | "cpp" | "cxx" | "hpp" | "hh" | "hxx" => Language::Cpp,
            "java" => Language::Java,
            "swift" => Language::Swift,
            "sh" | "bash" => Language::Bash,
            "kt" | "kts" => Language::Kotlin,
            "cs" => Language::CSharp,
            "php" => Language::Php,
            "dart" => Language::Dart,
            "r" => Language::R,
            _ => return None,
        })
    }
}

// A manual string mapping keeps the wire format stable regardless of
// variant declaration order, for the benefit of downstream crates that
// persist a `Language` as part of a larger serde-derived record.
impl serde::Serialize for Language {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.id())
    }
}

impl<'de> serde::Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Language::ALL
            .into_iter()
            .find(|l| l.id() == s)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown language id {s:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_known_extensions() {
        assert_eq!(Language::detect(&PathBuf::from("main.go")), Some(Language::Go));
        assert_eq!(Language::detect(&PathBuf::from("x.PY")), Some(Language::Python));
        assert_eq!(Language::detect(&PathBuf::from("a.tsx")), Some(Language::TypeScript));
    }

    #[test]
    fn unknown_extension_is_none() {
        assert_eq!(Language::detect(&PathBuf::from("README.md")), None);
        assert_eq!(Language::detect(&PathBuf::from("Makefile")), None);
    }

    #[test]
    fn id_round_trips_through_all() {
        for lang in Language::ALL {
            let found = Language::ALL.into_iter().find(|l| l.id() == lang.id());
            assert_eq!(found, Some(lang));
        }
    }

    #[test]
    fn all_ids_are_unique() {
        let mut ids: Vec<&str> = Language::ALL.iter().map(|l| l.id()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}

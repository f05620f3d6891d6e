//! Grammar loader: binds to a native, statically-linked tree-sitter grammar
//! per language and compiles the embedded capture queries, memoized
//! per-process. See `DESIGN.md` Open Question 1 for why this binds
//! natively instead of `dlopen`-ing a shared library per the source
//! system's convention.

pub mod discovery;
pub mod queries;

use codemap_common::error::CodemapError;
use codemap_common::lang::Language;
use std::collections::HashMap;
use std::sync::{Mutex, OnceLock};
use tree_sitter::{Language as TsLanguage, Query};

/// A compiled, cached grammar binding: the tree-sitter language plus its
/// compiled symbol and (optional) call queries.
pub struct Grammar {
    pub language: TsLanguage,
    pub symbol_query: Query,
    pub call_query: Option<Query>,
}

fn native_language(lang: Language) -> TsLanguage {
    match lang {
        Language::Rust => tree_sitter_rust::LANGUAGE.into(),
        Language::Python => tree_sitter_python::LANGUAGE.into(),
        Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
        Language::Go => tree_sitter_go::LANGUAGE.into(),
        Language::Ruby => tree_sitter_ruby::LANGUAGE.into(),
        Language::C => tree_sitter_c::LANGUAGE.into(),
        Language::Cpp => tree_sitter_cpp::LANGUAGE.into(),
        Language::Java => tree_sitter_java::LANGUAGE.into(),
        Language::CSharp => tree_sitter_c_sharp::LANGUAGE.into(),
        Language::Php => tree_sitter_php::LANGUAGE_PHP.into(),
        Language::Bash => tree_sitter_bash::LANGUAGE.into(),
        Language::Kotlin => tree_sitter_kotlin_ng::LANGUAGE.into(),
        Language::Swift => tree_sitter_swift::LANGUAGE.into(),
        Language::R => tree_sitter_r::LANGUAGE.into(),
        Language::Dart => tree_sitter_dart::language(),
    }
}

fn load(lang: Language) -> Result<Grammar, CodemapError> {
    let language = native_language(lang);

    let symbol_query = Query::new(&language, queries::symbol_query_source(lang))
        .map_err(|e| CodemapError::QueryCompileFailed(lang, e.to_string()))?;

    let call_query = match queries::call_query_source(lang) {
        Some(src) => Some(
            Query::new(&language, src)
                .map_err(|e| CodemapError::QueryCompileFailed(lang, e.to_string()))?,
        ),
        None => None,
    };

    Ok(Grammar {
        language,
        symbol_query,
        call_query,
    })
}

type Cache = Mutex<HashMap<Language, Result<&'static Grammar, String>>>;

static CACHE: OnceLock<Cache> = OnceLock::new();

/// Loads (and memoizes) the grammar for `lang`. Thread-safe: concurrent
/// first loads of the same language block on one winner rather than racing
/// the tree-sitter query compiler.
pub fn load_language(lang: Language) -> Result<&'static Grammar, CodemapError> {
    let cache = CACHE.get_or_init(|| Mutex::new(HashMap::new()));
    let mut guard = cache.lock().unwrap_or_else(|e| e.into_inner());

    if let Some(cached) = guard.get(&lang) {
        return cached
            .clone()
            .map_err(|msg| CodemapError::GrammarLoadFailed(lang, msg));
    }

    discovery::discover(lang);

    let result = load(lang).map(|grammar| &*Box::leak(Box::new(grammar)));
    let stored = match &result {
        Ok(grammar) => Ok(*grammar),
        Err(e) => Err(e.to_string()),
    };
    guard.insert(lang, stored);
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_memoizes_rust() {
        let first = load_language(Language::Rust).unwrap();
        let second = load_language(Language::Rust).unwrap();
        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn every_declared_language_loads() {
        for lang in Language::ALL {
            load_language(lang).unwrap_or_else(|e| panic!("{lang:?} failed to load: {e}"));
        }
    }
}

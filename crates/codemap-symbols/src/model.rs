use codemap_common::lang::Language;
use serde::{Deserialize, Serialize};

/// A type's structural kind, per the `type.*` capture markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeKind {
    Struct,
    Class,
    Interface,
    Trait,
    Enum,
    Alias,
    Protocol,
}

/// A function or method record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionRecord {
    pub name: String,
    pub signature: Option<String>,
    pub receiver: Option<String>,
    pub exported: bool,
    pub line: u32,
    pub param_count: i32,
}

/// A struct/class/interface/trait/enum/alias/protocol record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeRecord {
    pub name: String,
    pub kind: TypeKind,
    pub fields: Option<Vec<String>>,
    pub exported: bool,
    pub line: u32,
}

/// Per-file output of the symbol extractor. `language` is `None` when the
/// file's language could not be detected — the analysis is then
/// unconditionally empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAnalysis {
    pub path: String,
    pub language: Option<Language>,
    pub functions: Vec<FunctionRecord>,
    pub types: Vec<TypeRecord>,
    pub imports: Vec<String>,
}

impl FileAnalysis {
    pub fn empty(path: String, language: Option<Language>) -> Self {
        Self {
            path,
            language,
            functions: Vec::new(),
            types: Vec::new(),
            imports: Vec::new(),
        }
    }
}

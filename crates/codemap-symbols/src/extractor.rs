use crate::model::{FileAnalysis, FunctionRecord, TypeKind, TypeRecord};
use crate::signature;
use codemap_common::config::DetailLevel;
use codemap_common::counting::count_params;
use codemap_common::error::CodemapError;
use codemap_common::lang::Language;
use std::collections::HashSet;
use std::path::Path;
use tree_sitter::{Parser, Query, QueryCursor, StreamingIterator};

fn strip_quotes(s: &str) -> String {
    let s = s.trim();
    let s = s.strip_prefix('"').unwrap_or(s);
    let s = s.strip_suffix('"').unwrap_or(s);
    let s = s.strip_prefix('\'').unwrap_or(s);
    s.strip_suffix('\'').unwrap_or(s).to_string()
}

fn type_kind_for_capture(name: &str) -> Option<TypeKind> {
    match name {
        "type.struct" => Some(TypeKind::Struct),
        "type.class" => Some(TypeKind::Class),
        "type.interface" => Some(TypeKind::Interface),
        "type.trait" => Some(TypeKind::Trait),
        "type.enum" => Some(TypeKind::Enum),
        "type.alias" => Some(TypeKind::Alias),
        "type.protocol" => Some(TypeKind::Protocol),
        _ => None,
    }
}

fn is_exported(lang: Language, name: &str) -> bool {
    match lang {
        Language::Go => name.chars().next().is_some_and(|c| c.is_uppercase()),
        Language::Python => !name.starts_with('_'),
        _ => true,
    }
}

/// Parses struct/class body text into field names, per the detail=full
/// field-extraction rule: first whitespace-delimited token of each
/// non-empty, non-comment line, trailing `:`/`,` stripped.
///
/// `body` is the text of the whole type-declaration capture (e.g. a Rust
/// `struct_item` or a Python `class_definition`), header included, since
/// the grammars don't all expose a standalone member-list node worth
/// querying for individually. Brace-delimited bodies take the text between
/// the first `{` and the matching last `}`; colon-delimited ones (Python,
/// Ruby) skip the header line instead.
fn extract_fields(body: &str) -> Vec<String> {
    let inner = match (body.find('{'), body.rfind('}')) {
        (Some(open), Some(close)) if close > open => &body[open + 1..close],
        _ => match body.find('\n') {
            Some(newline) => &body[newline + 1..],
            None => "",
        },
    };

    let mut fields = Vec::new();
    // `;` both terminates C-family field declarations and separates fields
    // packed onto a single line (e.g. Go's `struct { Name; Email }`), so
    // each line is split on it before taking the first token.
    for segment in inner.lines().flat_map(|line| line.split(';')) {
        let line = segment.trim();
        if line.is_empty() || line.starts_with("//") || line.starts_with('#') || line.starts_with('*') {
            continue;
        }
        if matches!(line, "{" | "}" | "(" | ")") {
            continue;
        }
        if let Some(token) = line.split_whitespace().next() {
            let token = token.trim_end_matches([':', ',']);
            if !token.is_empty() && token != "{" && token != "}" {
                fields.push(token.to_string());
            }
        }
    }
    fields
}

#[derive(Default)]
struct FuncBuilder {
    name: Option<String>,
    params: Option<String>,
    result: Option<String>,
    receiver: Option<String>,
    line: u32,
}

#[derive(Default)]
struct TypeBuilder {
    name: Option<String>,
    kind: Option<TypeKind>,
    body: Option<String>,
    line: u32,
}

/// Runs the symbol query over `source` and assembles a [`FileAnalysis`].
pub fn extract(
    query: &Query,
    lang: Language,
    source: &[u8],
    path: &str,
    detail: DetailLevel,
) -> FileAnalysis {
    let tree_opt = parse(lang, source);
    let mut analysis = FileAnalysis::empty(path.to_string(), Some(lang));

    let Some(tree) = tree_opt else {
        return analysis;
    };

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, tree.root_node(), source);
    let capture_names = query.capture_names();

    let mut functions: Vec<FunctionRecord> = Vec::new();
    let mut types: Vec<TypeRecord> = Vec::new();
    let mut imports: Vec<String> = Vec::new();
    let mut seen_imports: HashSet<String> = HashSet::new();

    while let Some(m) = matches.next() {
        let mut func = FuncBuilder::default();
        let mut ty = TypeBuilder::default();

        for capture in m.captures {
            let name = capture_names[capture.index as usize];
            let node = capture.node;
            let text = node.utf8_text(source).unwrap_or("").to_string();
            let line = node.start_position().row as u32 + 1;

            match name {
                "func.name" => {
                    func.name = Some(text);
                    func.line = line;
                }
                "func.params" => func.params = Some(text),
                "func.result" => func.result = Some(text),
                "func.receiver" => func.receiver = Some(text),
                "type.name" => {
                    ty.name = Some(text);
                    ty.line = line;
                }
                "import" | "module" => {
                    let cleaned = strip_quotes(&text);
                    if !cleaned.is_empty() && seen_imports.insert(cleaned.clone()) {
                        imports.push(cleaned);
                    }
                }
                other => {
                    if let Some(kind) = type_kind_for_capture(other) {
                        ty.kind = Some(kind);
                        ty.body = Some(text);
                    }
                }
            }
        }

        if let Some(name) = func.name {
            let signature = if detail >= DetailLevel::Signatures {
                Some(signature::render(
                    lang,
                    &name,
                    func.receiver.as_deref(),
                    func.params.as_deref().unwrap_or("()"),
                    func.result.as_deref(),
                ))
            } else {
                None
            };
            let param_count = count_params(func.params.as_deref().unwrap_or("()"));
            functions.push(FunctionRecord {
                exported: is_exported(lang, &name),
                name,
                signature,
                receiver: func.receiver,
                line: func.line,
                param_count,
            });
        } else if let (Some(name), Some(kind)) = (ty.name, ty.kind) {
            let fields = if detail == DetailLevel::Full {
                ty.body.as_deref().map(extract_fields)
            } else {
                None
            };
            types.push(TypeRecord {
                exported: is_exported(lang, &name),
                name,
                kind,
                fields,
                line: ty.line,
            });
        }
    }

    dedup_by_name(&mut functions, |f| &f.name);
    dedup_types_by_name(&mut types);

    analysis.functions = functions;
    analysis.types = types;
    analysis.imports = imports;
    analysis
}

fn dedup_by_name<T>(items: &mut Vec<T>, key: impl Fn(&T) -> &String) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(key(item).clone()));
}

fn dedup_types_by_name(items: &mut Vec<TypeRecord>) {
    let mut seen = HashSet::new();
    items.retain(|item| seen.insert(item.name.clone()));
}

fn parse(lang: Language, source: &[u8]) -> Option<tree_sitter::Tree> {
    let grammar = codemap_grammars::load_language(lang).ok()?;
    let mut parser = Parser::new();
    parser.set_language(&grammar.language).ok()?;
    parser.parse(source, None)
}

/// Reads `absolute` (via mmap when possible) and extracts a [`FileAnalysis`]
/// at the given detail level. Returns `Ok(empty analysis)` — not an error —
/// when the language is unsupported or the grammar is unavailable, per the
/// component's "empty, not fatal" contract.
pub fn analyze_file(
    absolute: &Path,
    relative: &str,
    lang: Option<Language>,
    detail: DetailLevel,
) -> Result<FileAnalysis, CodemapError> {
    let Some(lang) = lang else {
        return Ok(FileAnalysis::empty(relative.to_string(), None));
    };

    let grammar = match codemap_grammars::load_language(lang) {
        Ok(g) => g,
        Err(_) => return Ok(FileAnalysis::empty(relative.to_string(), Some(lang))),
    };

    let source = read_source(absolute)?;
    Ok(extract(&grammar.symbol_query, lang, &source, relative, detail))
}

fn read_source(path: &Path) -> Result<Vec<u8>, CodemapError> {
    let file = std::fs::File::open(path).map_err(|source| CodemapError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    match unsafe { memmap2::Mmap::map(&file) } {
        Ok(mmap) => Ok(mmap.to_vec()),
        Err(_) => std::fs::read(path).map_err(|source| CodemapError::ReadError {
            path: path.to_path_buf(),
            source,
        }),
    }
}

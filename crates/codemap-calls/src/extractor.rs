use crate::model::{CallAnalysis, CallSite, FunctionRange};
use codemap_common::counting::count_args;
use codemap_common::error::CodemapError;
use codemap_common::lang::Language;
use std::path::Path;
use tree_sitter::{Parser, Query, QueryCursor, StreamingIterator, Tree};

/// Builds the list of function ranges from the symbol query, in source
/// (discovery) order — mirrors the teacher's single-pass range collection
/// ahead of call attribution.
fn function_ranges(symbol_query: &Query, tree: &Tree, source: &[u8]) -> Vec<FunctionRange> {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(symbol_query, tree.root_node(), source);
    let capture_names = symbol_query.capture_names();
    let mut ranges = Vec::new();

    while let Some(m) = matches.next() {
        let mut name = None;
        let mut item_range = None;

        for capture in m.captures {
            let cname = capture_names[capture.index as usize];
            if cname == "func.name" {
                name = capture.node.utf8_text(source).ok().map(|s| s.to_string());
            } else if cname == "func.item" {
                let node = capture.node;
                item_range = Some((
                    node.start_position().row as u32 + 1,
                    node.end_position().row as u32 + 1,
                ));
            }
        }

        if let (Some(name), Some((start_line, end_line))) = (name, item_range) {
            ranges.push(FunctionRange {
                name,
                start_line,
                end_line,
            });
        }
    }

    ranges
}

/// Finds the innermost currently-open function for `line`: the *last*
/// range in discovery order whose span contains it.
fn find_containing(ranges: &[FunctionRange], line: u32) -> Option<&FunctionRange> {
    ranges
        .iter()
        .filter(|r| r.start_line <= line && line <= r.end_line)
        .last()
}

/// Reads `absolute` and extracts a [`CallAnalysis`]. Returns an empty
/// analysis — not an error — when the language is unsupported or has no
/// call query.
pub fn analyze_file(absolute: &Path, relative: &str, lang: Option<Language>) -> Result<CallAnalysis, CodemapError> {
    let Some(lang) = lang else {
        return Ok(CallAnalysis::empty(relative.to_string()));
    };

    let grammar = match codemap_grammars::load_language(lang) {
        Ok(g) => g,
        Err(_) => return Ok(CallAnalysis::empty(relative.to_string())),
    };

    let Some(call_query) = &grammar.call_query else {
        return Ok(CallAnalysis::empty(relative.to_string()));
    };

    let source = read_source(absolute)?;

    let mut parser = Parser::new();
    parser
        .set_language(&grammar.language)
        .map_err(|e| CodemapError::GrammarLoadFailed(lang, e.to_string()))?;
    let Some(tree) = parser.parse(&source, None) else {
        return Ok(CallAnalysis::empty(relative.to_string()));
    };

    let ranges = function_ranges(&grammar.symbol_query, &tree, &source);

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(call_query, tree.root_node(), &source);
    let capture_names = call_query.capture_names();
    let mut analysis = CallAnalysis::empty(relative.to_string());

    while let Some(m) = matches.next() {
        let mut callee = None;
        let mut call_line = 0u32;
        let mut arg_count = 0usize;
        let mut receiver = None;

        for capture in m.captures {
            let cname = capture_names[capture.index as usize];
            let node = capture.node;
            match cname {
                "call.name" => {
                    callee = node.utf8_text(&source).ok().map(|s| s.to_string());
                    call_line = node.start_position().row as u32 + 1;
                }
                "call.args" => {
                    let text = node.utf8_text(&source).unwrap_or("");
                    arg_count = count_args(text);
                }
                "call.receiver" => {
                    receiver = node.utf8_text(&source).ok().map(|s| s.to_string());
                }
                _ => {}
            }
        }

        let Some(callee) = callee else { continue };

        let (caller, caller_line) = match find_containing(&ranges, call_line) {
            Some(r) => (r.name.clone(), r.start_line),
            None => (String::new(), 0),
        };

        analysis.calls.push(CallSite {
            caller,
            caller_line,
            callee,
            call_line,
            arg_count,
            receiver,
        });
    }

    Ok(analysis)
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

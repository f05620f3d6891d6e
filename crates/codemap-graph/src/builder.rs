use crate::graph::CodeGraph;
use crate::model::{Edge, EdgeKind, Node, NodeKind};
use codemap_calls::CallAnalysis;
use codemap_common::id::node_id;
use codemap_symbols::FileAnalysis;
use std::collections::HashMap;

/// A file's raw import strings, queued during `ingest` and resolved
/// against known file nodes in `link`.
struct PendingImport {
    from_file_id: String,
    raw: String,
}

/// Two-pass graph construction: `ingest` registers file/function/
/// method/type nodes and `defines` edges while indexing function names
/// for later call resolution; `link` resolves import and call edges
/// once every file has been ingested, since either may reference a file
/// or function not yet seen.
pub struct GraphBuilder {
    graph: CodeGraph,
    function_by_name: HashMap<String, Vec<String>>,
    pending_imports: Vec<PendingImport>,
    pending_calls: Vec<(String, CallAnalysis)>,
}

impl GraphBuilder {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            graph: CodeGraph::new(root),
            function_by_name: HashMap::new(),
            pending_imports: Vec::new(),
            pending_calls: Vec::new(),
        }
    }

    /// Registers one file's symbol analysis. Call once per scanned file
    /// before `finish`.
    pub fn ingest_symbols(&mut self, analysis: &FileAnalysis) {
        let file_id = node_id(&analysis.path, "");
        self.graph.insert_node(Node {
            id: file_id.clone(),
            kind: NodeKind::File,
            name: file_path_stem(&analysis.path),
            path: analysis.path.clone(),
            line: None,
            end_line: None,
            signature: None,
            docstring: None,
            exported: None,
            package: None,
        });

        for func in &analysis.functions {
            let func_id = node_id(&analysis.path, &func.name);
            let kind = if func.receiver.is_some() {
                NodeKind::Method
            } else {
                NodeKind::Function
            };
            self.graph.insert_node(Node {
                id: func_id.clone(),
                kind,
                name: func.name.clone(),
                path: analysis.path.clone(),
                line: Some(func.line),
                end_line: None,
                signature: func.signature.clone(),
                docstring: None,
                exported: Some(func.exported),
                package: None,
            });
            self.graph.add_edge(Edge {
                from: file_id.clone(),
                to: func_id.clone(),
                kind: EdgeKind::Defines,
                line: Some(func.line),
                weight: None,
                call_site: None,
            });
            self.function_by_name.entry(func.name.clone()).or_default().push(func_id);
        }

        for ty in &analysis.types {
            let type_id = node_id(&analysis.path, &ty.name);
            self.graph.insert_node(Node {
                id: type_id.clone(),
                kind: NodeKind::Type,
                name: ty.name.clone(),
                path: analysis.path.clone(),
                line: Some(ty.line),
                end_line: None,
                signature: None,
                docstring: None,
                exported: Some(ty.exported),
                package: None,
            });
            self.graph.add_edge(Edge {
                from: file_id.clone(),
                to: type_id,
                kind: EdgeKind::Defines,
                line: Some(ty.line),
                weight: None,
                call_site: None,
            });
        }

        for raw in &analysis.imports {
            self.pending_imports.push(PendingImport {
                from_file_id: file_id.clone(),
                raw: raw.clone(),
            });
        }
    }

    /// Registers one file's call analysis. Call resolution happens in
    /// `finish`, once every file's functions are known.
    pub fn ingest_calls(&mut self, path: &str, analysis: CallAnalysis) {
        self.pending_calls.push((path.to_string(), analysis));
    }

    /// Resolves queued imports and calls, then returns the finished graph.
    pub fn finish(mut self) -> CodeGraph {
        self.link_imports();
        self.link_calls();
        self.graph
    }

    /// Best-effort import resolution: match the raw import string against
    /// known file paths by basename or path-suffix. Falls back to a
    /// synthetic `Package` node carrying the raw import string as its name
    /// when no file node matches — this is the common case for
    /// standard-library and third-party imports, which were never scanned.
    fn link_imports(&mut self) {
        let known_paths: Vec<String> = self.graph.by_path.keys().cloned().collect();
        let imports = std::mem::take(&mut self.pending_imports);

        for import in imports {
            let target_id = if let Some(matched) = resolve_import_path(&import.raw, &known_paths) {
                self.graph.by_path[&matched][0].clone()
            } else {
                let package_id = node_id("__package__", &import.raw);
                self.graph.insert_node(Node {
                    id: package_id.clone(),
                    kind: NodeKind::Package,
                    name: import.raw.clone(),
                    path: String::new(),
                    line: None,
                    end_line: None,
                    signature: None,
                    docstring: None,
                    exported: None,
                    package: Some(import.raw.clone()),
                });
                package_id
            };

            self.graph.add_edge(Edge {
                from: import.from_file_id,
                to: target_id,
                kind: EdgeKind::Imports,
                line: None,
                weight: None,
                call_site: None,
            });
        }
    }

    /// Resolves each call site against `function_by_name`. An unambiguous
    /// name resolves directly; an ambiguous one is disambiguated by
    /// nearest shared path prefix with the caller's file. No match at all
    /// (external function, dynamic dispatch the query couldn't see
    /// through) drops the edge rather than guessing.
    fn link_calls(&mut self) {
        let calls = std::mem::take(&mut self.pending_calls);

        for (path, analysis) in calls {
            let caller_file_id = node_id(&path, "");
            for call in &analysis.calls {
                let caller_id = if call.caller.is_empty() {
                    caller_file_id.clone()
                } else {
                    node_id(&path, &call.caller)
                };

                let Some(candidates) = self.function_by_name.get(&call.callee) else {
                    continue;
                };

                let callee_id = match candidates.as_slice() {
                    [] => continue,
                    [only] => only.clone(),
                    many => best_prefix_match(many, &path),
                };

                self.graph.add_edge(Edge {
                    from: caller_id,
                    to: callee_id,
                    kind: EdgeKind::Calls,
                    line: Some(call.call_line),
                    weight: None,
                    call_site: Some(format!("{path}:{}", call.call_line)),
                });
            }
        }
    }
}

fn file_path_stem(path: &str) -> String {
    std::path::Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

/// Matches `raw` (an import specifier) against a known file path by exact
/// suffix or basename, preferring the longest matching suffix.
fn resolve_import_path(raw: &str, known_paths: &[String]) -> Option<String> {
    let normalized = raw.trim_matches('"').trim_matches('\'').replace('.', "/");
    known_paths
        .iter()
        .filter(|p| p.ends_with(&normalized) || p.ends_with(&format!("{normalized}.go")) || basename(p) == basename(raw))
        .max_by_key(|p| p.len())
        .cloned()
}

fn basename(path: &str) -> &str {
    path.rsplit(['/', '.']).next().unwrap_or(path)
}

/// Among several functions sharing a name, picks the one whose file path
/// shares the longest prefix with `caller_path`.
fn best_prefix_match<'a>(candidates: &'a [String], caller_path: &str) -> String {
    candidates
        .iter()
        .max_by_key(|id| common_prefix_len(id, caller_path))
        .cloned()
        .unwrap_or_else(|| candidates[0].clone())
}

fn common_prefix_len(a: &str, b: &str) -> usize {
    a.bytes().zip(b.bytes()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use codemap_calls::CallSite;
    use codemap_symbols::{FunctionRecord, TypeKind as SymTypeKind, TypeRecord};

    fn func(name: &str, line: u32) -> FunctionRecord {
        FunctionRecord {
            name: name.to_string(),
            signature: None,
            receiver: None,
            exported: true,
            line,
            param_count: 0,
        }
    }

    #[test]
    fn ingest_registers_file_and_function_nodes() {
        let mut builder = GraphBuilder::new("/proj");
        let analysis = FileAnalysis {
            path: "main.go".to_string(),
            language: None,
            functions: vec![func("main", 1)],
            types: vec![],
            imports: vec![],
        };
        builder.ingest_symbols(&analysis);
        let graph = builder.finish();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn unresolved_import_becomes_package_node() {
        let mut builder = GraphBuilder::new("/proj");
        let analysis = FileAnalysis {
            path: "main.go".to_string(),
            language: None,
            functions: vec![],
            types: vec![],
            imports: vec!["fmt".to_string()],
        };
        builder.ingest_symbols(&analysis);
        let graph = builder.finish();

        let package = graph.nodes().find(|n| n.kind == NodeKind::Package).unwrap();
        assert_eq!(package.name, "fmt");
    }

    #[test]
    fn calls_resolve_via_function_name_index() {
        let mut builder = GraphBuilder::new("/proj");
        builder.ingest_symbols(&FileAnalysis {
            path: "main.go".to_string(),
            language: None,
            functions: vec![func("main", 1), func("helper", 3)],
            types: vec![],
            imports: vec![],
        });
        builder.ingest_calls(
            "main.go",
            CallAnalysis {
                path: "main.go".to_string(),
                calls: vec![CallSite {
                    caller: "main".to_string(),
                    caller_line: 1,
                    callee: "helper".to_string(),
                    call_line: 2,
                    arg_count: 0,
                    receiver: None,
                }],
            },
        );
        let graph = builder.finish();

        let calls_edge = graph.edges().iter().find(|e| e.kind == EdgeKind::Calls).unwrap();
        let from = graph.node(&calls_edge.from).unwrap();
        let to = graph.node(&calls_edge.to).unwrap();
        assert_eq!(from.name, "main");
        assert_eq!(to.name, "helper");
    }

    #[test]
    fn unresolved_call_is_dropped_not_guessed() {
        let mut builder = GraphBuilder::new("/proj");
        builder.ingest_symbols(&FileAnalysis {
            path: "main.go".to_string(),
            language: None,
            functions: vec![func("main", 1)],
            types: vec![],
            imports: vec![],
        });
        builder.ingest_calls(
            "main.go",
            CallAnalysis {
                path: "main.go".to_string(),
                calls: vec![CallSite {
                    caller: "main".to_string(),
                    caller_line: 1,
                    callee: "external_lib_fn".to_string(),
                    call_line: 2,
                    arg_count: 0,
                    receiver: None,
                }],
            },
        );
        let graph = builder.finish();
        assert!(graph.edges().iter().all(|e| e.kind != EdgeKind::Calls));
    }

    #[test]
    fn types_get_defines_edges() {
        let mut builder = GraphBuilder::new("/proj");
        builder.ingest_symbols(&FileAnalysis {
            path: "models.py".to_string(),
            language: None,
            functions: vec![],
            types: vec![TypeRecord {
                name: "User".to_string(),
                kind: SymTypeKind::Class,
                fields: None,
                exported: true,
                line: 4,
            }],
            imports: vec![],
        });
        let graph = builder.finish();
        let ty = graph.nodes().find(|n| n.kind == NodeKind::Type).unwrap();
        assert_eq!(ty.name, "User");
    }
}

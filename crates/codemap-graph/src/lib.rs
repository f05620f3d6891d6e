//! Knowledge graph: nodes/edges over extracted symbols and calls, built in
//! two passes by [`builder::GraphBuilder`] and persisted by [`snapshot`].
//! Grounded on the teacher's `ReferenceGraph`/`build_reference_graph` plus
//! its gzip-framed ingest format, generalized from a Python/C++-only
//! reference graph to an arbitrary multi-language code graph.

pub mod builder;
pub mod graph;
pub mod model;
pub mod snapshot;

pub use builder::GraphBuilder;
pub use graph::{CodeGraph, GraphPath, GraphStats};
pub use model::{Edge, EdgeKind, Node, NodeKind};

#[cfg(test)]
mod tests {
    use super::*;
    use codemap_calls::CallAnalysis;
    use codemap_symbols::FileAnalysis;

    #[test]
    fn end_to_end_ingest_link_snapshot_round_trip() {
        let mut builder = GraphBuilder::new("/proj");
        builder.ingest_symbols(&FileAnalysis {
            path: "pkg/main.go".to_string(),
            language: None,
            functions: vec![codemap_symbols::FunctionRecord {
                name: "main".to_string(),
                signature: Some("func main()".to_string()),
                receiver: None,
                exported: true,
                line: 1,
                param_count: 0,
            }],
            types: vec![],
            imports: vec!["fmt".to_string()],
        });
        builder.ingest_calls(
            "pkg/main.go",
            CallAnalysis {
                path: "pkg/main.go".to_string(),
                calls: vec![],
            },
        );
        let graph = builder.finish();

        let stats = graph.stats();
        assert_eq!(stats.total_nodes, 3); // file, function, synthetic package
        assert_eq!(stats.total_edges, 2); // defines, imports

        let bytes = snapshot::encode(&graph).unwrap();
        let restored = snapshot::decode(&bytes).unwrap();
        assert_eq!(restored.stats(), stats);
    }

    #[test]
    fn empty_graph_has_zero_stats_and_no_paths() {
        let graph = CodeGraph::new("/empty");
        assert_eq!(graph.stats().total_nodes, 0);
        assert!(graph.find_path("a", "b", 10).is_none());
        assert!(graph.find_all_paths("a", "b", 5).is_empty());
    }
}

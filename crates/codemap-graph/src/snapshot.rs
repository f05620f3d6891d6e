use crate::graph::CodeGraph;
use crate::model::{Edge, Node};
use codemap_common::error::CodemapError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

const MAGIC: &[u8; 4] = b"CMAP";
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotPayload {
    root: String,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

/// Encodes `graph` as `CMAP` magic + u32 schema version + gzip(bincode
/// payload). Mirrors the teacher's gzip-framed OTLP ingest format, swapping
/// its JSON payload for bincode since the graph has no need to stay
/// human-readable on disk.
pub fn encode(graph: &CodeGraph) -> Result<Vec<u8>, CodemapError> {
    let payload = SnapshotPayload {
        root: graph.root.clone(),
        nodes: graph.nodes().cloned().collect(),
        edges: graph.edges().to_vec(),
    };

    let body = bincode::serde::encode_to_vec(&payload, bincode::config::standard())
        .map_err(|e| CodemapError::SnapshotCorrupt(e.to_string()))?;

    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(&body)
        .map_err(|e| CodemapError::SnapshotCorrupt(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| CodemapError::SnapshotCorrupt(e.to_string()))?;

    let mut out = Vec::with_capacity(8 + compressed.len());
    out.extend_from_slice(MAGIC);
    out.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
    out.extend_from_slice(&compressed);
    Ok(out)
}

/// Decodes a snapshot produced by [`encode`]. Rejects a bad magic or a
/// mismatched schema version before touching the gzip/bincode layers,
/// refuses a payload with an edge endpoint missing from its node set, and
/// rebuilds every derived index from the decoded nodes/edges alone —
/// invariant 4 never trusts a persisted index.
pub fn decode(bytes: &[u8]) -> Result<CodeGraph, CodemapError> {
    if bytes.len() < 8 {
        return Err(CodemapError::SnapshotCorrupt("snapshot shorter than header".to_string()));
    }
    if &bytes[0..4] != MAGIC {
        return Err(CodemapError::SnapshotCorrupt("bad magic header".to_string()));
    }
    let version = u32::from_le_bytes(bytes[4..8].try_into().unwrap());
    if version != SCHEMA_VERSION {
        return Err(CodemapError::SnapshotVersionMismatch {
            expected: SCHEMA_VERSION,
            found: version,
        });
    }

    let mut decoder = GzDecoder::new(&bytes[8..]);
    let mut body = Vec::new();
    decoder
        .read_to_end(&mut body)
        .map_err(|e| CodemapError::SnapshotCorrupt(e.to_string()))?;

    let (payload, _): (SnapshotPayload, usize) =
        bincode::serde::decode_from_slice(&body, bincode::config::standard())
            .map_err(|e| CodemapError::SnapshotCorrupt(e.to_string()))?;

    let node_ids: std::collections::HashSet<&str> = payload.nodes.iter().map(|n| n.id.as_str()).collect();
    for edge in &payload.edges {
        if !node_ids.contains(edge.from.as_str()) || !node_ids.contains(edge.to.as_str()) {
            return Err(CodemapError::SnapshotCorrupt(format!(
                "edge {} -> {} references a node not present in the snapshot",
                edge.from, edge.to
            )));
        }
    }

    let mut graph = CodeGraph::new(payload.root);
    for node in payload.nodes {
        graph.insert_node(node);
    }
    graph.edges = payload.edges;
    graph.rebuild_indexes();
    Ok(graph)
}

pub fn save(graph: &CodeGraph, path: &Path) -> Result<(), CodemapError> {
    let bytes = encode(graph)?;
    std::fs::write(path, bytes).map_err(|source| CodemapError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: &Path) -> Result<CodeGraph, CodemapError> {
    let bytes = std::fs::read(path).map_err(|source| CodemapError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;
    decode(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EdgeKind, NodeKind};

    fn sample_graph() -> CodeGraph {
        let mut g = CodeGraph::new("/proj");
        g.insert_node(Node {
            id: "a".to_string(),
            kind: NodeKind::Function,
            name: "a".to_string(),
            path: "a.go".to_string(),
            line: Some(1),
            end_line: None,
            signature: None,
            docstring: None,
            exported: Some(true),
            package: None,
        });
        g.insert_node(Node {
            id: "b".to_string(),
            kind: NodeKind::Function,
            name: "b".to_string(),
            path: "a.go".to_string(),
            line: Some(4),
            end_line: None,
            signature: None,
            docstring: None,
            exported: Some(false),
            package: None,
        });
        g.add_edge(Edge {
            from: "a".to_string(),
            to: "b".to_string(),
            kind: EdgeKind::Calls,
            line: Some(2),
            weight: None,
            call_site: None,
        });
        g
    }

    #[test]
    fn round_trips_through_encode_decode() {
        let graph = sample_graph();
        let bytes = encode(&graph).unwrap();
        let decoded = decode(&bytes).unwrap();

        assert_eq!(decoded.node_count(), 2);
        assert_eq!(decoded.edge_count(), 1);
        assert_eq!(decoded.root, "/proj");
        assert!(decoded.find_path("a", "b", 5).is_some());
    }

    #[test]
    fn rejects_bad_magic() {
        let mut bytes = encode(&sample_graph()).unwrap();
        bytes[0] = b'X';
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, CodemapError::SnapshotCorrupt(_)));
    }

    #[test]
    fn rejects_mismatched_schema_version() {
        let mut bytes = encode(&sample_graph()).unwrap();
        bytes[4..8].copy_from_slice(&99u32.to_le_bytes());
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(
            err,
            CodemapError::SnapshotVersionMismatch { expected: 1, found: 99 }
        ));
    }

    #[test]
    fn rejects_truncated_header() {
        let err = decode(&[b'C', b'M']).unwrap_err();
        assert!(matches!(err, CodemapError::SnapshotCorrupt(_)));
    }

    #[test]
    fn rejects_dangling_edge_endpoint() {
        let mut graph = sample_graph();
        graph.edges.push(Edge {
            from: "a".to_string(),
            to: "missing".to_string(),
            kind: EdgeKind::Calls,
            line: None,
            weight: None,
            call_site: None,
        });
        let bytes = encode(&graph).unwrap();
        let err = decode(&bytes).unwrap_err();
        assert!(matches!(err, CodemapError::SnapshotCorrupt(_)));
    }
}

use crate::index::{VectorEntry, VectorIndex};
use codemap_common::error::CodemapError;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use std::path::Path;

const MAGIC: &[u8; 4] = b"CMVX";
const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotPayload {
    entries: Vec<VectorEntry>,
}

pub fn save(index: &VectorIndex, path: &Path) -> Result<(), CodemapError> {
    let payload = SnapshotPayload {
        entries: index.snapshot_entries(),
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

    std::fs::write(path, out).map_err(|source| CodemapError::ReadError {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load(path: &Path) -> Result<VectorIndex, CodemapError> {
    let bytes = std::fs::read(path).map_err(|source| CodemapError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

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

    Ok(VectorIndex::from_entries(payload.entries))
}

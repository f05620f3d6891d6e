use crate::lang::Language;
use std::path::PathBuf;

/// The error taxonomy the core surfaces, per the component design.
///
/// File-local errors (`ReadError`, `ParseError`, per-language grammar
/// failures) are meant to be absorbed by a scan so it keeps making forward
/// progress; structural failures (`PathInvalid`, snapshot decode errors) are
/// meant to bubble up to the caller.
#[derive(Debug, thiserror::Error)]
pub enum CodemapError {
    #[error("path does not exist or cannot be resolved: {0}")]
    PathInvalid(PathBuf),

    #[error("no grammar available for language {0:?}")]
    GrammarMissing(Language),

    #[error("failed to load grammar for {0:?}: {1}")]
    GrammarLoadFailed(Language, String),

    #[error("failed to compile capture query for {0:?}: {1}")]
    QueryCompileFailed(Language, String),

    #[error("parse error in {path}: {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("snapshot schema version mismatch: expected {expected}, found {found}")]
    SnapshotVersionMismatch { expected: u32, found: u32 },

    #[error("snapshot is corrupt: {0}")]
    SnapshotCorrupt(String),

    #[error("vector dimension mismatch: index is {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

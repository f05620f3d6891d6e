use serde::{Deserialize, Serialize};

/// A single call occurrence, attributed to its innermost enclosing
/// function (empty `caller` when the call sits at module scope).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallSite {
    pub caller: String,
    pub caller_line: u32,
    pub callee: String,
    pub call_line: u32,
    pub arg_count: usize,
    pub receiver: Option<String>,
}

/// Per-file output of the call extractor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallAnalysis {
    pub path: String,
    pub calls: Vec<CallSite>,
}

impl CallAnalysis {
    pub fn empty(path: String) -> Self {
        Self {
            path,
            calls: Vec::new(),
        }
    }
}

/// A function's line range, used to attribute calls to their enclosing
/// function by containment.
#[derive(Debug, Clone)]
pub(crate) struct FunctionRange {
    pub name: String,
    pub start_line: u32,
    pub end_line: u32,
}

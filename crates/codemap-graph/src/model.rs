use serde::{Deserialize, Serialize};

/// A node's structural kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    File,
    Package,
    Function,
    Method,
    Type,
    Variable,
    Constant,
}

/// A directed, typed relation kind between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    Imports,
    Calls,
    Defines,
    Contains,
    References,
    Implements,
    Extends,
}

/// A code entity. Immutable once inserted into a [`crate::graph::CodeGraph`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub name: String,
    pub path: String,
    pub line: Option<u32>,
    pub end_line: Option<u32>,
    pub signature: Option<String>,
    pub docstring: Option<String>,
    pub exported: Option<bool>,
    pub package: Option<String>,
}

/// A directed typed edge. Edges are append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
    pub kind: EdgeKind,
    pub line: Option<u32>,
    pub weight: Option<f64>,
    pub call_site: Option<String>,
}

use crate::model::{Edge, EdgeKind, Node, NodeKind};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use std::collections::{HashMap, VecDeque};

/// Aggregate counts reported by [`CodeGraph::stats`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub by_kind: HashMap<NodeKind, usize>,
    pub mean_out_degree: f64,
}

/// A path through the graph: the nodes visited, and the edge connecting
/// each consecutive pair.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphPath {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// Typed node/edge knowledge graph with deterministic ids and derived
/// lookup indexes. Single-writer during build (see [`crate::builder`]),
/// read-only and safe to share across threads afterward.
#[derive(Debug, Clone, Default)]
pub struct CodeGraph {
    pub(crate) nodes: HashMap<String, Node>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) by_path: HashMap<String, Vec<String>>,
    pub(crate) by_name: HashMap<String, Vec<String>>,
    pub(crate) outgoing: HashMap<String, Vec<usize>>,
    pub(crate) incoming: HashMap<String, Vec<usize>>,
    pub root: String,
}

impl CodeGraph {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Inserts a node. A duplicate id is a no-op; the first insertion wins.
    pub fn insert_node(&mut self, node: Node) {
        if self.nodes.contains_key(&node.id) {
            return;
        }
        self.by_path.entry(node.path.clone()).or_default().push(node.id.clone());
        self.by_name.entry(node.name.clone()).or_default().push(node.id.clone());
        self.nodes.insert(node.id.clone(), node);
    }

    /// Appends an edge. Both endpoints must already exist — that's the
    /// builder's responsibility; this is debug-asserted, not enforced at
    /// runtime, so a loaded snapshot can validate instead of panicking.
    pub fn add_edge(&mut self, edge: Edge) {
        debug_assert!(self.nodes.contains_key(&edge.from));
        debug_assert!(self.nodes.contains_key(&edge.to));
        let index = self.edges.len();
        self.outgoing.entry(edge.from.clone()).or_default().push(index);
        self.incoming.entry(edge.to.clone()).or_default().push(index);
        self.edges.push(edge);
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Rebuilds the four derived indexes from `nodes`/`edges` — used after
    /// loading a snapshot, which never trusts stored indexes.
    pub(crate) fn rebuild_indexes(&mut self) {
        self.by_path.clear();
        self.by_name.clear();
        self.outgoing.clear();
        self.incoming.clear();
        for node in self.nodes.values() {
            self.by_path.entry(node.path.clone()).or_default().push(node.id.clone());
            self.by_name.entry(node.name.clone()).or_default().push(node.id.clone());
        }
        for (index, edge) in self.edges.iter().enumerate() {
            self.outgoing.entry(edge.from.clone()).or_default().push(index);
            self.incoming.entry(edge.to.clone()).or_default().push(index);
        }
    }

    /// Case-insensitive substring search against name or path, optionally
    /// filtered to a kind whitelist.
    pub fn find_nodes_by_pattern(&self, pattern: &str, kinds: Option<&[NodeKind]>) -> Vec<&Node> {
        let needle = pattern.to_lowercase();
        self.nodes
            .values()
            .filter(|n| kinds.is_none_or(|ks| ks.contains(&n.kind)))
            .filter(|n| n.name.to_lowercase().contains(&needle) || n.path.to_lowercase().contains(&needle))
            .collect()
    }

    fn outgoing_edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.outgoing
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    fn incoming_edges(&self, id: &str) -> impl Iterator<Item = &Edge> {
        self.incoming
            .get(id)
            .into_iter()
            .flatten()
            .map(move |&i| &self.edges[i])
    }

    /// BFS shortest path from `from` to `to` over outgoing edges. The
    /// first traversal to reach `to` wins. `None` if unreachable within
    /// `max_depth` hops (default 10).
    pub fn find_path(&self, from: &str, to: &str, max_depth: usize) -> Option<GraphPath> {
        if from == to {
            return self.nodes.get(from).map(|n| GraphPath {
                nodes: vec![n.clone()],
                edges: vec![],
            });
        }

        let mut visited = std::collections::HashSet::new();
        visited.insert(from.to_string());
        let mut queue = VecDeque::new();
        queue.push_back(vec![from.to_string()]);

        while let Some(path) = queue.pop_front() {
            let current = path.last().unwrap().clone();
            if path.len() - 1 >= max_depth {
                continue;
            }
            for edge in self.outgoing_edges(&current) {
                if visited.contains(&edge.to) {
                    continue;
                }
                let mut next = path.clone();
                next.push(edge.to.clone());
                if edge.to == to {
                    return Some(self.materialize_path(&next));
                }
                visited.insert(edge.to.clone());
                queue.push_back(next);
            }
        }
        None
    }

    /// Bounded DFS enumeration of simple paths from `from` to `to`
    /// (default max depth 5).
    pub fn find_all_paths(&self, from: &str, to: &str, max_depth: usize) -> Vec<GraphPath> {
        let mut results = Vec::new();
        let mut stack = vec![from.to_string()];
        let mut on_stack: std::collections::HashSet<String> = std::collections::HashSet::new();
        on_stack.insert(from.to_string());
        self.dfs_all_paths(from, to, max_depth, &mut stack, &mut on_stack, &mut results);
        results
    }

    fn dfs_all_paths(
        &self,
        current: &str,
        to: &str,
        max_depth: usize,
        stack: &mut Vec<String>,
        on_stack: &mut std::collections::HashSet<String>,
        results: &mut Vec<GraphPath>,
    ) {
        if current == to && stack.len() > 1 {
            results.push(self.materialize_path(stack));
            return;
        }
        if stack.len() - 1 >= max_depth {
            return;
        }
        for edge in self.outgoing_edges(current) {
            if on_stack.contains(&edge.to) {
                continue;
            }
            stack.push(edge.to.clone());
            on_stack.insert(edge.to.clone());
            self.dfs_all_paths(&edge.to, to, max_depth, stack, on_stack, results);
            on_stack.remove(&edge.to);
            stack.pop();
        }
    }

    fn materialize_path(&self, ids: &[String]) -> GraphPath {
        let nodes: Vec<Node> = ids.iter().filter_map(|id| self.nodes.get(id).cloned()).collect();
        let mut edges = Vec::new();
        for pair in ids.windows(2) {
            if let Some(edge) = self
                .outgoing_edges(&pair[0])
                .find(|e| e.to == pair[1])
            {
                edges.push(edge.clone());
            }
        }
        GraphPath { nodes, edges }
    }

    /// Level-keyed BFS over outgoing edges. Level 0 contains only `root`;
    /// a node already reached at an earlier level is not revisited.
    pub fn dependency_tree(&self, root: &str, max_depth: usize) -> HashMap<u32, Vec<Node>> {
        self.leveled_bfs(root, max_depth, Direction::Outgoing)
    }

    /// Same as [`CodeGraph::dependency_tree`] but over incoming edges.
    pub fn reverse_tree(&self, root: &str, max_depth: usize) -> HashMap<u32, Vec<Node>> {
        self.leveled_bfs(root, max_depth, Direction::Incoming)
    }

    fn leveled_bfs(&self, root: &str, max_depth: usize, direction: Direction) -> HashMap<u32, Vec<Node>> {
        let mut levels: HashMap<u32, Vec<Node>> = HashMap::new();
        let Some(root_node) = self.nodes.get(root) else {
            return levels;
        };
        levels.insert(0, vec![root_node.clone()]);

        let mut visited = std::collections::HashSet::new();
        visited.insert(root.to_string());
        let mut frontier = vec![root.to_string()];
        let mut depth = 0u32;

        while !frontier.is_empty() && (depth as usize) < max_depth {
            depth += 1;
            let mut next_frontier = Vec::new();
            for id in &frontier {
                let edges: Box<dyn Iterator<Item = &Edge>> = match direction {
                    Direction::Outgoing => Box::new(self.outgoing_edges(id)),
                    Direction::Incoming => Box::new(self.incoming_edges(id)),
                };
                for edge in edges {
                    let neighbor = match direction {
                        Direction::Outgoing => &edge.to,
                        Direction::Incoming => &edge.from,
                    };
                    if visited.insert(neighbor.clone()) {
                        if let Some(node) = self.nodes.get(neighbor) {
                            levels.entry(depth).or_default().push(node.clone());
                            next_frontier.push(neighbor.clone());
                        }
                    }
                }
            }
            frontier = next_frontier;
        }

        levels
    }

    /// Totals and per-kind breakdowns; mean out-degree is `edges/nodes`
    /// (0 when the graph is empty).
    pub fn stats(&self) -> GraphStats {
        let mut by_kind: HashMap<NodeKind, usize> = HashMap::new();
        for node in self.nodes.values() {
            *by_kind.entry(node.kind).or_default() += 1;
        }
        let mean_out_degree = if self.nodes.is_empty() {
            0.0
        } else {
            self.edges.len() as f64 / self.nodes.len() as f64
        };
        GraphStats {
            total_nodes: self.nodes.len(),
            total_edges: self.edges.len(),
            by_kind,
            mean_out_degree,
        }
    }

    /// Materializes the graph into a `petgraph` digraph keyed by node id,
    /// for callers that want petgraph's own algorithms (SCC, toposort).
    pub fn to_petgraph(&self) -> (DiGraph<String, EdgeKind>, HashMap<String, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut index = HashMap::new();
        for id in self.nodes.keys() {
            index.insert(id.clone(), graph.add_node(id.clone()));
        }
        for edge in &self.edges {
            if let (Some(&from), Some(&to)) = (index.get(&edge.from), index.get(&edge.to)) {
                graph.add_edge(from, to, edge.kind);
            }
        }
        (graph, index)
    }
}

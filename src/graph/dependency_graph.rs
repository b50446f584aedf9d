//! Core graph structure: library nodes plus ordered dependency edges.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{DepGraphError, DepGraphResult, Edge, LibraryName, Node};

/// The shared-library dependency graph produced by one traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyGraph {
    /// Name of the root artifact.
    root: LibraryName,
    /// All nodes, keyed (and therefore iterated) by name.
    nodes: BTreeMap<LibraryName, Node>,
    /// All edges, in insertion order.
    edges: Vec<Edge>,
}

impl DependencyGraph {
    /// Create a graph containing only the root node.
    pub fn new(root: Node) -> Self {
        let name = root.name.clone();
        let mut nodes = BTreeMap::new();
        nodes.insert(name.clone(), root);
        Self {
            root: name,
            nodes,
            edges: Vec::new(),
        }
    }

    /// Name of the root artifact.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Get a node by name.
    pub fn get_node(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// All nodes, sorted lexicographically by name.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges, in discovery order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All library names, sorted.
    pub fn library_names(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    /// Nodes whose artifact could not be located, sorted by name.
    pub fn unresolved(&self) -> Vec<&Node> {
        self.nodes.values().filter(|n| !n.is_resolved()).collect()
    }

    /// Edges declared by `source`, in discovery order.
    pub fn edges_from<'a>(&'a self, source: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.source == source)
    }

    /// Edges pointing at `target`, in discovery order.
    pub fn edges_to<'a>(&'a self, target: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |e| e.target == target)
    }

    /// Add a node. Each library name may be added once.
    pub fn add_node(&mut self, node: Node) -> DepGraphResult<()> {
        if self.nodes.contains_key(&node.name) {
            return Err(DepGraphError::DuplicateNode(node.name));
        }
        self.nodes.insert(node.name.clone(), node);
        Ok(())
    }

    /// Append an edge. The source must already be a node; the target may be
    /// added afterwards, since traversal records an edge before visiting its
    /// target.
    pub fn push_edge(&mut self, edge: Edge) -> DepGraphResult<()> {
        if !self.nodes.contains_key(&edge.source) {
            return Err(DepGraphError::UnknownNode(edge.source));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Check the model invariants: every edge endpoint is a node, and the
    /// order values, sorted, are exactly `1..=edge_count`.
    pub fn validate(&self) -> DepGraphResult<()> {
        for edge in &self.edges {
            for name in [&edge.source, &edge.target] {
                if !self.nodes.contains_key(name) {
                    return Err(DepGraphError::UnknownNode(name.clone()));
                }
            }
        }

        let mut orders: Vec<u64> = self.edges.iter().map(|e| e.order).collect();
        orders.sort_unstable();
        for (expected, got) in (1u64..).zip(orders) {
            if got != expected {
                return Err(DepGraphError::OrderGap { expected, got });
            }
        }
        Ok(())
    }
}

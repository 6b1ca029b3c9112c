//! # Directed dependency graph
//!
//! [`Graph<T>`] owns one node per distinct value of type `T`. Nodes are stored
//! in an arena (an [`IndexMap`] keyed by value) and refer to each other by
//! [`NodeIndex`], the node's insertion position. Every node carries two
//! insertion-ordered adjacency sets:
//!
//! - `uses`: the nodes it directly depends on (outgoing edges),
//! - `used_by`: the nodes directly depending on it (incoming edges).
//!
//! The two sets are kept as exact inverses of each other: `b` is in
//! `uses(a)` if and only if `a` is in `used_by(b)`.
//!
//! Nodes are created lazily the first time a value appears as the source or
//! the target of an inserted edge, and are never removed.
//!
//! ```
//! use depgraph::graph::Graph;
//!
//! let mut graph = Graph::new();
//! graph.add("app", ["core", "util"]);
//! graph.add("util", ["core"]);
//!
//! let app = graph.node(&"app").unwrap();
//! assert_eq!(app.uses().map(|n| *n.value()).collect::<Vec<_>>(), ["core", "util"]);
//! assert_eq!(graph.n_edges(), 3);
//! ```

use std::{
    fmt::{self, Debug},
    hash::Hash,
};

use ahash::RandomState;
use indexmap::{IndexMap, IndexSet};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use thiserror::Error;

use crate::typed_vec::define_indexed_vec;

pub mod algorithms;
pub mod dot;

define_indexed_vec!(
    /// Position of a node in its [`Graph`]. Stable for the lifetime of the graph.
    pub struct NodeIndex;

    /// Dense per-node storage indexed by [`NodeIndex`].
    pub struct NodeVec;
);

/// Insertion-ordered set used for adjacency.
pub type Set<K> = IndexSet<K, RandomState>;
/// Insertion-ordered map used for per-component results.
pub type Map<K, V> = IndexMap<K, V, RandomState>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("No node for value {value}")]
    NotFound { value: String },
    #[error("Node name {name:?} cannot be written as an edge line")]
    UnwritableName { name: String },
}

impl GraphError {
    pub(crate) fn not_found(value: &impl Debug) -> Self {
        GraphError::NotFound {
            value: format!("{value:?}"),
        }
    }
}

/// Outgoing and incoming edges of one node.
#[derive(Debug, Clone, Default)]
pub struct Adjacency {
    pub(crate) uses: Set<NodeIndex>,
    pub(crate) used_by: Set<NodeIndex>,
}

impl Adjacency {
    pub fn uses(&self) -> &Set<NodeIndex> {
        &self.uses
    }

    pub fn used_by(&self) -> &Set<NodeIndex> {
        &self.used_by
    }
}

#[derive(Clone)]
pub struct Graph<T> {
    nodes: Map<T, Adjacency>,
}

impl<T> Default for Graph<T> {
    fn default() -> Self {
        Graph {
            nodes: Map::default(),
        }
    }
}

impl<T: Debug> Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.nodes.iter().map(|(value, adj)| {
                (
                    value,
                    adj.uses
                        .iter()
                        .map(|&i| self.value(i))
                        .collect::<Vec<_>>(),
                )
            }))
            .finish()
    }
}

impl<T> Graph<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of distinct directed edges, self loops included.
    pub fn n_edges(&self) -> usize {
        self.nodes.values().map(|adj| adj.uses.len()).sum()
    }

    /// Value stored at `index`.
    ///
    /// # Panics
    ///
    /// If `index` does not belong to this graph.
    pub fn value(&self, index: NodeIndex) -> &T {
        &self[index]
    }

    pub fn adjacency(&self, index: NodeIndex) -> &Adjacency {
        &self.nodes[index.0]
    }

    pub fn node_indices(&self) -> impl ExactSizeIterator<Item = NodeIndex> {
        (0..self.nodes.len()).map(NodeIndex)
    }

    /// All nodes, in the order in which they were first referenced.
    pub fn iter_nodes(&self) -> impl ExactSizeIterator<Item = Node<'_, T>> {
        self.node_indices().map(|index| Node { graph: self, index })
    }

    pub fn values(&self) -> impl ExactSizeIterator<Item = &T> {
        self.nodes.keys()
    }

    /// Every `(source, target)` edge, grouped by source in node order.
    pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> {
        self.nodes
            .iter()
            .flat_map(move |(value, adj)| adj.uses.iter().map(move |&t| (value, self.value(t))))
    }

    pub(crate) fn new_nodevec<U: Clone>(&self, init: U) -> NodeVec<U> {
        NodeVec::filled(self.len(), init)
    }
}

impl<T: Hash + Eq> Graph<T> {
    fn get_or_create(&mut self, value: T) -> NodeIndex {
        let entry = self.nodes.entry(value);
        let index = entry.index();
        entry.or_default();
        NodeIndex(index)
    }

    /// Records that `source` uses every value in `targets`.
    ///
    /// Missing nodes are created. Edges already present are left untouched,
    /// so inserting the same edge twice is a no-op. An empty `targets` still
    /// creates the `source` node.
    pub fn add(&mut self, source: T, targets: impl IntoIterator<Item = T>) -> NodeIndex {
        let source = self.get_or_create(source);
        for target in targets {
            let target = self.get_or_create(target);
            self.nodes[source.0].uses.insert(target);
            self.nodes[target.0].used_by.insert(source);
        }
        source
    }

    pub fn add_edge(&mut self, source: T, target: T) {
        self.add(source, [target]);
    }

    pub fn contains(&self, value: &T) -> bool {
        self.nodes.contains_key(value)
    }

    pub fn index_of(&self, value: &T) -> Option<NodeIndex> {
        self.nodes.get_index_of(value).map(NodeIndex)
    }

    pub fn node(&self, value: &T) -> Option<Node<'_, T>> {
        self.index_of(value).map(|index| Node { graph: self, index })
    }
}

impl Graph<usize> {
    /// Creates a random graph over the values `0..nodes` with up to `edges`
    /// edges. Duplicate draws collapse, self loops are allowed.
    pub fn random(nodes: usize, edges: usize, seed: u64) -> Graph<usize> {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut graph = Graph::new();
        for n in 0..nodes {
            graph.add(n, []);
        }
        if nodes == 0 {
            return graph;
        }
        for _ in 0..edges {
            let source = rng.gen_range(0..nodes);
            let target = rng.gen_range(0..nodes);
            graph.add_edge(source, target);
        }
        graph
    }
}

impl<T> std::ops::Index<NodeIndex> for Graph<T> {
    type Output = T;

    fn index(&self, index: NodeIndex) -> &Self::Output {
        match self.nodes.get_index(index.0) {
            Some((value, _)) => value,
            None => panic!(
                "node index {index} out of bounds for graph with {} nodes",
                self.len()
            ),
        }
    }
}

impl<T: Hash + Eq> Extend<(T, T)> for Graph<T> {
    fn extend<I: IntoIterator<Item = (T, T)>>(&mut self, iter: I) {
        for (source, target) in iter {
            self.add_edge(source, target);
        }
    }
}

impl<T: Hash + Eq> FromIterator<(T, T)> for Graph<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        let mut graph = Graph::new();
        graph.extend(iter);
        graph
    }
}

/// Borrowed view of one node of a [`Graph`].
///
/// Two views compare equal when their values do.
pub struct Node<'a, T> {
    graph: &'a Graph<T>,
    index: NodeIndex,
}

impl<T> Clone for Node<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Node<'_, T> {}

impl<'a, T> Node<'a, T> {
    pub fn value(&self) -> &'a T {
        self.graph.value(self.index)
    }

    pub fn index(&self) -> NodeIndex {
        self.index
    }

    fn adjacency(&self) -> &'a Adjacency {
        self.graph.adjacency(self.index)
    }

    /// Nodes this node depends on, in insertion order.
    pub fn uses(&self) -> impl ExactSizeIterator<Item = Node<'a, T>> + 'a {
        let graph = self.graph;
        self.adjacency()
            .uses
            .iter()
            .map(move |&index| Node { graph, index })
    }

    /// Nodes depending on this node, in insertion order.
    pub fn used_by(&self) -> impl ExactSizeIterator<Item = Node<'a, T>> + 'a {
        let graph = self.graph;
        self.adjacency()
            .used_by
            .iter()
            .map(move |&index| Node { graph, index })
    }

    pub fn out_degree(&self) -> usize {
        self.adjacency().uses.len()
    }

    pub fn in_degree(&self) -> usize {
        self.adjacency().used_by.len()
    }
}

impl<T: PartialEq> PartialEq for Node<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl<T: Eq> Eq for Node<'_, T> {}

impl<T: Hash> Hash for Node<'_, T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value().hash(state)
    }
}

impl<T: Debug> Debug for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({:?})", self.value())
    }
}

impl<T: fmt::Display> fmt::Display for Node<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

#[cfg(test)]
mod tests;

//! Depth-first search.
//!
//! The traversal keeps an explicit stack of `(node, next neighbor)` frames
//! instead of recursing, so arbitrarily long dependency chains do not exhaust
//! the call stack. Neighbors are explored in insertion order, which makes the
//! visit order, the predecessors and the timestamps identical to the
//! textbook recursive formulation.

use std::{fmt::Debug, hash::Hash};

use tracing::debug;

use crate::graph::{Graph, GraphError, NodeIndex, NodeVec, Set};

/// Which adjacency set a traversal follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// From a node to the nodes it uses.
    #[default]
    Uses,
    /// From a node to the nodes that use it, i.e. the reverse graph.
    UsedBy,
}

/// Tri-color marking of a node during one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    #[default]
    Unvisited,
    InProgress,
    Finished,
}

/// Per-node bookkeeping of one traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DfsRecord {
    pub color: Color,
    /// Node from which this node was first discovered. `None` for roots and
    /// for nodes never reached.
    pub predecessor: Option<NodeIndex>,
    /// Timestamp taken when the node was entered, starting at 1. Zero while unvisited.
    pub discovered: usize,
    /// Timestamp taken when the node was left. Zero until finished.
    pub finished: usize,
}

/// Result of a depth-first traversal.
///
/// Records are keyed by the same value identity as the graph; the
/// value-based accessors return `None` for values not in the graph.
#[derive(Debug, Clone)]
pub struct DfsState<'a, T> {
    graph: &'a Graph<T>,
    direction: Direction,
    records: NodeVec<DfsRecord>,
    time: usize,
    visit_order: Vec<NodeIndex>,
    finish_order: Vec<NodeIndex>,
    back_edges: Vec<(NodeIndex, NodeIndex)>,
}

impl<'a, T> DfsState<'a, T> {
    pub(crate) fn new(graph: &'a Graph<T>, direction: Direction) -> Self {
        DfsState {
            graph,
            direction,
            records: graph.new_nodevec(DfsRecord::default()),
            time: 0,
            visit_order: Vec::with_capacity(graph.len()),
            finish_order: Vec::with_capacity(graph.len()),
            back_edges: Vec::new(),
        }
    }

    fn neighbors(&self, node: NodeIndex) -> &'a Set<NodeIndex> {
        let adjacency = self.graph.adjacency(node);
        match self.direction {
            Direction::Uses => &adjacency.uses,
            Direction::UsedBy => &adjacency.used_by,
        }
    }

    fn enter(
        &mut self,
        node: NodeIndex,
        predecessor: Option<NodeIndex>,
        visitor: &mut impl FnMut(NodeIndex),
    ) {
        self.time += 1;
        let record = &mut self.records[node];
        record.color = Color::InProgress;
        record.predecessor = predecessor;
        record.discovered = self.time;
        self.visit_order.push(node);
        visitor(node);
    }

    fn leave(&mut self, node: NodeIndex) {
        self.time += 1;
        let record = &mut self.records[node];
        record.color = Color::Finished;
        record.finished = self.time;
        self.finish_order.push(node);
    }

    pub(crate) fn is_unvisited_index(&self, node: NodeIndex) -> bool {
        self.records[node].color == Color::Unvisited
    }

    /// Grows one DFS tree from `root`. Does nothing if `root` was already
    /// reached by an earlier call on this state.
    pub(crate) fn visit(&mut self, root: NodeIndex, visitor: &mut impl FnMut(NodeIndex)) {
        if !self.is_unvisited_index(root) {
            return;
        }
        self.enter(root, None, visitor);

        let mut stack = vec![(root, 0usize)];
        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            match self.neighbors(node).get_index(next) {
                Some(&neighbor) => {
                    frame.1 += 1;
                    match self.records[neighbor].color {
                        Color::Unvisited => {
                            self.enter(neighbor, Some(node), visitor);
                            stack.push((neighbor, 0));
                        }
                        Color::InProgress => self.back_edges.push((node, neighbor)),
                        Color::Finished => {}
                    }
                }
                None => {
                    stack.pop();
                    self.leave(node);
                }
            }
        }
    }

    /// Grows a DFS forest, starting a new tree at every node still unvisited,
    /// in graph insertion order.
    pub(crate) fn visit_all(&mut self, visitor: &mut impl FnMut(NodeIndex)) {
        for node in self.graph.node_indices() {
            self.visit(node, visitor);
        }
    }

    pub fn graph(&self) -> &'a Graph<T> {
        self.graph
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Value of the counter after the last entry or exit. Twice the number of
    /// visited nodes once the traversal is done.
    pub fn time(&self) -> usize {
        self.time
    }

    pub fn records(&self) -> &NodeVec<DfsRecord> {
        &self.records
    }

    /// Visited values in discovery order.
    pub fn visit_order(&self) -> Vec<&'a T> {
        self.visit_order.iter().map(|&i| self.graph.value(i)).collect()
    }

    /// Visited values in the order their visits completed.
    pub fn finish_order(&self) -> Vec<&'a T> {
        self.finish_order.iter().map(|&i| self.graph.value(i)).collect()
    }

    pub(crate) fn finish_order_indices(&self) -> &[NodeIndex] {
        &self.finish_order
    }

    /// Edges that led back to a node still in progress, in the traversal
    /// direction. Each one closes a cycle.
    pub fn back_edges(&self) -> impl ExactSizeIterator<Item = (&'a T, &'a T)> + '_ {
        let graph = self.graph;
        self.back_edges
            .iter()
            .map(move |&(from, to)| (graph.value(from), graph.value(to)))
    }

    /// Whether the explored part of the graph is free of cycles.
    pub fn is_acyclic(&self) -> bool {
        self.back_edges.is_empty()
    }

    /// Visited values ordered so that every node comes before the nodes it
    /// points to in the traversal direction. `None` if a cycle was found.
    pub fn topological_order(&self) -> Option<Vec<&'a T>> {
        if !self.is_acyclic() {
            return None;
        }
        Some(
            self.finish_order
                .iter()
                .rev()
                .map(|&i| self.graph.value(i))
                .collect(),
        )
    }
}

impl<'a, T: Hash + Eq> DfsState<'a, T> {
    pub fn record(&self, value: &T) -> Option<&DfsRecord> {
        self.graph.index_of(value).map(|i| &self.records[i])
    }

    pub fn color(&self, value: &T) -> Option<Color> {
        self.record(value).map(|r| r.color)
    }

    pub fn is_visited(&self, value: &T) -> bool {
        self.color(value)
            .is_some_and(|color| color != Color::Unvisited)
    }

    pub fn predecessor(&self, value: &T) -> Option<&'a T> {
        self.record(value)?
            .predecessor
            .map(|i| self.graph.value(i))
    }

    pub fn discovery_time(&self, value: &T) -> Option<usize> {
        self.record(value)
            .filter(|r| r.color != Color::Unvisited)
            .map(|r| r.discovered)
    }

    pub fn finish_time(&self, value: &T) -> Option<usize> {
        self.record(value)
            .filter(|r| r.color == Color::Finished)
            .map(|r| r.finished)
    }

    /// The chain of predecessors from `value` up to the root of its DFS tree,
    /// both ends included. Empty if `value` was not visited.
    pub fn path_to_root(&self, value: &T) -> Vec<&'a T> {
        let mut path = Vec::new();
        let Some(start) = self.graph.index_of(value) else {
            return path;
        };
        if self.is_unvisited_index(start) {
            return path;
        }
        let mut current = Some(start);
        while let Some(node) = current {
            path.push(self.graph.value(node));
            current = self.records[node].predecessor;
        }
        path
    }
}

impl<T> Graph<T> {
    /// Depth-first search over the whole graph, following `uses` edges.
    ///
    /// Nodes are taken as roots in insertion order whenever they are still
    /// unvisited, so every node is visited exactly once whatever the
    /// connectivity. `visitor` is called on entry to each node.
    pub fn dfs(&self, visitor: impl FnMut(&T)) -> DfsState<'_, T> {
        self.dfs_in(Direction::Uses, visitor)
    }

    /// Same as [`Graph::dfs`], following the adjacency set picked by `direction`.
    pub fn dfs_in(&self, direction: Direction, mut visitor: impl FnMut(&T)) -> DfsState<'_, T> {
        let mut state = DfsState::new(self, direction);
        state.visit_all(&mut |i| visitor(self.value(i)));
        debug!(
            nodes = self.len(),
            back_edges = state.back_edges.len(),
            ?direction,
            "depth-first forest complete"
        );
        state
    }
}

impl<T: Hash + Eq + Debug> Graph<T> {
    /// Depth-first search of the part of the graph reachable from `root`
    /// through `uses` edges.
    ///
    /// ```
    /// use depgraph::graph::Graph;
    ///
    /// let graph: Graph<&str> = [("foo", "bar"), ("bar", "baz")].into_iter().collect();
    /// let mut seen = Vec::new();
    /// graph.dfs_from(&"foo", |v| seen.push(*v)).unwrap();
    /// assert_eq!(seen, ["foo", "bar", "baz"]);
    /// ```
    pub fn dfs_from(&self, root: &T, visitor: impl FnMut(&T)) -> Result<DfsState<'_, T>, GraphError> {
        self.dfs_from_in(Direction::Uses, root, visitor)
    }

    /// Rooted search along `direction`. With [`Direction::UsedBy`] this
    /// collects everything that transitively depends on `root`.
    pub fn dfs_from_in(
        &self,
        direction: Direction,
        root: &T,
        mut visitor: impl FnMut(&T),
    ) -> Result<DfsState<'_, T>, GraphError> {
        let root = self.index_of(root).ok_or_else(|| GraphError::not_found(root))?;
        let mut state = DfsState::new(self, direction);
        state.visit(root, &mut |i| visitor(self.value(i)));
        debug!(
            nodes = self.len(),
            reached = state.visit_order.len(),
            back_edges = state.back_edges.len(),
            ?direction,
            "rooted depth-first search complete"
        );
        Ok(state)
    }
}

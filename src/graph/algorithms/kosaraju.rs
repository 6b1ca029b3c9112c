//! Kosaraju's strongly connected components.
//!
//! Pass 1 runs a depth-first forest over `uses` edges and records nodes in
//! decreasing finish time. Pass 2 walks that list; every node not yet
//! assigned becomes the root of a new component, which collects all nodes
//! reachable from it through `used_by` edges that are still unassigned.
//!
//! The condensation maps each component root to the roots of the other
//! components its members point into. It never contains a cycle.
//!
//! Both passes are `O(V + E)`; building the condensation adds `O(E)`.

use std::hash::Hash;

use bitvec::vec::BitVec;
use tracing::debug;

use super::dfs::{DfsState, Direction};
use crate::graph::{Graph, Map, NodeIndex, NodeVec, Set};

/// Strongly connected components of a [`Graph`], with their condensation.
///
/// Every component is identified by its root: the member from which pass 2
/// discovered it.
#[derive(Debug, Clone)]
pub struct Components<'a, T> {
    graph: &'a Graph<T>,
    finish_order: Vec<NodeIndex>,
    component_of: NodeVec<NodeIndex>,
    members: Map<NodeIndex, Vec<NodeIndex>>,
    condensation: Map<NodeIndex, Set<NodeIndex>>,
    cyclic: BitVec,
}

impl<T> Graph<T> {
    /// Partitions the graph into strongly connected components.
    ///
    /// ```
    /// use depgraph::graph::Graph;
    ///
    /// let graph: Graph<&str> = [("a", "b"), ("b", "c"), ("c", "b"), ("d", "c")]
    ///     .into_iter()
    ///     .collect();
    /// let components = graph.kosaraju();
    ///
    /// assert_eq!(components.len(), 3);
    /// assert!(components.same_component(&"b", &"c"));
    /// assert_eq!(components.component_of(&"c"), Some(&"b"));
    /// ```
    pub fn kosaraju(&self) -> Components<'_, T> {
        let mut forward = DfsState::new(self, Direction::Uses);
        forward.visit_all(&mut |_| {});
        let finish_order: Vec<NodeIndex> = forward
            .finish_order_indices()
            .iter()
            .rev()
            .copied()
            .collect();

        let mut component_of: NodeVec<NodeIndex> = self.node_indices().collect();
        let mut members = Map::default();
        let mut reverse = DfsState::new(self, Direction::UsedBy);
        for &root in &finish_order {
            if !reverse.is_unvisited_index(root) {
                continue;
            }
            let mut component = Vec::new();
            reverse.visit(root, &mut |member| {
                component_of[member] = root;
                component.push(member);
            });
            members.insert(root, component);
        }
        debug_assert!(
            self.node_indices().all(|i| !reverse.is_unvisited_index(i)),
            "every node belongs to a component after pass 2"
        );

        let mut condensation = Map::default();
        for (&root, component) in &members {
            let mut targets = Set::default();
            for &member in component {
                for &used in self.adjacency(member).uses() {
                    let target = component_of[used];
                    if target != root {
                        targets.insert(target);
                    }
                }
            }
            condensation.insert(root, targets);
        }

        let cyclic: BitVec = members
            .values()
            .map(|component| match component.as_slice() {
                [single] => self.adjacency(*single).uses().contains(single),
                _ => true,
            })
            .collect();

        debug!(
            components = members.len(),
            condensation_edges = condensation.values().map(Set::len).sum::<usize>(),
            cyclic = cyclic.count_ones(),
            "strongly connected components computed"
        );

        Components {
            graph: self,
            finish_order,
            component_of,
            members,
            condensation,
            cyclic,
        }
    }
}

impl<'a, T> Components<'a, T> {
    /// Number of components.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn graph(&self) -> &'a Graph<T> {
        self.graph
    }

    /// All nodes in decreasing finish time of the pass 1 search. This is the
    /// order in which pass 2 considered candidate roots.
    pub fn finish_order(&self) -> Vec<&'a T> {
        self.finish_order
            .iter()
            .map(|&i| self.graph.value(i))
            .collect()
    }

    /// Component roots, in the order the components were discovered.
    pub fn roots(&self) -> impl ExactSizeIterator<Item = &'a T> + '_ {
        let graph = self.graph;
        self.members.keys().map(move |&root| graph.value(root))
    }

    /// Each root together with the members of its component, root first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&'a T, Vec<&'a T>)> + '_ {
        let graph = self.graph;
        self.members.iter().map(move |(&root, component)| {
            (
                graph.value(root),
                component.iter().map(|&m| graph.value(m)).collect(),
            )
        })
    }

    /// Roots of the components that contain a cycle: more than one member,
    /// or a single member using itself.
    pub fn cyclic_components(&self) -> impl Iterator<Item = &'a T> + '_ {
        let graph = self.graph;
        self.cyclic
            .iter_ones()
            .filter_map(move |pos| self.members.get_index(pos))
            .map(move |(&root, _)| graph.value(root))
    }

    pub(crate) fn root_index_of(&self, node: NodeIndex) -> NodeIndex {
        self.component_of[node]
    }

    pub(crate) fn condensation_indices(&self) -> &Map<NodeIndex, Set<NodeIndex>> {
        &self.condensation
    }
}

impl<'a, T: Hash + Eq> Components<'a, T> {
    /// Root of the component containing `value`.
    pub fn component_of(&self, value: &T) -> Option<&'a T> {
        let node = self.graph.index_of(value)?;
        Some(self.graph.value(self.root_index_of(node)))
    }

    /// Members of the component containing `value`, root first.
    pub fn members(&self, value: &T) -> Option<Vec<&'a T>> {
        let root = self.root_index_of(self.graph.index_of(value)?);
        self.members
            .get(&root)
            .map(|component| component.iter().map(|&m| self.graph.value(m)).collect())
    }

    /// Whether `a` and `b` are mutually reachable. `false` if either is not
    /// in the graph.
    pub fn same_component(&self, a: &T, b: &T) -> bool {
        match (self.graph.index_of(a), self.graph.index_of(b)) {
            (Some(a), Some(b)) => self.root_index_of(a) == self.root_index_of(b),
            _ => false,
        }
    }

    /// Whether the component containing `value` has a cycle.
    pub fn is_cyclic(&self, value: &T) -> bool {
        let Some(node) = self.graph.index_of(value) else {
            return false;
        };
        self.members
            .get_index_of(&self.root_index_of(node))
            .is_some_and(|pos| self.cyclic[pos])
    }

    /// Root value to the set of its component's member values.
    pub fn component_map(&self) -> Map<&'a T, Set<&'a T>> {
        self.iter()
            .map(|(root, component)| (root, component.into_iter().collect()))
            .collect()
    }

    /// Root value to the roots of the components its members directly use.
    /// Components without outgoing edges map to an empty set.
    pub fn condensation(&self) -> Map<&'a T, Set<&'a T>> {
        let graph = self.graph;
        self.condensation
            .iter()
            .map(|(&root, targets)| {
                (
                    graph.value(root),
                    targets.iter().map(|&t| graph.value(t)).collect(),
                )
            })
            .collect()
    }

    /// The condensation as a graph over component roots. Components without
    /// edges are still present as isolated nodes.
    pub fn condensation_graph(&self) -> Graph<&'a T> {
        let mut graph = Graph::new();
        for (root, targets) in self.condensation() {
            graph.add(root, targets);
        }
        graph
    }
}

use std::collections::VecDeque;

use super::kosaraju::Components;

impl<'a, T> Components<'a, T> {
    /// Component roots ordered with Kahn's algorithm over the condensation:
    /// a component comes before every component it uses. Ties are broken by
    /// discovery order.
    ///
    /// The condensation is acyclic, so every root appears exactly once.
    pub fn topological_order(&self) -> Vec<&'a T> {
        let condensation = self.condensation_indices();

        let mut indeg = vec![0usize; condensation.len()];
        for targets in condensation.values() {
            for target in targets {
                if let Some(pos) = condensation.get_index_of(target) {
                    indeg[pos] += 1;
                }
            }
        }

        let mut q: VecDeque<usize> = indeg
            .iter()
            .enumerate()
            .filter(|(_, d)| **d == 0)
            .map(|(i, _)| i)
            .collect();

        let mut order = Vec::with_capacity(condensation.len());
        while let Some(v) = q.pop_front() {
            let Some((&root, targets)) = condensation.get_index(v) else {
                continue;
            };
            order.push(self.graph().value(root));
            for target in targets {
                let Some(u) = condensation.get_index_of(target) else {
                    continue;
                };
                indeg[u] -= 1;
                if indeg[u] == 0 {
                    q.push_back(u);
                }
            }
        }

        debug_assert_eq!(order.len(), condensation.len(), "condensation has a cycle");
        order
    }
}

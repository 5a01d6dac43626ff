//! This module contains the state pair graph.
//!
//! The graph runs two copies of a DFA side by side. Its nodes are the ordered pairs of states,
//! and the pair `(i, j)` has an edge to `(δ(i, a), δ(j, a))` for every symbol `a`.

use log::trace;

use crate::{internal::NodeID, ConvexError, ConvexErrorKind, Dfa, Result};

/// The state pair graph of a DFA.
/// The graph is read-only after construction.
#[derive(Debug, Clone)]
pub struct StatePairGraph {
    state_count: usize,
    // The sorted successors of each node.
    adjacency: Vec<Vec<NodeID>>,
}

impl StatePairGraph {
    /// Build the state pair graph of the given DFA.
    pub fn new(dfa: &Dfa) -> Self {
        let state_count = dfa.state_count();
        let transitions = dfa.transitions();
        let mut adjacency = Vec::with_capacity(state_count * state_count);
        for left in 0..state_count {
            for right in 0..state_count {
                let mut successors: Vec<NodeID> = transitions[left]
                    .iter()
                    .zip(transitions[right].iter())
                    .map(|(l, r)| NodeID::new(l * state_count + r))
                    .collect();
                successors.sort_unstable();
                successors.dedup();
                adjacency.push(successors);
            }
        }
        trace!(
            "State pair graph with {} nodes for a DFA with {} states",
            adjacency.len(),
            state_count
        );
        StatePairGraph {
            state_count,
            adjacency,
        }
    }

    /// The number of nodes, i.e. the square of the state count.
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns true if the pair `(left1, right1)` can be reached from `(left0, right0)`.
    /// Every pair reaches itself.
    pub fn reachable(
        &self,
        left0: usize,
        right0: usize,
        left1: usize,
        right1: usize,
    ) -> Result<bool> {
        let source = self.node(left0, right0)?;
        let target = self.node(left1, right1)?;
        let mut visited = vec![false; self.node_count()];
        let mut stack = vec![source];
        while let Some(node) = stack.pop() {
            if node == target {
                return Ok(true);
            }
            if visited[node.as_usize()] {
                continue;
            }
            visited[node.as_usize()] = true;
            stack.extend(
                self.adjacency[node]
                    .iter()
                    .filter(|successor| !visited[successor.as_usize()]),
            );
        }
        Ok(false)
    }

    fn node(&self, left: usize, right: usize) -> Result<NodeID> {
        for state in [left, right] {
            if state >= self.state_count {
                return Err(ConvexError::new(ConvexErrorKind::StateOutOfRange {
                    state,
                    state_count: self.state_count,
                }));
            }
        }
        Ok(NodeID::new(left * self.state_count + right))
    }
}

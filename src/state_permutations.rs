//! This module contains the lazy enumeration of state renumberings.

use log::trace;

use crate::Dfa;

/// An iterator over all renumberings of the states `1..n` of a DFA. State 0 keeps its number.
///
/// The renumberings are produced by the iterative form of Heap's algorithm. Each step exchanges
/// two states of an owned working copy, so consecutive automata differ by a single swap. The
/// iterator yields `(n-1)!` automata and can be dropped early.
///
/// ```
/// use convex_automata::{AutomatonOperator, Dfa};
/// let dfa = Dfa::from_code("1230tftf", 4, 1).unwrap();
/// assert_eq!(AutomatonOperator::state_permutations(&dfa).count(), 6);
/// ```
#[derive(Debug, Clone)]
pub struct StatePermutations {
    working_copy: Dfa,
    // The states that take part in the permutation, i.e. 1..n in their current order.
    elements: Vec<usize>,
    // The loop counters of Heap's algorithm.
    counters: Vec<usize>,
    index: usize,
    started: bool,
}

impl StatePermutations {
    pub(crate) fn new(dfa: &Dfa) -> Self {
        let elements: Vec<usize> = (1..dfa.state_count()).collect();
        StatePermutations {
            working_copy: dfa.clone(),
            counters: vec![0; elements.len()],
            elements,
            index: 1,
            started: false,
        }
    }
}

impl Iterator for StatePermutations {
    type Item = Dfa;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(self.working_copy.clone());
        }
        while self.index < self.elements.len() {
            if self.counters[self.index] < self.index {
                let j = if self.index % 2 == 0 {
                    0
                } else {
                    self.counters[self.index]
                };
                let (a, b) = (self.elements[j], self.elements[self.index]);
                trace!("Swap states {} and {}", a, b);
                self.working_copy.swap_states(a, b);
                self.elements.swap(j, self.index);
                self.counters[self.index] += 1;
                self.index = 1;
                return Some(self.working_copy.clone());
            }
            self.counters[self.index] = 0;
            self.index += 1;
        }
        None
    }
}

//! The subset construction that turns an NFA into a DFA.

use std::collections::VecDeque;

use log::trace;
use rustc_hash::FxHashMap;

use crate::{nfa::StateSet, Dfa, Nfa, Result};

impl Dfa {
    /// Create a DFA from an NFA using the subset construction algorithm.
    ///
    /// The state 0 of the DFA is the set of all initial states of the NFA. The sets of NFA
    /// states are numbered in the order of their discovery by a breadth-first traversal. A set
    /// is final if it contains a final NFA state.
    ///
    /// The NFA is expected to be complete. An incomplete NFA yields a DFA that contains the
    /// empty set as a dead state.
    pub(crate) fn try_from_nfa(nfa: &Nfa) -> Result<Self> {
        let start_set = nfa.initial_states();
        trace!("Subset construction, start set {:?}", start_set);

        let mut indices: FxHashMap<StateSet, usize> = FxHashMap::default();
        let mut sets: Vec<StateSet> = Vec::new();
        let mut work_list: VecDeque<usize> = VecDeque::new();

        indices.insert(start_set.clone(), 0);
        sets.push(start_set);
        work_list.push_back(0);

        let mut transitions: Vec<Vec<usize>> = Vec::new();
        while let Some(index) = work_list.pop_front() {
            let mut row = Vec::with_capacity(nfa.alphabet_size());
            for symbol in 0..nfa.alphabet_size() {
                let target_set = nfa.move_set(&sets[index], symbol);
                let target = match indices.get(&target_set) {
                    Some(target) => *target,
                    None => {
                        let target = sets.len();
                        trace!("Add state {}: {:?}", target, target_set);
                        indices.insert(target_set.clone(), target);
                        sets.push(target_set);
                        work_list.push_back(target);
                        target
                    }
                };
                row.push(target);
            }
            // The work list is processed in discovery order, so the rows line up with the
            // state numbers.
            debug_assert_eq!(transitions.len(), index);
            transitions.push(row);
        }

        let final_flags = sets.iter().map(|set| nfa.contains_final(set)).collect();
        Dfa::new(sets.len(), nfa.alphabet_size(), transitions, final_flags)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Dfa, Nfa};

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_try_from_nfa() {
        init();
        // Words over {a, b} whose second to last symbol is 'a'.
        let mut nfa = Nfa::new(3, 2).unwrap();
        nfa.set_initial(0, true).unwrap();
        nfa.set_final(2, true).unwrap();
        nfa.add_transition(0, 0, 0).unwrap();
        nfa.add_transition(0, 1, 0).unwrap();
        nfa.add_transition(0, 0, 1).unwrap();
        nfa.add_transition(1, 0, 2).unwrap();
        nfa.add_transition(1, 1, 2).unwrap();

        let dfa = Dfa::try_from_nfa(&nfa).unwrap();
        // {0}, {0,1}, {0,1,2}, {0,2}, and the empty set is never reached from {0}.
        assert_eq!(dfa.state_count(), 4);
        assert_eq!(dfa.transitions()[0], vec![1, 0]);
        assert!(!dfa.accepts(&[]).unwrap());
        assert!(dfa.accepts(&[0, 1]).unwrap());
        assert!(dfa.accepts(&[1, 1, 0, 0]).unwrap());
        assert!(!dfa.accepts(&[0, 1, 1]).unwrap());
    }

    #[test]
    fn test_try_from_nfa_without_initial_states() {
        init();
        let mut nfa = Nfa::new(1, 1).unwrap();
        nfa.set_final(0, true).unwrap();
        nfa.add_transition(0, 0, 0).unwrap();
        let dfa = Dfa::try_from_nfa(&nfa).unwrap();
        assert_eq!(dfa.state_count(), 1);
        assert_eq!(dfa.transitions(), &[vec![0]]);
        assert_eq!(dfa.final_flags(), &[false]);
    }
}

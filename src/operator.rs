//! This module contains the operator library.
//! All operators take their operands by reference and return new automata.

use std::collections::VecDeque;

use log::trace;

use crate::{
    errors::incompatible,
    internal::Minimizer,
    nfa::StateSet,
    Dfa, Nfa, Result, StatePermutations,
};

/// A collection of operations on finite automata.
///
/// ```
/// use convex_automata::{AutomatonOperator, Dfa};
/// // Words over {a, b} with an odd number of a's.
/// let odd_a = Dfa::from_code("1001ft", 2, 2).unwrap();
/// let even_a = AutomatonOperator::complement(&odd_a).unwrap();
/// let both = AutomatonOperator::intersection(&odd_a, &even_a).unwrap();
/// assert!(AutomatonOperator::is_empty_language(&both).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct AutomatonOperator;

impl AutomatonOperator {
    /// The automaton of the complement language. The finality of every state is flipped.
    pub fn complement(dfa: &Dfa) -> Result<Dfa> {
        Dfa::new(
            dfa.state_count(),
            dfa.alphabet_size(),
            dfa.transitions().to_vec(),
            dfa.final_flags().iter().map(|f| !f).collect(),
        )
    }

    /// The NFA of the reversed language.
    /// All transitions are reversed, the final states become initial and state 0 becomes the
    /// only final state.
    pub fn reverse(dfa: &Dfa) -> Result<Nfa> {
        let mut transitions = vec![vec![StateSet::new(); dfa.alphabet_size()]; dfa.state_count()];
        for (source, row) in dfa.transitions().iter().enumerate() {
            for (symbol, target) in row.iter().enumerate() {
                transitions[*target][symbol].insert(source);
            }
        }
        let mut final_flags = vec![false; dfa.state_count()];
        final_flags[0] = true;
        Nfa::from_parts(
            dfa.state_count(),
            dfa.alphabet_size(),
            transitions,
            dfa.final_flags().to_vec(),
            final_flags,
        )
    }

    /// The product automaton of the intersection of both languages.
    /// The pair `(i, j)` becomes the state `i * n2 + j` where `n2` is the state count of the
    /// second operand. A pair is final if both components are final.
    pub fn intersection(dfa1: &Dfa, dfa2: &Dfa) -> Result<Dfa> {
        if dfa1.alphabet_size() != dfa2.alphabet_size() {
            return Err(incompatible!(
                "intersection of automata with alphabet sizes {} and {}",
                dfa1.alphabet_size(),
                dfa2.alphabet_size()
            ));
        }
        let stride = dfa2.state_count();
        let state_count = dfa1.state_count() * stride;
        let mut transitions = Vec::with_capacity(state_count);
        let mut final_flags = Vec::with_capacity(state_count);
        for state1 in 0..dfa1.state_count() {
            for state2 in 0..stride {
                transitions.push(
                    dfa1.transitions()[state1]
                        .iter()
                        .zip(dfa2.transitions()[state2].iter())
                        .map(|(target1, target2)| target1 * stride + target2)
                        .collect(),
                );
                final_flags.push(dfa1.final_flags()[state1] && dfa2.final_flags()[state2]);
            }
        }
        Dfa::new(state_count, dfa1.alphabet_size(), transitions, final_flags)
    }

    /// Returns true if the automaton accepts no word at all.
    /// This is the case if the minimal automaton is a single non-final state that loops on every
    /// symbol.
    pub fn is_empty_language(dfa: &Dfa) -> Result<bool> {
        let minimized = Self::minimize(dfa)?;
        Ok(minimized.state_count() == 1
            && !minimized.final_flags()[0]
            && minimized.is_absorbing(0))
    }

    /// Returns true if both automata accept the same language.
    pub fn is_equivalent(dfa1: &Dfa, dfa2: &Dfa) -> Result<bool> {
        let only_in_first = Self::intersection(dfa1, &Self::complement(dfa2)?)?;
        if !Self::is_empty_language(&only_in_first)? {
            return Ok(false);
        }
        let only_in_second = Self::intersection(dfa2, &Self::complement(dfa1)?)?;
        Self::is_empty_language(&only_in_second)
    }

    /// Add a dead state to the NFA.
    /// Every empty transition set is redirected to the new state, which is neither initial nor
    /// final and loops on every symbol. The dead state is always added, even if the NFA is
    /// complete already.
    pub fn make_complete(nfa: &Nfa) -> Result<Nfa> {
        let dead_state = nfa.state_count();
        let mut transitions: Vec<Vec<StateSet>> = nfa
            .transitions()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|targets| {
                        if targets.is_empty() {
                            StateSet::from([dead_state])
                        } else {
                            targets.clone()
                        }
                    })
                    .collect()
            })
            .collect();
        transitions.push(vec![StateSet::from([dead_state]); nfa.alphabet_size()]);
        let mut initial_flags = nfa.initial_flags().to_vec();
        initial_flags.push(false);
        let mut final_flags = nfa.final_flags().to_vec();
        final_flags.push(false);
        Nfa::from_parts(
            dead_state + 1,
            nfa.alphabet_size(),
            transitions,
            initial_flags,
            final_flags,
        )
    }

    /// Turn the NFA into a DFA by the subset construction.
    /// The NFA is completed first. State 0 of the result is the set of all initial states.
    pub fn determinize(nfa: &Nfa) -> Result<Dfa> {
        let complete = Self::make_complete(nfa)?;
        Dfa::try_from_nfa(&complete)
    }

    /// The minimal DFA of the language.
    /// Unreachable states are removed before the partition refinement.
    pub fn minimize(dfa: &Dfa) -> Result<Dfa> {
        let reachable = Self::remove_unreachable_states(dfa)?;
        Minimizer::minimize(&reachable)
    }

    /// Remove all states that can't be reached from state 0.
    /// The remaining states are renumbered densely and keep their relative order.
    pub fn remove_unreachable_states(dfa: &Dfa) -> Result<Dfa> {
        let mut reachable = vec![false; dfa.state_count()];
        let mut queue = VecDeque::from([0]);
        reachable[0] = true;
        while let Some(state) = queue.pop_front() {
            for target in &dfa.transitions()[state] {
                if !reachable[*target] {
                    reachable[*target] = true;
                    queue.push_back(*target);
                }
            }
        }

        let mut new_numbers = vec![None; dfa.state_count()];
        let mut next = 0;
        for (state, is_reachable) in reachable.iter().enumerate() {
            if *is_reachable {
                new_numbers[state] = Some(next);
                next += 1;
            }
        }
        if next == dfa.state_count() {
            return Ok(dfa.clone());
        }
        trace!(
            "Removing {} unreachable states",
            dfa.state_count() - next
        );

        let mut transitions = Vec::with_capacity(next);
        let mut final_flags = Vec::with_capacity(next);
        for (state, row) in dfa.transitions().iter().enumerate() {
            if reachable[state] {
                // Targets of reachable states are reachable themselves.
                transitions.push(
                    row.iter()
                        .map(|target| new_numbers[*target].unwrap_or_default())
                        .collect(),
                );
                final_flags.push(dfa.final_flags()[state]);
            }
        }
        Dfa::new(next, dfa.alphabet_size(), transitions, final_flags)
    }

    /// Enumerate all renumberings of the states `1..n` lazily. State 0 keeps its number.
    /// The iterator yields `(n-1)!` automata.
    pub fn state_permutations(dfa: &Dfa) -> StatePermutations {
        StatePermutations::new(dfa)
    }

    /// Collect all renumberings of the states `1..n`.
    /// The cost grows factorially with the number of states.
    pub fn automaton_state_permutations(dfa: &Dfa) -> Vec<Dfa> {
        Self::state_permutations(dfa).collect()
    }

    /// Relabel the symbols of the automaton.
    /// The transition of the result on symbol `a` is the transition of the input on
    /// `mapping[a]`.
    pub fn homomorphic_image(dfa: &Dfa, mapping: &[usize]) -> Result<Dfa> {
        if mapping.len() != dfa.alphabet_size() {
            return Err(incompatible!(
                "symbol mapping has {} entries, the alphabet has {} symbols",
                mapping.len(),
                dfa.alphabet_size()
            ));
        }
        if let Some(symbol) = mapping.iter().find(|s| **s >= dfa.alphabet_size()) {
            return Err(incompatible!(
                "symbol mapping refers to the unknown symbol {}",
                symbol
            ));
        }
        let transitions = dfa
            .transitions()
            .iter()
            .map(|row| mapping.iter().map(|symbol| row[*symbol]).collect())
            .collect();
        Dfa::new(
            dfa.state_count(),
            dfa.alphabet_size(),
            transitions,
            dfa.final_flags().to_vec(),
        )
    }

    /// The automaton of the cut `A ! B`.
    ///
    /// The cut accepts a word if A accepts a prefix of it and B accepts the suffix that follows
    /// the longest such prefix. The product state `(a, b)` tracks A in `a` and B on the input
    /// read since A was in a final state the last time.
    ///
    /// If the initial state of A is final the result has `nA * nB` states with `(a, b)` at
    /// `b * nA + a`. Otherwise the first `nA` states run A alone until it reaches a final state
    /// and the product states follow at offset `nA`.
    pub fn cut(a: &Dfa, b: &Dfa) -> Result<Dfa> {
        if a.alphabet_size() != b.alphabet_size() {
            return Err(incompatible!(
                "cut of automata with alphabet sizes {} and {}",
                a.alphabet_size(),
                b.alphabet_size()
            ));
        }
        let n_a = a.state_count();
        let n_b = b.state_count();
        let a_final = a.final_flags();
        let offset = if a_final[0] { 0 } else { n_a };
        let state_count = offset + n_a * n_b;

        let mut transitions = Vec::with_capacity(state_count);
        // States that only run A.
        for row in a.transitions().iter().take(offset) {
            transitions.push(
                row.iter()
                    .map(|target| if a_final[*target] { target + n_a } else { *target })
                    .collect(),
            );
        }
        // Product states.
        for state in offset..state_count {
            let state_a = state % n_a;
            let state_b = (state - offset) / n_a;
            transitions.push(
                a.transitions()[state_a]
                    .iter()
                    .zip(b.transitions()[state_b].iter())
                    .map(|(target_a, target_b)| {
                        if a_final[*target_a] {
                            // A accepted again, B restarts.
                            target_a + offset
                        } else {
                            target_b * n_a + offset + target_a
                        }
                    })
                    .collect(),
            );
        }

        let mut final_flags = vec![false; state_count];
        for state_b in b.final_states() {
            for state_a in 0..n_a {
                final_flags[offset + state_b * n_a + state_a] = true;
            }
        }
        Dfa::new(state_count, a.alphabet_size(), transitions, final_flags)
    }
}

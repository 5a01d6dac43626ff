//! This module contains the NFA value type.
//! The NFA may have several initial states and has no epsilon transitions. It is mainly used as
//! intermediate result, e.g. of the reversal of a DFA, and is turned back into a DFA by the
//! subset construction.

use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    dfa::{check_sizes, symbol_char},
    errors::malformed,
    ConvexError, ConvexErrorKind, Dfa, Result,
};

/// A set of NFA states. The ordered set gives a canonical form that can be used as key during
/// the subset construction.
pub type StateSet = BTreeSet<usize>;

/// A nondeterministic finite automaton with possibly multiple initial states.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "NfaParts"))]
pub struct Nfa {
    state_count: usize,
    alphabet_size: usize,
    // transitions[state][symbol] is the set of target states, possibly empty.
    transitions: Vec<Vec<StateSet>>,
    initial_flags: Vec<bool>,
    final_flags: Vec<bool>,
    // Whether every (state, symbol) pair has at least one target.
    complete: bool,
}

impl Nfa {
    /// Creates an NFA without transitions, initial or final states.
    pub fn new(state_count: usize, alphabet_size: usize) -> Result<Self> {
        check_sizes(state_count, alphabet_size)?;
        Ok(Nfa {
            state_count,
            alphabet_size,
            transitions: vec![vec![StateSet::new(); alphabet_size]; state_count],
            initial_flags: vec![false; state_count],
            final_flags: vec![false; state_count],
            complete: false,
        })
    }

    /// Creates an NFA from its raw parts.
    /// The completeness flag is derived from the transition table.
    pub fn from_parts(
        state_count: usize,
        alphabet_size: usize,
        transitions: Vec<Vec<StateSet>>,
        initial_flags: Vec<bool>,
        final_flags: Vec<bool>,
    ) -> Result<Self> {
        check_sizes(state_count, alphabet_size)?;
        if transitions.len() != state_count
            || transitions.iter().any(|row| row.len() != alphabet_size)
        {
            return Err(malformed!(
                "transition table doesn't have the shape {}x{}",
                state_count,
                alphabet_size
            ));
        }
        if transitions
            .iter()
            .flatten()
            .flatten()
            .any(|target| *target >= state_count)
        {
            return Err(malformed!("transition to a state outside of 0..{}", state_count));
        }
        if initial_flags.len() != state_count || final_flags.len() != state_count {
            return Err(malformed!(
                "initiality and finality arrays must have {} entries",
                state_count
            ));
        }
        let complete = transitions.iter().flatten().all(|targets| !targets.is_empty());
        Ok(Nfa {
            state_count,
            alphabet_size,
            transitions,
            initial_flags,
            final_flags,
            complete,
        })
    }

    /// Get the number of states.
    #[inline]
    pub fn state_count(&self) -> usize {
        self.state_count
    }

    /// Get the size of the alphabet.
    #[inline]
    pub fn alphabet_size(&self) -> usize {
        self.alphabet_size
    }

    /// Returns true if every state has at least one target on every symbol.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Get the initiality flags of all states.
    pub fn initial_flags(&self) -> &[bool] {
        &self.initial_flags
    }

    /// Get the finality flags of all states.
    pub fn final_flags(&self) -> &[bool] {
        &self.final_flags
    }

    /// Returns true if the given state is initial.
    pub fn is_initial(&self, state: usize) -> Result<bool> {
        self.check_state(state)?;
        Ok(self.initial_flags[state])
    }

    /// Returns true if the given state is final.
    pub fn is_final(&self, state: usize) -> Result<bool> {
        self.check_state(state)?;
        Ok(self.final_flags[state])
    }

    /// The set of initial states.
    pub fn initial_states(&self) -> StateSet {
        self.initial_flags
            .iter()
            .enumerate()
            .filter_map(|(state, initial)| initial.then_some(state))
            .collect()
    }

    /// Apply the transition function to the given state and symbol.
    pub fn apply(&self, state: usize, symbol: usize) -> Result<&StateSet> {
        self.check_state(state)?;
        self.check_symbol(symbol)?;
        Ok(&self.transitions[state][symbol])
    }

    /// Mark the given state as initial or not.
    pub fn set_initial(&mut self, state: usize, initial: bool) -> Result<()> {
        self.check_state(state)?;
        self.initial_flags[state] = initial;
        Ok(())
    }

    /// Mark the given state as final or not.
    pub fn set_final(&mut self, state: usize, is_final: bool) -> Result<()> {
        self.check_state(state)?;
        self.final_flags[state] = is_final;
        Ok(())
    }

    /// Add a transition from `from` to `to` on `symbol`.
    pub fn add_transition(&mut self, from: usize, symbol: usize, to: usize) -> Result<()> {
        self.check_state(from)?;
        self.check_state(to)?;
        self.check_symbol(symbol)?;
        self.transitions[from][symbol].insert(to);
        if !self.complete {
            self.complete = self
                .transitions
                .iter()
                .flatten()
                .all(|targets| !targets.is_empty());
        }
        Ok(())
    }

    /// Calculate move(T, a) for a set of states T and a symbol a.
    /// This is the set of states that can be reached from T by reading a.
    pub(crate) fn move_set(&self, states: &StateSet, symbol: usize) -> StateSet {
        let mut targets = StateSet::new();
        for state in states {
            targets.extend(self.transitions[*state][symbol].iter().copied());
        }
        targets
    }

    /// Returns true if the set contains at least one final state.
    pub(crate) fn contains_final(&self, states: &StateSet) -> bool {
        states.iter().any(|state| self.final_flags[*state])
    }

    pub(crate) fn transitions(&self) -> &[Vec<StateSet>] {
        &self.transitions
    }

    fn check_state(&self, state: usize) -> Result<()> {
        if state >= self.state_count {
            return Err(ConvexError::new(ConvexErrorKind::StateOutOfRange {
                state,
                state_count: self.state_count,
            }));
        }
        Ok(())
    }

    fn check_symbol(&self, symbol: usize) -> Result<()> {
        if symbol >= self.alphabet_size {
            return Err(ConvexError::new(ConvexErrorKind::SymbolOutOfRange {
                symbol,
                alphabet_size: self.alphabet_size,
            }));
        }
        Ok(())
    }
}

// Deserialized data passes through `Nfa::from_parts`, the completeness flag is recomputed.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct NfaParts {
    state_count: usize,
    alphabet_size: usize,
    transitions: Vec<Vec<StateSet>>,
    initial_flags: Vec<bool>,
    final_flags: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<NfaParts> for Nfa {
    type Error = ConvexError;

    fn try_from(parts: NfaParts) -> Result<Self> {
        Nfa::from_parts(
            parts.state_count,
            parts.alphabet_size,
            parts.transitions,
            parts.initial_flags,
            parts.final_flags,
        )
    }
}

impl From<&Dfa> for Nfa {
    /// View a DFA as an NFA with the single initial state 0.
    fn from(dfa: &Dfa) -> Self {
        let mut initial_flags = vec![false; dfa.state_count()];
        initial_flags[0] = true;
        Nfa {
            state_count: dfa.state_count(),
            alphabet_size: dfa.alphabet_size(),
            transitions: dfa
                .transitions()
                .iter()
                .map(|row| row.iter().map(|target| StateSet::from([*target])).collect())
                .collect(),
            initial_flags,
            final_flags: dfa.final_flags().to_vec(),
            complete: true,
        }
    }
}

impl std::fmt::Display for Nfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "NFA with {} states over {} symbols",
            self.state_count, self.alphabet_size
        )?;
        for (state, row) in self.transitions.iter().enumerate() {
            write!(
                f,
                "{}{}{} -> ",
                if self.initial_flags[state] { ">" } else { " " },
                if self.final_flags[state] { "*" } else { " " },
                state
            )?;
            for (symbol, targets) in row.iter().enumerate() {
                write!(f, "{}:{:?}, ", symbol_char(symbol), targets)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_nfa_is_empty() {
        let nfa = Nfa::new(3, 2).unwrap();
        assert!(!nfa.is_complete());
        assert!(nfa.initial_states().is_empty());
        assert!(nfa.apply(2, 1).unwrap().is_empty());
        assert!(Nfa::new(0, 2).is_err());
        assert!(Nfa::new(1, 27).is_err());
    }

    #[test]
    fn test_add_transition_updates_completeness() {
        let mut nfa = Nfa::new(2, 1).unwrap();
        nfa.add_transition(0, 0, 1).unwrap();
        assert!(!nfa.is_complete());
        nfa.add_transition(1, 0, 0).unwrap();
        nfa.add_transition(1, 0, 1).unwrap();
        assert!(nfa.is_complete());
        assert_eq!(nfa.apply(1, 0).unwrap(), &StateSet::from([0, 1]));
        assert!(nfa.add_transition(0, 1, 1).is_err());
        assert!(nfa.add_transition(0, 0, 2).is_err());
    }

    #[test]
    fn test_from_dfa() {
        let dfa = Dfa::new(2, 2, vec![vec![1, 0], vec![0, 1]], vec![false, true]).unwrap();
        let nfa = Nfa::from(&dfa);
        assert!(nfa.is_complete());
        assert_eq!(nfa.initial_states(), StateSet::from([0]));
        assert!(nfa.is_final(1).unwrap());
        assert_eq!(nfa.apply(0, 0).unwrap(), &StateSet::from([1]));
        assert!(nfa.apply(0, 2).is_err());
    }

    #[test]
    fn test_move_set() {
        let mut nfa = Nfa::new(3, 1).unwrap();
        nfa.add_transition(0, 0, 1).unwrap();
        nfa.add_transition(1, 0, 2).unwrap();
        nfa.add_transition(1, 0, 0).unwrap();
        let targets = nfa.move_set(&StateSet::from([0, 1]), 0);
        assert_eq!(targets, StateSet::from([0, 1, 2]));
        assert!(nfa.move_set(&StateSet::new(), 0).is_empty());
    }

    #[test]
    fn test_from_parts() {
        let transitions = vec![
            vec![StateSet::from([1])],
            vec![StateSet::from([0, 1])],
        ];
        let nfa =
            Nfa::from_parts(2, 1, transitions.clone(), vec![true, false], vec![false, true])
                .unwrap();
        assert!(nfa.is_complete());
        assert!(Nfa::from_parts(2, 1, transitions, vec![true], vec![false, true]).is_err());
        assert!(Nfa::from_parts(1, 1, vec![vec![StateSet::from([3])]], vec![true], vec![true])
            .is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialization() {
        let dfa = Dfa::new(2, 2, vec![vec![1, 0], vec![0, 1]], vec![false, true]).unwrap();
        let nfa = Nfa::from(&dfa);
        let serialized = serde_json::to_string(&nfa).unwrap();
        let deserialized: Nfa = serde_json::from_str(&serialized).unwrap();
        assert_eq!(nfa, deserialized);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialization_validates() {
        // Two states but only one row and one flag each.
        let broken = r#"{"state_count":2,"alphabet_size":1,"transitions":[[[0]]],
            "initial_flags":[true],"final_flags":[false],"complete":true}"#;
        assert!(serde_json::from_str::<Nfa>(broken).is_err());

        // A stored completeness flag is not trusted.
        let incomplete = r#"{"state_count":2,"alphabet_size":1,"transitions":[[[1]],[[]]],
            "initial_flags":[true,false],"final_flags":[false,true],"complete":true}"#;
        let nfa: Nfa = serde_json::from_str(incomplete).unwrap();
        assert!(!nfa.is_complete());
    }
}

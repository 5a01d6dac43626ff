//! This module contains the DFA value type.
//! The DFA is stored as a dense transition table with one row per state and one column per
//! symbol. State 0 is always the initial state.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{errors::malformed, ConvexError, ConvexErrorKind, Result};

/// The largest supported alphabet. Symbols are usually written as the letters `a` to `z`.
pub const MAX_ALPHABET_SIZE: usize = 26;

/// A deterministic finite automaton.
///
/// The start state is by convention always state 0. Every operator that renumbers states
/// restores this invariant.
///
/// A `Dfa` is validated on construction and can't be modified afterwards through the public
/// API. Operators create new values, cloning deep-copies the transition table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DfaParts"))]
pub struct Dfa {
    state_count: usize,
    alphabet_size: usize,
    // The transition table, transitions[state][symbol] is the target state.
    transitions: Vec<Vec<usize>>,
    // The finality flag of each state.
    final_flags: Vec<bool>,
}

impl Dfa {
    /// Creates a new DFA from its raw parts.
    ///
    /// Fails with [`ConvexErrorKind::MalformedAutomaton`] if the state count is zero, the
    /// alphabet size is not in `1..=26`, or the transition table or finality array don't match
    /// the declared sizes.
    pub fn new(
        state_count: usize,
        alphabet_size: usize,
        transitions: Vec<Vec<usize>>,
        final_flags: Vec<bool>,
    ) -> Result<Self> {
        check_sizes(state_count, alphabet_size)?;
        if transitions.len() != state_count {
            return Err(malformed!(
                "transition table has {} rows, expected {}",
                transitions.len(),
                state_count
            ));
        }
        for (state, row) in transitions.iter().enumerate() {
            if row.len() != alphabet_size {
                return Err(malformed!(
                    "row {} of the transition table has {} entries, expected {}",
                    state,
                    row.len(),
                    alphabet_size
                ));
            }
            if let Some(target) = row.iter().find(|target| **target >= state_count) {
                return Err(malformed!(
                    "state {} has a transition to the unknown state {}",
                    state,
                    target
                ));
            }
        }
        if final_flags.len() != state_count {
            return Err(malformed!(
                "finality array has {} entries, expected {}",
                final_flags.len(),
                state_count
            ));
        }
        Ok(Dfa {
            state_count,
            alphabet_size,
            transitions,
            final_flags,
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

    /// Get the transition table.
    pub fn transitions(&self) -> &[Vec<usize>] {
        &self.transitions
    }

    /// Get the finality flags of all states.
    pub fn final_flags(&self) -> &[bool] {
        &self.final_flags
    }

    /// Returns true if the given state is final.
    pub fn is_final(&self, state: usize) -> Result<bool> {
        self.check_state(state)?;
        Ok(self.final_flags[state])
    }

    /// Returns the indices of all final states in ascending order.
    pub fn final_states(&self) -> impl Iterator<Item = usize> + '_ {
        self.final_flags
            .iter()
            .enumerate()
            .filter_map(|(state, is_final)| is_final.then_some(state))
    }

    /// Apply the transition function to the given state and symbol.
    pub fn apply(&self, state: usize, symbol: usize) -> Result<usize> {
        self.check_state(state)?;
        self.check_symbol(symbol)?;
        Ok(self.transitions[state][symbol])
    }

    /// Run the automaton on a word starting in the given state and return the reached state.
    pub fn run(&self, state: usize, word: &[usize]) -> Result<usize> {
        word.iter()
            .try_fold(state, |current, symbol| self.apply(current, *symbol))
    }

    /// Returns true if the automaton accepts the given word.
    /// The word is given as a sequence of symbol indices.
    pub fn accepts(&self, word: &[usize]) -> Result<bool> {
        let state = self.run(0, word)?;
        Ok(self.final_flags[state])
    }

    /// The targets of the given state without its self-loops, one entry per symbol.
    pub(crate) fn successors_without_loops(&self, state: usize) -> Vec<usize> {
        self.transitions[state]
            .iter()
            .copied()
            .filter(|target| *target != state)
            .collect()
    }

    /// Returns true if the state loops to itself on every symbol.
    pub(crate) fn is_absorbing(&self, state: usize) -> bool {
        self.transitions[state].iter().all(|target| *target == state)
    }

    /// Exchange the numbers of two states in place.
    /// The rows of the transition table and the finality flags are swapped and every transition
    /// that targets one of the states is redirected to the other one.
    ///
    /// Only used on owned working copies, e.g. during the permutation search.
    pub(crate) fn swap_states(&mut self, state_a: usize, state_b: usize) {
        if state_a == state_b {
            return;
        }
        self.transitions.swap(state_a, state_b);
        self.final_flags.swap(state_a, state_b);
        for row in self.transitions.iter_mut() {
            for target in row.iter_mut() {
                if *target == state_a {
                    *target = state_b;
                } else if *target == state_b {
                    *target = state_a;
                }
            }
        }
    }

    pub(crate) fn check_state(&self, state: usize) -> Result<()> {
        if state >= self.state_count {
            return Err(ConvexError::new(ConvexErrorKind::StateOutOfRange {
                state,
                state_count: self.state_count,
            }));
        }
        Ok(())
    }

    pub(crate) fn check_symbol(&self, symbol: usize) -> Result<()> {
        if symbol >= self.alphabet_size {
            return Err(ConvexError::new(ConvexErrorKind::SymbolOutOfRange {
                symbol,
                alphabet_size: self.alphabet_size,
            }));
        }
        Ok(())
    }
}

// Deserialized data passes through the same validation as `Dfa::new`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct DfaParts {
    state_count: usize,
    alphabet_size: usize,
    transitions: Vec<Vec<usize>>,
    final_flags: Vec<bool>,
}

#[cfg(feature = "serde")]
impl TryFrom<DfaParts> for Dfa {
    type Error = ConvexError;

    fn try_from(parts: DfaParts) -> Result<Self> {
        Dfa::new(
            parts.state_count,
            parts.alphabet_size,
            parts.transitions,
            parts.final_flags,
        )
    }
}

/// Check the sizes shared by DFAs and NFAs.
pub(crate) fn check_sizes(state_count: usize, alphabet_size: usize) -> Result<()> {
    if state_count < 1 {
        return Err(malformed!("an automaton needs at least one state"));
    }
    if alphabet_size < 1 || alphabet_size > MAX_ALPHABET_SIZE {
        return Err(malformed!(
            "alphabet size {} is not in 1..={}",
            alphabet_size,
            MAX_ALPHABET_SIZE
        ));
    }
    Ok(())
}

impl std::fmt::Display for Dfa {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "DFA with {} states over {} symbols",
            self.state_count, self.alphabet_size
        )?;
        for (state, row) in self.transitions.iter().enumerate() {
            write!(f, "{}{} -> ", if self.final_flags[state] { "*" } else { " " }, state)?;
            for (symbol, target) in row.iter().enumerate() {
                write!(f, "{}:{}, ", symbol_char(symbol), target)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The letter used to print a symbol.
pub(crate) fn symbol_char(symbol: usize) -> char {
    (b'a' + symbol as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    // (0,a)=1, (0,b)=0, (1,a)=0, (1,b)=1, final [false, true]
    fn odd_a() -> Dfa {
        Dfa::new(2, 2, vec![vec![1, 0], vec![0, 1]], vec![false, true]).unwrap()
    }

    #[test]
    fn test_new_validates_sizes() {
        assert!(Dfa::new(0, 1, vec![], vec![]).is_err());
        assert!(Dfa::new(1, 0, vec![vec![]], vec![false]).is_err());
        assert!(Dfa::new(1, 27, vec![vec![0; 27]], vec![false]).is_err());
        assert!(Dfa::new(1, 26, vec![vec![0; 26]], vec![false]).is_ok());
    }

    #[test]
    fn test_new_validates_table() {
        let err = Dfa::new(2, 2, vec![vec![1, 0]], vec![false, true]).unwrap_err();
        assert!(matches!(
            err.kind(),
            ConvexErrorKind::MalformedAutomaton(_)
        ));
        assert!(Dfa::new(2, 2, vec![vec![1, 0], vec![0]], vec![false, true]).is_err());
        assert!(Dfa::new(2, 2, vec![vec![1, 2], vec![0, 1]], vec![false, true]).is_err());
        assert!(Dfa::new(2, 2, vec![vec![1, 0], vec![0, 1]], vec![false]).is_err());
    }

    #[test]
    fn test_apply() {
        let dfa = odd_a();
        assert_eq!(dfa.apply(0, 0).unwrap(), 1);
        assert_eq!(dfa.apply(1, 1).unwrap(), 1);
        assert_eq!(
            *dfa.apply(2, 0).unwrap_err().kind(),
            ConvexErrorKind::StateOutOfRange {
                state: 2,
                state_count: 2
            }
        );
        assert_eq!(
            *dfa.apply(0, 2).unwrap_err().kind(),
            ConvexErrorKind::SymbolOutOfRange {
                symbol: 2,
                alphabet_size: 2
            }
        );
    }

    #[test]
    fn test_accepts() {
        let dfa = odd_a();
        assert!(!dfa.accepts(&[]).unwrap());
        assert!(dfa.accepts(&[0]).unwrap());
        assert!(dfa.accepts(&[1, 0, 1]).unwrap());
        assert!(!dfa.accepts(&[0, 1, 0]).unwrap());
        assert!(dfa.accepts(&[0, 0, 0]).unwrap());
        assert!(dfa.accepts(&[0, 3]).is_err());
    }

    #[test]
    fn test_swap_states() {
        let dfa = Dfa::new(
            3,
            2,
            vec![vec![1, 2], vec![2, 2], vec![2, 2]],
            vec![false, true, false],
        )
        .unwrap();
        let mut swapped = dfa.clone();
        swapped.swap_states(1, 2);
        assert_eq!(
            swapped.transitions(),
            &[vec![2, 1], vec![1, 1], vec![1, 2]]
        );
        assert_eq!(swapped.final_flags(), &[false, false, true]);
        // `dfa` itself is not touched.
        assert_eq!(dfa.transitions()[0], vec![1, 2]);
        swapped.swap_states(1, 2);
        assert_eq!(swapped, dfa);
    }

    #[test]
    fn test_successors_without_loops() {
        let dfa = odd_a();
        assert_eq!(dfa.successors_without_loops(0), vec![1]);
        assert_eq!(dfa.successors_without_loops(1), vec![0]);
        assert!(!dfa.is_absorbing(0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serialization() {
        let dfa = odd_a();
        let serialized = serde_json::to_string(&dfa).unwrap();
        let deserialized: Dfa = serde_json::from_str(&serialized).unwrap();
        assert_eq!(dfa, deserialized);

        let broken = serialized.replace("[0,1]]", "[0,7]]");
        assert!(serde_json::from_str::<Dfa>(&broken).is_err());
    }

    #[test]
    fn test_display() {
        let text = odd_a().to_string();
        assert!(text.starts_with("DFA with 2 states over 2 symbols"));
        assert!(text.contains("*1 -> a:0, b:1, "));
    }
}

//! This module contains the membership tests for the subclasses of convex languages.
//!
//! The tests work on the structure of the given DFA. The ideal tests expect the final states to
//! be merged as in a minimal DFA, the free tests expect a single non-final sink state.
//! The subword-free test is incomplete: some DFAs of subword-free languages are not recognized.

use log::{debug, error, trace};

use crate::{AutomatonOperator, Dfa, Nfa, Result, StatePairGraph, Subclass};

/// Tests whether the language of a DFA belongs to a subclass of convex languages.
///
/// ```
/// use convex_automata::{Dfa, Subclass, SubclassTester};
/// // The language {a} over {a, b}.
/// let dfa = Dfa::from_code("122222ftf", 3, 2).unwrap();
/// assert!(SubclassTester::test(Subclass::PrefixFree, &dfa).unwrap());
/// assert!(!SubclassTester::test_subclass("RID", &dfa).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SubclassTester;

impl SubclassTester {
    /// Test the language of the DFA for membership in the given subclass.
    pub fn test(subclass: Subclass, dfa: &Dfa) -> Result<bool> {
        let result = match subclass {
            Subclass::PrefixFree => Self::is_prefix_free(dfa),
            Subclass::SuffixFree => Self::is_suffix_free(dfa),
            Subclass::FactorFree => Self::is_factor_free(dfa),
            Subclass::SubwordFree => Self::is_subword_free(dfa),
            Subclass::PrefixClosed => Self::is_prefix_closed(dfa),
            Subclass::SuffixClosed => Self::is_suffix_closed(dfa),
            Subclass::FactorClosed => Self::is_factor_closed(dfa),
            Subclass::SubwordClosed => Self::is_subword_closed(dfa),
            Subclass::RightIdeal => Self::is_right_ideal(dfa),
            Subclass::LeftIdeal => Self::is_left_ideal(dfa),
            Subclass::TwoSidedIdeal => Self::is_two_sided_ideal(dfa),
            Subclass::AllSidedIdeal => Self::is_all_sided_ideal(dfa),
        }?;
        debug!("{}: {}", subclass, result);
        Ok(result)
    }

    /// Test the language of the DFA for membership in the subclass with the given tag.
    /// An unknown tag is logged and answered with false.
    pub fn test_subclass(tag: &str, dfa: &Dfa) -> Result<bool> {
        match tag.parse::<Subclass>() {
            Ok(subclass) => Self::test(subclass, dfa),
            Err(err) => {
                error!("{}", err);
                Ok(false)
            }
        }
    }

    /// Prefix-free languages are recognized by the non-exiting property: the single final
    /// state leaves on every symbol to a common non-final sink.
    pub fn is_prefix_free(dfa: &Dfa) -> Result<bool> {
        Ok(Self::non_exiting_final_and_sink(dfa).is_some())
    }

    /// A language is suffix-free if no transition returns to the initial state and its
    /// reversal is prefix-free.
    pub fn is_suffix_free(dfa: &Dfa) -> Result<bool> {
        if !Self::is_non_returning(dfa) {
            debug!("SF: a transition returns to the initial state");
            return Ok(false);
        }
        Self::is_prefix_free(&Self::reversed_minimal(dfa)?)
    }

    /// A language is factor-free if it is suffix- and prefix-free in a strong sense: there is a
    /// numbering of the states that places the final state and the sink last and in which no
    /// second run can reach the final state while the first one is still on its way.
    pub fn is_factor_free(dfa: &Dfa) -> Result<bool> {
        if !Self::is_non_returning(dfa) || Self::non_exiting_final_and_sink(dfa).is_none() {
            debug!("FF: the DFA is not non-returning and non-exiting");
            return Ok(false);
        }
        let state_count = dfa.state_count();
        for permutation in AutomatonOperator::state_permutations(dfa) {
            let Some((final_state, sink)) = Self::non_exiting_final_and_sink(&permutation) else {
                continue;
            };
            if final_state != state_count - 2 || sink != state_count - 1 {
                continue;
            }
            trace!("FF: checking numbering\n{}", permutation);
            let graph = StatePairGraph::new(&permutation);
            if Self::factor_reaches_final(&graph, final_state)? {
                continue;
            }
            return Ok(true);
        }
        Ok(false)
    }

    /// Incomplete test for subword-free languages.
    /// Looks for a numbering of the states in which every transition that doesn't enter the
    /// sink strictly increases the state number and transitions on the same symbol preserve the
    /// order of the states.
    pub fn is_subword_free(dfa: &Dfa) -> Result<bool> {
        for permutation in AutomatonOperator::state_permutations(dfa) {
            if let Some(sink) = Self::subword_free_sink(&permutation) {
                if Self::is_monotone(&permutation, sink) {
                    trace!("SwF: monotone numbering\n{}", permutation);
                    return Ok(true);
                }
            }
        }
        Ok(false)
    }

    /// A language is prefix-closed if its complement is a right ideal.
    pub fn is_prefix_closed(dfa: &Dfa) -> Result<bool> {
        Self::is_right_ideal(&AutomatonOperator::complement(dfa)?)
    }

    /// A language is suffix-closed if its complement is a left ideal.
    pub fn is_suffix_closed(dfa: &Dfa) -> Result<bool> {
        Self::is_left_ideal(&AutomatonOperator::complement(dfa)?)
    }

    /// A language is factor-closed if its complement is a two-sided ideal.
    pub fn is_factor_closed(dfa: &Dfa) -> Result<bool> {
        Self::is_two_sided_ideal(&AutomatonOperator::complement(dfa)?)
    }

    /// A language is subword-closed if its complement is an all-sided ideal.
    pub fn is_subword_closed(dfa: &Dfa) -> Result<bool> {
        Self::is_all_sided_ideal(&AutomatonOperator::complement(dfa)?)
    }

    /// A right ideal has a single final state that loops on every symbol.
    /// A DFA without final states accepts the empty language, which is a right ideal, too.
    pub fn is_right_ideal(dfa: &Dfa) -> Result<bool> {
        let mut final_states = dfa.final_states();
        let Some(final_state) = final_states.next() else {
            return Ok(true);
        };
        if final_states.next().is_some() {
            debug!("RID: more than one final state");
            return Ok(false);
        }
        Ok(dfa.is_absorbing(final_state))
    }

    /// A language is a left ideal if its reversal is a right ideal.
    pub fn is_left_ideal(dfa: &Dfa) -> Result<bool> {
        Self::is_right_ideal(&Self::reversed_minimal(dfa)?)
    }

    /// A two-sided ideal is a right and a left ideal.
    pub fn is_two_sided_ideal(dfa: &Dfa) -> Result<bool> {
        Ok(Self::is_right_ideal(dfa)? && Self::is_left_ideal(dfa)?)
    }

    /// A two-sided ideal is an all-sided ideal if adding a loop on every symbol to every state
    /// doesn't change its language.
    pub fn is_all_sided_ideal(dfa: &Dfa) -> Result<bool> {
        if !Self::is_two_sided_ideal(dfa)? {
            return Ok(false);
        }
        let mut nfa = Nfa::from(dfa);
        for state in 0..nfa.state_count() {
            for symbol in 0..nfa.alphabet_size() {
                nfa.add_transition(state, symbol, state)?;
            }
        }
        let closure = AutomatonOperator::minimize(&AutomatonOperator::determinize(&nfa)?)?;
        AutomatonOperator::is_equivalent(dfa, &closure)
    }

    /// The minimal DFA of the reversed language.
    fn reversed_minimal(dfa: &Dfa) -> Result<Dfa> {
        AutomatonOperator::minimize(&AutomatonOperator::determinize(
            &AutomatonOperator::reverse(dfa)?,
        )?)
    }

    /// No transition leads to the initial state.
    fn is_non_returning(dfa: &Dfa) -> bool {
        dfa.transitions().iter().flatten().all(|target| *target != 0)
    }

    /// Returns the final state and the sink of a non-exiting DFA.
    /// The DFA must have exactly one final state whose transitions, apart from self-loops, all
    /// lead to the same state, and that state must loop on every symbol.
    fn non_exiting_final_and_sink(dfa: &Dfa) -> Option<(usize, usize)> {
        let mut final_states = dfa.final_states();
        let final_state = final_states.next()?;
        if final_states.next().is_some() {
            return None;
        }
        let successors = dfa.successors_without_loops(final_state);
        if successors.len() < dfa.alphabet_size() {
            return None;
        }
        let sink = *successors.first()?;
        if successors.iter().any(|s| *s != sink) || !dfa.is_absorbing(sink) {
            return None;
        }
        Some((final_state, sink))
    }

    /// Returns true if the final state can be reached by the second run of the pair graph
    /// while the first run starts later or is still before the final state.
    fn factor_reaches_final(graph: &StatePairGraph, final_state: usize) -> Result<bool> {
        for v in 1..=final_state {
            for j in 0..=final_state {
                if graph.reachable(0, v, final_state, j)? {
                    trace!("FF: ({}, {}) reaches ({}, {})", 0, v, final_state, j);
                    return Ok(true);
                }
            }
        }
        for j in 1..final_state {
            if graph.reachable(0, 0, final_state, j)? {
                trace!("FF: (0, 0) reaches ({}, {})", final_state, j);
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Check the state structure required by the subword-free test and return the sink.
    /// There may be at most one final state. The sink is a non-final state without transitions
    /// to other states, every other state must leave itself on every symbol.
    fn subword_free_sink(dfa: &Dfa) -> Option<usize> {
        let mut seen_final = false;
        let mut sink = None;
        for state in 0..dfa.state_count() {
            let successors = dfa.successors_without_loops(state);
            let is_final = dfa.final_flags()[state];
            if is_final {
                if seen_final {
                    return None;
                }
                seen_final = true;
            }
            if successors.is_empty() && !is_final {
                sink = Some(state);
            }
            if successors.len() < dfa.alphabet_size() && sink != Some(state) {
                return None;
            }
        }
        sink
    }

    /// Every transition that doesn't enter the sink increases the state number, and for
    /// states `i < j` the targets on the same symbol keep that order.
    fn is_monotone(dfa: &Dfa, sink: usize) -> bool {
        let transitions = dfa.transitions();
        let state_count = dfa.state_count();
        let states = move || (0..state_count).filter(move |state| *state != sink);
        for i in states() {
            for j in states() {
                for (target_i, target_j) in transitions[i].iter().zip(transitions[j].iter()) {
                    if *target_i == sink || *target_j == sink {
                        continue;
                    }
                    if *target_i <= i || (i < j && target_i >= target_j) {
                        return false;
                    }
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    // Σ* over {a, b}
    const SIGMA_STAR: &str = "00t";
    // {a}
    const SINGLE_A: &str = "122222ftf";
    // aΣ*
    const A_SIGMA_STAR: &str = "121122ftf";
    // {b, ab}
    const B_OR_AB: &str = "12323333fftf";
    // Words with an odd number of a's
    const ODD_A: &str = "1001ft";

    fn dfa(code: &str, state_count: usize) -> Dfa {
        Dfa::from_code(code, state_count, 2).unwrap()
    }

    #[rstest]
    #[case::sigma_star(SIGMA_STAR, 1, false)]
    #[case::single_a(SINGLE_A, 3, true)]
    #[case::a_sigma_star(A_SIGMA_STAR, 3, false)]
    #[case::b_or_ab(B_OR_AB, 4, true)]
    #[case::odd_a(ODD_A, 2, false)]
    fn test_prefix_free(#[case] code: &str, #[case] states: usize, #[case] expected: bool) {
        init();
        assert_eq!(
            SubclassTester::is_prefix_free(&dfa(code, states)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case::sigma_star(SIGMA_STAR, 1, false)]
    #[case::single_a(SINGLE_A, 3, true)]
    #[case::b_or_ab(B_OR_AB, 4, false)]
    fn test_suffix_free(#[case] code: &str, #[case] states: usize, #[case] expected: bool) {
        init();
        assert_eq!(
            SubclassTester::is_suffix_free(&dfa(code, states)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case::sigma_star(SIGMA_STAR, 1, false)]
    #[case::single_a(SINGLE_A, 3, true)]
    #[case::b_or_ab(B_OR_AB, 4, false)]
    fn test_factor_free(#[case] code: &str, #[case] states: usize, #[case] expected: bool) {
        init();
        assert_eq!(
            SubclassTester::is_factor_free(&dfa(code, states)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case::sigma_star(SIGMA_STAR, 1, false)]
    #[case::single_a(SINGLE_A, 3, true)]
    #[case::b_or_ab(B_OR_AB, 4, false)]
    fn test_subword_free(#[case] code: &str, #[case] states: usize, #[case] expected: bool) {
        init();
        assert_eq!(
            SubclassTester::is_subword_free(&dfa(code, states)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case::sigma_star(SIGMA_STAR, 1, true)]
    #[case::a_sigma_star(A_SIGMA_STAR, 3, true)]
    #[case::single_a(SINGLE_A, 3, false)]
    #[case::odd_a(ODD_A, 2, false)]
    #[case::no_final_state("00f", 1, true)]
    fn test_right_ideal(#[case] code: &str, #[case] states: usize, #[case] expected: bool) {
        init();
        assert_eq!(
            SubclassTester::is_right_ideal(&dfa(code, states)).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case::sigma_star(SIGMA_STAR, 1, true)]
    #[case::a_sigma_star(A_SIGMA_STAR, 3, false)]
    #[case::odd_a(ODD_A, 2, false)]
    // Σ*a
    #[case::sigma_star_a("1010ft", 2, true)]
    fn test_left_ideal(#[case] code: &str, #[case] states: usize, #[case] expected: bool) {
        init();
        assert_eq!(
            SubclassTester::is_left_ideal(&dfa(code, states)).unwrap(),
            expected
        );
    }

    #[test]
    fn test_two_sided_and_all_sided_ideal() {
        init();
        // Σ*aΣ*
        let contains_a = dfa("1011ft", 2);
        assert!(SubclassTester::is_two_sided_ideal(&contains_a).unwrap());
        assert!(SubclassTester::is_all_sided_ideal(&contains_a).unwrap());
        // Σ*abΣ*, the same as all words with the subword ab
        let contains_ab = dfa("102212fft", 3);
        assert!(SubclassTester::is_two_sided_ideal(&contains_ab).unwrap());
        assert!(SubclassTester::is_all_sided_ideal(&contains_ab).unwrap());
        // Σ*aaΣ* doesn't contain aba
        let contains_aa = dfa("102022fft", 3);
        assert!(SubclassTester::is_two_sided_ideal(&contains_aa).unwrap());
        assert!(!SubclassTester::is_all_sided_ideal(&contains_aa).unwrap());
        assert!(!SubclassTester::is_all_sided_ideal(&dfa(A_SIGMA_STAR, 3)).unwrap());
    }

    #[test]
    fn test_closed_classes() {
        init();
        // Words without an a: b*
        let no_a = dfa("1011tf", 2);
        assert!(SubclassTester::is_prefix_closed(&no_a).unwrap());
        assert!(SubclassTester::is_suffix_closed(&no_a).unwrap());
        assert!(SubclassTester::is_factor_closed(&no_a).unwrap());
        assert!(SubclassTester::is_subword_closed(&no_a).unwrap());
        assert!(!SubclassTester::is_prefix_closed(&dfa(SINGLE_A, 3)).unwrap());
    }

    #[test]
    fn test_subclass_dispatch() {
        init();
        let single_a = dfa(SINGLE_A, 3);
        assert!(SubclassTester::test_subclass("PF", &single_a).unwrap());
        assert!(!SubclassTester::test_subclass("RID", &single_a).unwrap());
        assert!(!SubclassTester::test_subclass("XYZ", &single_a).unwrap());
        assert!(!SubclassTester::test_subclass("", &single_a).unwrap());
    }
}

/// This file contains tests of language properties of the operators.
use convex_automata::{AutomatonOperator, Dfa, Subclass, SubclassTester};
use rstest::rstest;

// Automata over {a, b} given by code and state count.
const AUTOMATA: &[(&str, usize)] = &[
    // Σ*
    ("00t", 1),
    // ∅
    ("00f", 1),
    // {a}
    ("122222ftf", 3),
    // aΣ*
    ("121122ftf", 3),
    // {b, ab}
    ("12323333fftf", 4),
    // odd number of a's
    ("1001ft", 2),
    // ends with b
    ("0101ft", 2),
    // Σ*aaΣ*
    ("102022fft", 3),
    // non-minimal: an odd number of a's with a duplicated initial state and an unreachable
    // final state
    ("12211233ftft", 4),
];

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn automata() -> impl Iterator<Item = Dfa> {
    AUTOMATA
        .iter()
        .map(|(code, state_count)| Dfa::from_code(code, *state_count, 2).unwrap())
}

fn reversed_minimal(dfa: &Dfa) -> Dfa {
    let reversed = AutomatonOperator::reverse(dfa).unwrap();
    AutomatonOperator::minimize(&AutomatonOperator::determinize(&reversed).unwrap()).unwrap()
}

fn factorial(n: usize) -> usize {
    (1..=n).product()
}

#[test]
fn test_double_reversal() {
    init();
    for dfa in automata() {
        let minimal = AutomatonOperator::minimize(&dfa).unwrap();
        let twice = reversed_minimal(&reversed_minimal(&dfa));
        assert_eq!(twice.state_count(), minimal.state_count(), "{}", dfa);
        assert!(AutomatonOperator::is_equivalent(&twice, &dfa).unwrap(), "{}", dfa);
    }
}

#[test]
fn test_minimization_is_idempotent() {
    init();
    for dfa in automata() {
        let once = AutomatonOperator::minimize(&dfa).unwrap();
        let twice = AutomatonOperator::minimize(&once).unwrap();
        assert_eq!(once.state_count(), twice.state_count(), "{}", dfa);
        assert!(AutomatonOperator::is_equivalent(&once, &twice).unwrap());
        assert!(AutomatonOperator::is_equivalent(&once, &dfa).unwrap());
    }
}

#[test]
fn test_complement_is_involution() {
    for dfa in automata() {
        let complement = AutomatonOperator::complement(&dfa).unwrap();
        let twice = AutomatonOperator::complement(&complement).unwrap();
        assert_eq!(twice, dfa);
        assert!(!AutomatonOperator::is_equivalent(&complement, &dfa).unwrap());
    }
}

#[test]
fn test_intersection_with_complement_is_empty() {
    init();
    for dfa in automata() {
        let complement = AutomatonOperator::complement(&dfa).unwrap();
        let product = AutomatonOperator::intersection(&dfa, &complement).unwrap();
        assert!(AutomatonOperator::is_empty_language(&product).unwrap(), "{}", dfa);
    }
}

#[test]
fn test_ideal_duality() {
    init();
    let pairs = [
        (Subclass::PrefixClosed, Subclass::RightIdeal),
        (Subclass::SuffixClosed, Subclass::LeftIdeal),
        (Subclass::FactorClosed, Subclass::TwoSidedIdeal),
        (Subclass::SubwordClosed, Subclass::AllSidedIdeal),
    ];
    for dfa in automata() {
        let complement = AutomatonOperator::complement(&dfa).unwrap();
        for (closed, ideal) in pairs {
            assert_eq!(
                SubclassTester::test(closed, &dfa).unwrap(),
                SubclassTester::test(ideal, &complement).unwrap()
            );
        }
    }
}

#[test]
fn test_sigma_star() {
    init();
    let sigma_star = Dfa::from_code("00t", 1, 2).unwrap();
    for subclass in Subclass::ALL {
        let expected = !matches!(
            subclass,
            Subclass::PrefixFree
                | Subclass::SuffixFree
                | Subclass::FactorFree
                | Subclass::SubwordFree
        );
        assert_eq!(
            SubclassTester::test(subclass, &sigma_star).unwrap(),
            expected,
            "{}",
            subclass
        );
    }
}

#[test]
fn test_odd_number_of_a() {
    init();
    let dfa = Dfa::new(2, 2, vec![vec![1, 0], vec![0, 1]], vec![false, true]).unwrap();
    assert!(!AutomatonOperator::is_empty_language(&dfa).unwrap());
    assert!(!SubclassTester::is_left_ideal(&dfa).unwrap());
    assert!(!SubclassTester::is_right_ideal(&dfa).unwrap());
    assert_eq!(AutomatonOperator::minimize(&dfa).unwrap().state_count(), 2);
}

#[test]
fn test_final_state_and_sink() {
    init();
    // {a}: the final state leaves to a separate sink.
    let single_a = Dfa::from_code("122222ftf", 3, 2).unwrap();
    assert!(SubclassTester::is_prefix_free(&single_a).unwrap());
    // aΣ*: the final state is absorbing, state 2 is a separate sink.
    let a_sigma_star = Dfa::from_code("121122ftf", 3, 2).unwrap();
    assert!(SubclassTester::is_right_ideal(&a_sigma_star).unwrap());
}

#[rstest]
#[case(1)]
#[case(2)]
#[case(3)]
#[case(4)]
#[case(5)]
fn test_state_permutations(#[case] state_count: usize) {
    init();
    // A cycle through all states where every second state is final.
    let transitions = (0..state_count)
        .map(|state| vec![(state + 1) % state_count, state])
        .collect();
    let final_flags = (0..state_count).map(|state| state % 2 == 1).collect();
    let dfa = Dfa::new(state_count, 2, transitions, final_flags).unwrap();

    let permutations = AutomatonOperator::automaton_state_permutations(&dfa);
    assert_eq!(permutations.len(), factorial(state_count - 1));
    for permutation in &permutations {
        let complement = AutomatonOperator::complement(permutation).unwrap();
        let product = AutomatonOperator::intersection(&dfa, &complement).unwrap();
        assert!(AutomatonOperator::is_empty_language(&product).unwrap());
    }
}

#[test]
fn test_state_permutations_stop_early() {
    let dfa = Dfa::from_code("16263646566666ffffftf", 7, 2).unwrap();
    let mut permutations = AutomatonOperator::state_permutations(&dfa);
    assert_eq!(permutations.next(), Some(dfa.clone()));
    assert_eq!(permutations.by_ref().take(9).count(), 9);
    assert_eq!(permutations.count(), factorial(6) - 10);
}

#[test]
fn test_homomorphic_image_of_ideal() {
    init();
    // Σ*aΣ* becomes Σ*bΣ*, which is still a two-sided ideal.
    let contains_a = Dfa::from_code("1011ft", 2, 2).unwrap();
    let contains_b = AutomatonOperator::homomorphic_image(&contains_a, &[1, 0]).unwrap();
    assert!(contains_b.accepts(&[0, 0, 1]).unwrap());
    assert!(!contains_b.accepts(&[0, 0]).unwrap());
    assert!(SubclassTester::is_two_sided_ideal(&contains_b).unwrap());
}

#[test]
fn test_cut() {
    init();
    // {a} ! b* accepts ab*.
    let single_a = Dfa::from_code("122222ftf", 3, 2).unwrap();
    let b_star = Dfa::from_code("1011tf", 2, 2).unwrap();
    let cut = AutomatonOperator::cut(&single_a, &b_star).unwrap();
    let a_b_star = Dfa::from_code("122122ftf", 3, 2).unwrap();
    assert!(AutomatonOperator::is_equivalent(&cut, &a_b_star).unwrap());

    // The final states of Σ*aΣ* are never left, so B restarts on every symbol and never
    // reaches its final state.
    let contains_a = Dfa::from_code("1011ft", 2, 2).unwrap();
    let cut = AutomatonOperator::cut(&contains_a, &contains_a).unwrap();
    assert!(AutomatonOperator::is_empty_language(&cut).unwrap());
}

#![forbid(missing_docs)]
//! # `convex_automata`
//! The `convex_automata` crate is a library for the analysis of regular languages given by finite
//! automata. It provides deterministic and nondeterministic finite automata, a library of
//! operators on them and membership tests for the subclasses of convex languages.
//!
//! The operators comprise complement, reversal, intersection, determinization by the subset
//! construction, minimization by partition refinement, homomorphic images, the cut operation and
//! the enumeration of all renumberings of the states of a DFA.
//!
//! The membership tests decide whether the language of a DFA is
//! - prefix-, suffix-, factor- or subword-free (`PF`, `SF`, `FF`, `SwF`),
//! - prefix-, suffix-, factor- or subword-closed (`PC`, `SC`, `FC`, `SwC`),
//! - a right, left, two-sided or all-sided ideal (`RID`, `LID`, `TSID`, `ASID`).
//!
//! The subword-free test is incomplete. It never accepts a language that is not subword-free,
//! but there are subword-free languages it doesn't recognize.
//!
//! # Example
//! ```rust
//! use convex_automata::{AutomatonOperator, Dfa, Subclass, SubclassTester};
//!
//! // The language aΣ* over the alphabet {a, b}: state 1 is the final state, state 2 the sink.
//! let dfa = Dfa::from_code("121122ftf", 3, 2).unwrap();
//!
//! assert!(SubclassTester::test(Subclass::RightIdeal, &dfa).unwrap());
//! assert!(!SubclassTester::test(Subclass::LeftIdeal, &dfa).unwrap());
//!
//! // The complement of a right ideal is prefix-closed.
//! let complement = AutomatonOperator::complement(&dfa).unwrap();
//! assert!(SubclassTester::test_subclass("PC", &complement).unwrap());
//!
//! let minimal = AutomatonOperator::minimize(&dfa).unwrap();
//! assert_eq!(minimal.state_count(), 3);
//! ```
//!
//! # Automaton codes
//! Automata can be given as a single line code, see [`Dfa::from_code`]. The code lists the
//! targets of the transition table row by row as base-36 digits and ends with one `t` or `f`
//! per state for its finality.
//!
//! # Crate features
//! The crate has the following features:
//! - `serde`: Enabled by default. Derives `Serialize` and `Deserialize` for [`Dfa`], [`Nfa`] and
//!   [`Subclass`]. Deserialized automata are validated like automata created with [`Dfa::new`] or
//!   [`Nfa::from_parts`].
//!
//! # Logging
//! The crate logs through the `log` facade. Set `RUST_LOG=convex_automata=trace` with a logger
//! like `env_logger` to follow the partition refinement and the subset construction.

/// Module with the serial code of a DFA
mod code;

/// Module that provides the DFA type
mod dfa;
pub use dfa::{Dfa, MAX_ALPHABET_SIZE};

/// Module with error definitions
mod errors;
pub use errors::{ConvexError, ConvexErrorKind, Result};

/// The module with internal implementation details.
mod internal;

/// Module that provides the NFA type
mod nfa;
pub use nfa::{Nfa, StateSet};

/// The module with the operator library.
mod operator;
pub use operator::AutomatonOperator;

/// Module that provides the state pair graph
mod state_pair_graph;
pub use state_pair_graph::StatePairGraph;

/// Module that provides the lazy enumeration of state renumberings
mod state_permutations;
pub use state_permutations::StatePermutations;

/// Module that provides the Subclass type
mod subclass;
pub use subclass::Subclass;

/// The module with the subclass tests.
mod subclass_tester;
pub use subclass_tester::SubclassTester;

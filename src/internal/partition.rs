//! Bookkeeping for the partition refinement of the minimizer.

use std::collections::BTreeSet;

use log::trace;

use super::ClassID;

/// A group of DFA states that are not yet known to be distinguishable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct EquivalenceClass {
    /// The member states in ascending order. The first member is the representative.
    states: BTreeSet<usize>,
    /// The classes the representative's transitions lead to, one entry per symbol. This becomes
    /// the row of the transition table of the minimized DFA.
    signature: Vec<ClassID>,
    is_final: bool,
}

impl EquivalenceClass {
    pub(crate) fn new(signature: Vec<ClassID>, is_final: bool) -> Self {
        EquivalenceClass {
            states: BTreeSet::new(),
            signature,
            is_final,
        }
    }

    pub(crate) fn insert(&mut self, state: usize) {
        self.states.insert(state);
    }

    pub(crate) fn contains(&self, state: usize) -> bool {
        self.states.contains(&state)
    }

    pub(crate) fn states(&self) -> &BTreeSet<usize> {
        &self.states
    }

    pub(crate) fn representative(&self) -> Option<usize> {
        self.states.first().copied()
    }

    pub(crate) fn signature(&self) -> &[ClassID] {
        &self.signature
    }

    pub(crate) fn is_final(&self) -> bool {
        self.is_final
    }

    pub(crate) fn len(&self) -> usize {
        self.states.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// An ordered sequence of equivalence classes. Every state of the DFA under refinement belongs
/// to exactly one class.
#[derive(Debug, Clone, Default)]
pub(crate) struct Partition {
    classes: Vec<EquivalenceClass>,
}

impl Partition {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append a class. Empty classes are dropped.
    pub(crate) fn push(&mut self, class: EquivalenceClass) {
        if !class.is_empty() {
            self.classes.push(class);
        }
    }

    pub(crate) fn classes(&self) -> &[EquivalenceClass] {
        &self.classes
    }

    pub(crate) fn len(&self) -> usize {
        self.classes.len()
    }

    /// The class that contains the given state.
    pub(crate) fn class_of_state(&self, state: usize) -> Option<ClassID> {
        self.classes
            .iter()
            .position(|class| class.contains(state))
            .map(ClassID::new)
    }

    /// Find a class with the given signature and finality whose representative stems from the
    /// given origin class. States of different origin classes are never merged even if their
    /// signatures agree.
    pub(crate) fn find_compatible_class(
        &self,
        signature: &[ClassID],
        is_final: bool,
        origin: &EquivalenceClass,
    ) -> Option<usize> {
        self.classes.iter().position(|class| {
            class.is_final() == is_final
                && class.signature() == signature
                && class
                    .representative()
                    .is_some_and(|representative| origin.contains(representative))
        })
    }

    /// Add a state to the class at the given index.
    pub(crate) fn insert_into(&mut self, index: usize, state: usize) {
        self.classes[index].insert(state);
    }

    /// Add a new class that holds the given state.
    pub(crate) fn push_with_state(
        &mut self,
        signature: Vec<ClassID>,
        is_final: bool,
        state: usize,
    ) {
        let mut class = EquivalenceClass::new(signature, is_final);
        class.insert(state);
        self.classes.push(class);
    }

    /// Returns true if both partitions consist of the same classes in the same order.
    /// Signatures are not compared.
    pub(crate) fn has_same_classes(&self, other: &Partition) -> bool {
        self.classes.len() == other.classes.len()
            && self
                .classes
                .iter()
                .zip(other.classes.iter())
                .all(|(a, b)| a.len() == b.len() && a.states() == b.states())
    }

    /// Trace out the partition.
    pub(crate) fn trace(&self, context: &str) {
        trace!("Partition {}:", context);
        for (i, class) in self.classes.iter().enumerate() {
            trace!(
                "Class {}{}: {:?} -> {:?}",
                i,
                if class.is_final() { "*" } else { "" },
                class.states(),
                class.signature()
            );
        }
    }
}

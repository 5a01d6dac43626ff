//! Minimization of DFAs by iterative partition refinement.

use log::trace;

use crate::{errors::malformed, Dfa, Result};

use super::{ClassID, EquivalenceClass, Partition};

/// The minimizer is a unit struct that groups the steps of the partition refinement.
/// The input DFA must not contain unreachable states.
pub(crate) struct Minimizer;

impl Minimizer {
    /// Minimize the DFA.
    /// The state 0 of the result is the class that contains the state 0 of the input.
    pub(crate) fn minimize(dfa: &Dfa) -> Result<Dfa> {
        trace!("Minimize DFA ----------------------------");
        trace!("Initial DFA:\n{}", dfa);
        let mut partition_old = Self::calculate_initial_partition(dfa);
        partition_old.trace("initial");

        loop {
            let partition_new = Self::calculate_new_partition(dfa, &partition_old)?;
            partition_new.trace("new");
            if partition_new.has_same_classes(&partition_old) {
                return Self::create_from_partition(dfa, &partition_new);
            }
            partition_old = partition_new;
        }
    }

    /// The initial partition consists of the class of non-final states followed by the class of
    /// final states. Empty classes are omitted.
    fn calculate_initial_partition(dfa: &Dfa) -> Partition {
        let mut non_final = EquivalenceClass::new(Vec::new(), false);
        let mut finals = EquivalenceClass::new(Vec::new(), true);
        for (state, is_final) in dfa.final_flags().iter().enumerate() {
            if *is_final {
                finals.insert(state);
            } else {
                non_final.insert(state);
            }
        }
        let mut partition = Partition::new();
        partition.push(non_final);
        partition.push(finals);
        partition
    }

    /// Calculate the new partition based on the old partition.
    /// The classes of the old partition are split in order. Within a class the states are
    /// visited in ascending order, so the new classes are ordered by their representatives.
    fn calculate_new_partition(dfa: &Dfa, partition: &Partition) -> Result<Partition> {
        let mut new_partition = Partition::new();
        for (index, class) in partition.classes().iter().enumerate() {
            Self::split_class(dfa, index, class, partition, &mut new_partition)?;
        }
        Ok(new_partition)
    }

    /// Distribute the states of one class of the old partition to the classes of the new
    /// partition.
    fn split_class(
        dfa: &Dfa,
        class_index: usize,
        class: &EquivalenceClass,
        partition: &Partition,
        new_partition: &mut Partition,
    ) -> Result<()> {
        trace!("Split class {}: {:?}", class_index, class.states());
        for state in class.states() {
            let signature = Self::signature(dfa, *state, partition)?;
            match new_partition.find_compatible_class(&signature, class.is_final(), class) {
                Some(index) => new_partition.insert_into(index, *state),
                None => new_partition.push_with_state(signature, class.is_final(), *state),
            }
        }
        Ok(())
    }

    /// The classes of the old partition that the transitions of the given state lead to.
    fn signature(dfa: &Dfa, state: usize, partition: &Partition) -> Result<Vec<ClassID>> {
        dfa.transitions()[state]
            .iter()
            .map(|target| {
                partition
                    .class_of_state(*target)
                    .ok_or_else(|| malformed!("state {} is not in the partition", target))
            })
            .collect()
    }

    /// Create a DFA from the partition. Each class becomes one state, its signature the row of
    /// the transition table.
    /// Afterwards the class of the initial state is swapped with state 0.
    fn create_from_partition(dfa: &Dfa, partition: &Partition) -> Result<Dfa> {
        trace!("Create DFA ------------------------------");
        let transitions = partition
            .classes()
            .iter()
            .map(|class| class.signature().iter().map(|c| c.as_usize()).collect())
            .collect();
        let final_flags = partition.classes().iter().map(|c| c.is_final()).collect();
        let mut minimized = Dfa::new(
            partition.len(),
            dfa.alphabet_size(),
            transitions,
            final_flags,
        )?;
        let initial_class = partition
            .class_of_state(0)
            .ok_or_else(|| malformed!("initial state is not in the partition"))?;
        minimized.swap_states(0, initial_class.as_usize());
        trace!("Minimized DFA:\n{}", minimized);
        Ok(minimized)
    }
}

/// Module for the ID types.
mod ids;
pub(crate) use ids::{ClassID, NodeID};

/// Module that provides the minimizer.
mod minimizer;
pub(crate) use minimizer::Minimizer;

/// Module that provides the partition and the equivalence classes used during minimization.
mod partition;
pub(crate) use partition::{EquivalenceClass, Partition};

/// Module that provides the subset construction.
mod subset_construction;

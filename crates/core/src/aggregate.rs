//! Aggregate root trait for domain models that own a cluster of values.

/// Aggregate root marker + minimal interface.
///
/// An aggregate root is the only entry point for mutating the values it owns.
/// Callers read owned values, but every change goes through the root so its
/// invariants hold after each operation.
pub trait AggregateRoot {
    /// Strongly-typed aggregate identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the aggregate identifier.
    fn id(&self) -> &Self::Id;

    /// Monotonically increasing version of the aggregate's state.
    ///
    /// Incremented once per successful mutation. Presentation layers compare
    /// versions to decide whether a rendered view is stale.
    fn version(&self) -> u64;
}

//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Journal entries are entities (a recorded transaction keeps its identity in
/// the ledger); journal lines are not, they only exist by position inside an
/// entry.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

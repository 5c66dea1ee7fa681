//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: a journal line
/// `("Caja", 100.00)` is equal to any other line with the same account and
/// amount, wherever it appears.
///
/// - **Value Object**: no identity (journal lines, account totals, reports)
/// - **Entity**: has identity (journal entries, keyed by `EntryId`)
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}

//! Domain foundation building blocks for the ledger.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod amount;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use amount::{BALANCE_TOLERANCE, RECONCILIATION_TOLERANCE};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EntryId, SessionId};
pub use value_object::ValueObject;

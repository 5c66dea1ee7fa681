//! Session orchestration for the bookkeeping engine.
//!
//! A [`Session`] is the explicit application state a presentation layer holds:
//! it owns the journal, validates and records transactions, and hands out
//! freshly derived reports.

pub mod config;
pub mod error;
pub mod session;

pub use config::{ConfigError, SessionConfig};
pub use error::{SessionError, SessionResult};
pub use session::{CashCountReport, Liquidity, Session, SessionReport};

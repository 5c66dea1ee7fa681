//! Cash count ("arqueo de caja"): breaks a cash total into bills and coins.
//!
//! Pure domain logic only; consumes a single amount and knows nothing about
//! the journal.

pub mod count;
pub mod denomination;
pub mod error;

pub use count::{
    CountStrategy, DenominationBreakdown, DenominationCount, Reconciliation, count_cash,
    count_cash_with,
};
pub use denomination::{BASELINE_TOTAL, DENOMINATIONS, Denomination, DenominationKind};
pub use error::{CashError, CashResult};

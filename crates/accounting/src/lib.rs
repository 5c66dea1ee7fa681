//! Bookkeeping engine: journal entries, the journal, and the reports derived
//! from it (general ledger, trial balance, income statement).
//!
//! Pure domain logic only: no IO, no persistence. Data flows one way:
//! `EntryBuilder` → `Ledger` → `GeneralLedger` → {`TrialBalance`, `IncomeStatement`}.

pub mod accounts;
pub mod entry;
pub mod error;
pub mod general_ledger;
pub mod income_statement;
pub mod ledger;
pub mod templates;
pub mod trial_balance;

pub use entry::{DisplayRow, EntryBuilder, JournalEntry, JournalLine, JournalRow, Side, build_entry};
pub use error::{LedgerError, LedgerResult};
pub use general_ledger::{AccountMovement, AccountTotals, GeneralLedger, aggregate, movements};
pub use income_statement::{HANDLING_SURCHARGE, IncomeStatement, derive_income_statement};
pub use ledger::{JournalTotals, Ledger};
pub use templates::{Transaction, TransferDirection, VAT_RATE};
pub use trial_balance::{AccountBalance, TrialBalance, derive_trial_balance};

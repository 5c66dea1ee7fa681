//! Errors raised while constructing journal entries.

use rust_decimal::Decimal;
use thiserror::Error;

pub type LedgerResult<T> = Result<T, LedgerError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Debit and credit totals differ by more than the balance tolerance.
    #[error("unbalanced entry: debits {total_debit} != credits {total_credit}")]
    Unbalanced {
        total_debit: Decimal,
        total_credit: Decimal,
    },

    #[error("negative amount {amount} on account {account:?}")]
    NegativeAmount { account: String, amount: Decimal },

    #[error("journal entry concept must not be empty")]
    EmptyConcept,

    #[error("journal line account must not be empty")]
    EmptyAccount,

    /// A line or side total exceeds the representable decimal range.
    #[error("amount overflow while totalling {context}")]
    AmountOverflow { context: &'static str },
}

impl LedgerError {
    /// Absolute debit/credit difference for an unbalanced entry.
    pub fn imbalance(&self) -> Option<Decimal> {
        match self {
            LedgerError::Unbalanced {
                total_debit,
                total_credit,
            } => Some((*total_debit - *total_credit).abs()),
            _ => None,
        }
    }
}

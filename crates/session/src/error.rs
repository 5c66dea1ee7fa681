use thiserror::Error;

use libro_accounting::LedgerError;
use libro_cash::CashError;

use crate::config::ConfigError;

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Cash(#[from] CashError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

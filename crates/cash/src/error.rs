use rust_decimal::Decimal;
use thiserror::Error;

pub type CashResult<T> = Result<T, CashError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CashError {
    #[error("cash amount must not be negative (got {0})")]
    NegativeAmount(Decimal),

    #[error("cash amount {0} is too large to count")]
    TooLarge(Decimal),
}

//! Replays the reference bookkeeping scenario and prints every report as JSON.
//!
//! Usage: `libro-session [CASH_AMOUNT]`. When a cash amount is given, its
//! denomination breakdown is printed as well.

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use libro_accounting::Transaction;
use libro_core::amount::parse_strict;
use libro_session::{Session, SessionConfig};

fn main() -> anyhow::Result<()> {
    let config = SessionConfig::from_env().context("invalid LIBRO_* configuration")?;
    libro_observability::init(config.log_format);
    tracing::info!(?config, "configuration loaded");

    let cash_amount = std::env::args()
        .nth(1)
        .map(|raw| parse_strict(&raw).with_context(|| format!("invalid cash amount {raw:?}")))
        .transpose()?;

    let date = NaiveDate::from_ymd_opt(2025, 4, 10).context("invalid scenario date")?;
    let mut session = Session::new(config);

    for transaction in reference_transactions() {
        session
            .record(date, transaction)
            .with_context(|| format!("recording {:?}", transaction))?;
    }

    println!("{}", serde_json::to_string_pretty(&session.report())?);

    if let Some(amount) = cash_amount {
        let count = session.count_cash(amount)?;
        println!("{}", serde_json::to_string_pretty(&count)?);
    }

    Ok(())
}

fn reference_transactions() -> [Transaction; 4] {
    [
        Transaction::Opening {
            cash: Decimal::new(851_299_000, 2),
            bank: Decimal::new(48_100_000, 2),
        },
        Transaction::Purchase {
            net: Decimal::new(200_000, 2),
        },
        Transaction::CashSale {
            amount: Decimal::new(116_000, 2),
        },
        Transaction::GeneralExpense {
            amount: Decimal::new(11_600, 2),
        },
    ]
}

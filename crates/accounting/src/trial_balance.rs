use rust_decimal::Decimal;
use serde::Serialize;

use libro_core::{BALANCE_TOLERANCE, ValueObject};

use crate::general_ledger::GeneralLedger;

/// Per-account row of the trial balance ("balanza de comprobación").
///
/// At most one of `debtor_balance` / `creditor_balance` is non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountBalance {
    pub account: String,
    pub total_debit: Decimal,
    pub total_credit: Decimal,
    pub debtor_balance: Decimal,
    pub creditor_balance: Decimal,
}

impl ValueObject for AccountBalance {}

/// Trial balance over every aggregated account.
///
/// Each entry may be off by up to [`BALANCE_TOLERANCE`], so the totals are
/// only guaranteed to agree within `tolerance`, one cent per entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrialBalance {
    pub rows: Vec<AccountBalance>,
    pub total_debtor: Decimal,
    pub total_creditor: Decimal,
    pub tolerance: Decimal,
}

impl TrialBalance {
    pub fn derive(general_ledger: &GeneralLedger) -> Self {
        let mut tb = TrialBalance {
            tolerance: BALANCE_TOLERANCE * Decimal::from(general_ledger.entry_count()),
            ..TrialBalance::default()
        };

        for (account, totals) in general_ledger.iter() {
            let net = totals.net_debit();
            let row = AccountBalance {
                account: account.to_string(),
                total_debit: totals.total_debit,
                total_credit: totals.total_credit,
                debtor_balance: net.max(Decimal::ZERO),
                creditor_balance: (-net).max(Decimal::ZERO),
            };
            tb.total_debtor += row.debtor_balance;
            tb.total_creditor += row.creditor_balance;
            tb.rows.push(row);
        }

        tb
    }

    pub fn row(&self, account: &str) -> Option<&AccountBalance> {
        self.rows.iter().find(|r| r.account == account)
    }

    /// `|total_debtor - total_creditor|`.
    pub fn difference(&self) -> Decimal {
        (self.total_debtor - self.total_creditor).abs()
    }

    /// Totals agree within the accumulated per-entry tolerance.
    pub fn is_balanced(&self) -> bool {
        self.difference() <= self.tolerance
    }
}

/// Signed balances and their sums for every aggregated account.
pub fn derive_trial_balance(general_ledger: &GeneralLedger) -> TrialBalance {
    TrialBalance::derive(general_ledger)
}

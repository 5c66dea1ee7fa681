use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use libro_core::{Entity, EntryId, ValueObject};

use crate::entry::Side;
use crate::ledger::Ledger;

/// Debit and credit postings accumulated for one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AccountTotals {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl ValueObject for AccountTotals {}

impl AccountTotals {
    pub fn side(&self, side: Side) -> Decimal {
        match side {
            Side::Debit => self.total_debit,
            Side::Credit => self.total_credit,
        }
    }

    /// `total_debit - total_credit`.
    pub fn net_debit(&self) -> Decimal {
        self.total_debit - self.total_credit
    }

    fn post(&mut self, side: Side, amount: Decimal) {
        match side {
            Side::Debit => self.total_debit += amount,
            Side::Credit => self.total_credit += amount,
        }
    }
}

/// The general ledger ("mayor"): per-account totals folded from the journal.
///
/// Only accounts that were posted to appear; lookups of any other account go
/// through [`GeneralLedger::totals_or_zero`]. Accounts iterate in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct GeneralLedger {
    accounts: BTreeMap<String, AccountTotals>,
    #[serde(skip)]
    entries: usize,
}

impl GeneralLedger {
    /// Fold every posting of every entry into its account.
    pub fn aggregate(ledger: &Ledger) -> Self {
        let mut accounts: BTreeMap<String, AccountTotals> = BTreeMap::new();
        let mut entries = 0;

        for entry in ledger {
            entries += 1;
            for (side, line) in entry.postings() {
                accounts
                    .entry(line.account.clone())
                    .or_default()
                    .post(side, line.amount);
            }
        }

        Self { accounts, entries }
    }

    /// Number of journal entries folded in.
    pub fn entry_count(&self) -> usize {
        self.entries
    }

    pub fn get(&self, account: &str) -> Option<&AccountTotals> {
        self.accounts.get(account)
    }

    /// Totals for `account`; an account never posted to has zero on both sides.
    pub fn totals_or_zero(&self, account: &str) -> AccountTotals {
        self.accounts.get(account).copied().unwrap_or_default()
    }

    /// One side of an account, zero when the account is absent.
    pub fn side_total(&self, account: &str, side: Side) -> Decimal {
        self.totals_or_zero(account).side(side)
    }

    pub fn contains(&self, account: &str) -> bool {
        self.accounts.contains_key(account)
    }

    pub fn accounts(&self) -> impl Iterator<Item = &str> + '_ {
        self.accounts.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AccountTotals)> + '_ {
        self.accounts.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

/// Fold `ledger` into per-account totals.
pub fn aggregate(ledger: &Ledger) -> GeneralLedger {
    GeneralLedger::aggregate(ledger)
}

/// One posting to an account, as listed on its ledger card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountMovement {
    pub entry_id: EntryId,
    pub date: NaiveDate,
    pub concept: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

/// Every posting to `account` in recording order.
pub fn movements(ledger: &Ledger, account: &str) -> Vec<AccountMovement> {
    ledger
        .iter()
        .flat_map(move |entry| {
            entry
                .postings()
                .filter(move |(_, line)| line.account == account)
                .map(move |(side, line)| {
                    let (debit, credit) = match side {
                        Side::Debit => (line.amount, Decimal::ZERO),
                        Side::Credit => (Decimal::ZERO, line.amount),
                    };
                    AccountMovement {
                        entry_id: *entry.id(),
                        date: entry.date(),
                        concept: entry.concept().to_string(),
                        debit,
                        credit,
                    }
                })
        })
        .collect()
}

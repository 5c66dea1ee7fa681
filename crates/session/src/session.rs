//! One interactive bookkeeping session.
//!
//! The session owns the journal and the two running liquidity balances; every
//! report is recomputed from the journal on request. Nothing outlives the
//! session.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use libro_accounting::{
    AccountMovement, EntryBuilder, GeneralLedger, IncomeStatement, JournalEntry, JournalRow,
    JournalTotals, Ledger, Side, Transaction, TrialBalance, accounts, movements,
};
use libro_cash::{DenominationBreakdown, Reconciliation, count_cash};
use libro_core::{Entity, SessionId};

use crate::config::SessionConfig;
use crate::error::SessionResult;

/// Running cash ("Caja") and bank ("Bancos") balances.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Liquidity {
    pub cash: Decimal,
    pub bank: Decimal,
}

impl Liquidity {
    fn apply(&mut self, entry: &JournalEntry) {
        for (side, line) in entry.postings() {
            let delta = match side {
                Side::Debit => line.amount,
                Side::Credit => -line.amount,
            };
            match line.account.as_str() {
                accounts::CASH => self.cash += delta,
                accounts::BANK => self.bank += delta,
                _ => {}
            }
        }
    }
}

/// A cash count checked against the counted amount and against the books.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CashCountReport {
    pub breakdown: DenominationBreakdown,
    pub against_amount: Reconciliation,
    pub against_books: Reconciliation,
}

/// Everything the presentation layer renders, in one serializable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionReport {
    pub company_name: String,
    pub journal: Vec<JournalRow>,
    pub journal_totals: JournalTotals,
    pub general_ledger: GeneralLedger,
    pub trial_balance: TrialBalance,
    pub income_statement: IncomeStatement,
    pub liquidity: Liquidity,
}

#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    config: SessionConfig,
    ledger: Ledger,
    liquidity: Liquidity,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        let id = SessionId::new();
        tracing::info!(session_id = %id, company = %config.company_name, "session started");
        Self {
            id,
            config,
            ledger: Ledger::new(),
            liquidity: Liquidity::default(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn liquidity(&self) -> Liquidity {
        self.liquidity
    }

    /// Record a templated business transaction.
    pub fn record(&mut self, date: NaiveDate, transaction: Transaction) -> SessionResult<&JournalEntry> {
        let span = tracing::info_span!("record", session_id = %self.id, concept = transaction.concept());
        let _guard = span.enter();

        let entry = transaction.entry(date)?;
        Ok(self.commit(entry))
    }

    /// Record a free-form entry. Rejected entries leave the session untouched.
    pub fn post(&mut self, builder: EntryBuilder) -> SessionResult<&JournalEntry> {
        let span = tracing::info_span!("post", session_id = %self.id);
        let _guard = span.enter();

        let entry = builder.build()?;
        Ok(self.commit(entry))
    }

    fn commit(&mut self, entry: JournalEntry) -> &JournalEntry {
        self.liquidity.apply(&entry);
        let entry = self.ledger.append(entry);
        tracing::info!(
            entry_id = %entry.id(),
            total = %entry.total_debit(),
            "journal entry recorded"
        );
        entry
    }

    pub fn journal_totals(&self) -> JournalTotals {
        self.ledger.totals()
    }

    pub fn general_ledger(&self) -> GeneralLedger {
        GeneralLedger::aggregate(&self.ledger)
    }

    pub fn movements(&self, account: &str) -> Vec<AccountMovement> {
        movements(&self.ledger, account)
    }

    pub fn trial_balance(&self) -> TrialBalance {
        TrialBalance::derive(&self.general_ledger())
    }

    pub fn income_statement(&self) -> IncomeStatement {
        IncomeStatement::derive(&self.general_ledger())
    }

    /// Break a counted cash total into denominations and check it.
    pub fn count_cash(&self, amount: Decimal) -> SessionResult<CashCountReport> {
        let breakdown = count_cash(amount)?;
        let tolerance = self.config.reconciliation_tolerance;

        let report = CashCountReport {
            against_amount: breakdown.verify(amount, tolerance),
            against_books: breakdown.verify(self.liquidity.cash, tolerance),
            breakdown,
        };

        if !report.against_books.is_correct {
            tracing::warn!(
                session_id = %self.id,
                counted = %report.against_books.counted,
                books = %self.liquidity.cash,
                "cash count does not match the books"
            );
        }
        Ok(report)
    }

    pub fn report(&self) -> SessionReport {
        let general_ledger = self.general_ledger();
        SessionReport {
            company_name: self.config.company_name.clone(),
            journal: self.ledger.rows(),
            journal_totals: self.ledger.totals(),
            trial_balance: TrialBalance::derive(&general_ledger),
            income_statement: IncomeStatement::derive(&general_ledger),
            general_ledger,
            liquidity: self.liquidity,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libro_accounting::{LedgerError, TransferDirection};
    use rust_decimal_macros::dec;

    use crate::error::SessionError;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn recorded_entries_update_liquidity() {
        let mut session = Session::default();
        session
            .record(
                test_date(),
                Transaction::Opening {
                    cash: dec!(8512990.00),
                    bank: dec!(481000.00),
                },
            )
            .unwrap();
        session
            .record(test_date(), Transaction::Purchase { net: dec!(2000.00) })
            .unwrap();
        session
            .record(
                test_date(),
                Transaction::Transfer {
                    direction: TransferDirection::CashToBank,
                    amount: dec!(12990.00),
                },
            )
            .unwrap();

        assert_eq!(
            session.liquidity(),
            Liquidity {
                cash: dec!(8500000.00),
                bank: dec!(491670.00),
            }
        );
    }

    #[test]
    fn rejected_entry_leaves_session_untouched() {
        let mut session = Session::default();
        let err = session
            .post(
                EntryBuilder::new(test_date(), "Descuadrado")
                    .debit(accounts::CASH, dec!(100))
                    .credit(accounts::CAPITAL, dec!(90)),
            )
            .unwrap_err();

        assert!(matches!(err, SessionError::Ledger(LedgerError::Unbalanced { .. })));
        assert!(session.ledger().is_empty());
        assert_eq!(session.liquidity(), Liquidity::default());
    }

    #[test]
    fn cash_count_is_checked_against_books() {
        let mut session = Session::default();
        session
            .record(
                test_date(),
                Transaction::Opening {
                    cash: dec!(1888.50),
                    bank: Decimal::ZERO,
                },
            )
            .unwrap();

        let matching = session.count_cash(dec!(1888.50)).unwrap();
        assert!(matching.against_amount.is_correct);
        assert!(matching.against_books.is_correct);

        let short = session.count_cash(dec!(1800)).unwrap();
        assert!(short.against_amount.is_correct);
        assert!(!short.against_books.is_correct);
        assert_eq!(short.against_books.discrepancy, dec!(88.50));
    }

    #[test]
    fn negative_cash_count_is_rejected() {
        let session = Session::default();
        assert!(matches!(
            session.count_cash(dec!(-5)),
            Err(SessionError::Cash(_))
        ));
    }

    #[test]
    fn report_bundles_all_views() {
        let mut session = Session::default();
        session
            .record(test_date(), Transaction::CashSale { amount: dec!(1160) })
            .unwrap();

        let report = session.report();
        assert_eq!(report.company_name, "GameVerse Studios");
        assert_eq!(report.journal.len(), 3);
        assert!(report.journal_totals.is_balanced());
        assert!(report.trial_balance.is_balanced());
        assert_eq!(report.income_statement.net_sales, dec!(1000));
        assert_eq!(report.liquidity.bank, dec!(1160));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["company_name"], "GameVerse Studios");
        assert!(json["general_ledger"]["Ventas"].is_object());
    }
}

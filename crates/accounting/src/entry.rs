use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use libro_core::amount::{format_amount, parse_lenient};
use libro_core::{BALANCE_TOLERANCE, Entity, EntryId, ValueObject};

use crate::error::{LedgerError, LedgerResult};

/// Column a journal line is posted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Debit,
    Credit,
}

/// One (account, amount) line of a journal entry.
///
/// Lines have no identity beyond their position inside the entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    pub account: String,
    /// Non-negative amount.
    pub amount: Decimal,
}

impl JournalLine {
    pub fn new(account: impl Into<String>, amount: Decimal) -> Self {
        Self {
            account: account.into(),
            amount,
        }
    }
}

impl ValueObject for JournalLine {}

impl<A: Into<String>> From<(A, Decimal)> for JournalLine {
    fn from((account, amount): (A, Decimal)) -> Self {
        Self::new(account, amount)
    }
}

/// A balanced journal entry.
///
/// Only [`EntryBuilder`] creates entries, so every value of this type satisfies
/// `|total_debit - total_credit| <= 0.01`. Entries are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalEntry {
    id: EntryId,
    date: NaiveDate,
    concept: String,
    debit_lines: Vec<JournalLine>,
    credit_lines: Vec<JournalLine>,
}

impl JournalEntry {
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn concept(&self) -> &str {
        &self.concept
    }

    pub fn debit_lines(&self) -> &[JournalLine] {
        &self.debit_lines
    }

    pub fn credit_lines(&self) -> &[JournalLine] {
        &self.credit_lines
    }

    pub fn total_debit(&self) -> Decimal {
        self.debit_lines.iter().map(|l| l.amount).sum()
    }

    pub fn total_credit(&self) -> Decimal {
        self.credit_lines.iter().map(|l| l.amount).sum()
    }

    pub fn is_balanced(&self) -> bool {
        (self.total_debit() - self.total_credit()).abs() <= BALANCE_TOLERANCE
    }

    /// All lines tagged with their side: debit lines first, then credit lines,
    /// each in input order.
    pub fn postings(&self) -> impl Iterator<Item = (Side, &JournalLine)> + '_ {
        self.debit_lines
            .iter()
            .map(|l| (Side::Debit, l))
            .chain(self.credit_lines.iter().map(|l| (Side::Credit, l)))
    }

    /// Two-column rendering of this entry.
    ///
    /// Date and concept appear on the first row only. A debit row carries zero
    /// in the credit column and vice versa.
    pub fn rows(&self) -> Vec<JournalRow> {
        self.postings()
            .enumerate()
            .map(|(i, (side, line))| {
                let (debit, credit) = match side {
                    Side::Debit => (line.amount, Decimal::ZERO),
                    Side::Credit => (Decimal::ZERO, line.amount),
                };
                JournalRow {
                    date: (i == 0).then_some(self.date),
                    account: line.account.clone(),
                    debit,
                    credit,
                    concept: (i == 0).then(|| self.concept.clone()),
                }
            })
            .collect()
    }
}

impl Entity for JournalEntry {
    type Id = EntryId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// One display row of the journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JournalRow {
    pub date: Option<NaiveDate>,
    pub account: String,
    pub debit: Decimal,
    pub credit: Decimal,
    pub concept: Option<String>,
}

impl JournalRow {
    /// Text cells as a table renderer shows them.
    pub fn display(&self) -> DisplayRow {
        DisplayRow {
            date: self
                .date
                .map(|d| d.format("%d/%m/%Y").to_string())
                .unwrap_or_default(),
            account: self.account.clone(),
            debit: format_amount(self.debit),
            credit: format_amount(self.credit),
            concept: self.concept.clone().unwrap_or_default(),
        }
    }
}

/// A journal row as text cells.
///
/// Amount cells may come back edited or garbled from a table widget; reading
/// them never fails and malformed cells count as zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRow {
    pub date: String,
    pub account: String,
    pub debit: String,
    pub credit: String,
    pub concept: String,
}

impl DisplayRow {
    pub fn debit_amount(&self) -> Decimal {
        parse_lenient(&self.debit)
    }

    pub fn credit_amount(&self) -> Decimal {
        parse_lenient(&self.credit)
    }
}

/// Builds and validates a single journal entry.
///
/// ```ignore
/// let entry = EntryBuilder::new(date, "Compra de mercancía")
///     .debit("Compras", dec!(2000))
///     .debit("IVA Acreditable", dec!(320))
///     .credit("Bancos", dec!(2320))
///     .build()?;
/// ```
#[derive(Debug, Clone)]
pub struct EntryBuilder {
    id: Option<EntryId>,
    date: NaiveDate,
    concept: String,
    debit_lines: Vec<JournalLine>,
    credit_lines: Vec<JournalLine>,
}

impl EntryBuilder {
    pub fn new(date: NaiveDate, concept: impl Into<String>) -> Self {
        Self {
            id: None,
            date,
            concept: concept.into(),
            debit_lines: Vec::new(),
            credit_lines: Vec::new(),
        }
    }

    /// Use a fixed identifier instead of a fresh UUIDv7.
    pub fn with_id(mut self, id: EntryId) -> Self {
        self.id = Some(id);
        self
    }

    pub fn debit(mut self, account: impl Into<String>, amount: Decimal) -> Self {
        self.debit_lines.push(JournalLine::new(account, amount));
        self
    }

    pub fn credit(mut self, account: impl Into<String>, amount: Decimal) -> Self {
        self.credit_lines.push(JournalLine::new(account, amount));
        self
    }

    pub fn debits<L: Into<JournalLine>>(mut self, lines: impl IntoIterator<Item = L>) -> Self {
        self.debit_lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn credits<L: Into<JournalLine>>(mut self, lines: impl IntoIterator<Item = L>) -> Self {
        self.credit_lines.extend(lines.into_iter().map(Into::into));
        self
    }

    /// Validate and produce the entry. Pure: nothing is recorded anywhere.
    pub fn build(self) -> LedgerResult<JournalEntry> {
        if self.concept.trim().is_empty() {
            return Err(LedgerError::EmptyConcept);
        }

        for line in self.debit_lines.iter().chain(&self.credit_lines) {
            if line.account.trim().is_empty() {
                return Err(LedgerError::EmptyAccount);
            }
            if line.amount.is_sign_negative() && !line.amount.is_zero() {
                return Err(LedgerError::NegativeAmount {
                    account: line.account.clone(),
                    amount: line.amount,
                });
            }
        }

        let total_debit = checked_total(&self.debit_lines, "debit lines")?;
        let total_credit = checked_total(&self.credit_lines, "credit lines")?;

        if (total_debit - total_credit).abs() > BALANCE_TOLERANCE {
            tracing::warn!(
                concept = %self.concept,
                %total_debit,
                %total_credit,
                "rejected unbalanced journal entry"
            );
            return Err(LedgerError::Unbalanced {
                total_debit,
                total_credit,
            });
        }

        Ok(JournalEntry {
            id: self.id.unwrap_or_default(),
            date: self.date,
            concept: self.concept,
            debit_lines: self.debit_lines,
            credit_lines: self.credit_lines,
        })
    }
}

fn checked_total(lines: &[JournalLine], context: &'static str) -> LedgerResult<Decimal> {
    lines
        .iter()
        .try_fold(Decimal::ZERO, |acc, l| acc.checked_add(l.amount))
        .ok_or(LedgerError::AmountOverflow { context })
}

/// Build an entry from debit and credit `(account, amount)` line sets.
pub fn build_entry<A, B>(
    date: NaiveDate,
    concept: impl Into<String>,
    debit_lines: impl IntoIterator<Item = (A, Decimal)>,
    credit_lines: impl IntoIterator<Item = (B, Decimal)>,
) -> LedgerResult<JournalEntry>
where
    A: Into<String>,
    B: Into<String>,
{
    EntryBuilder::new(date, concept)
        .debits(debit_lines)
        .credits(credit_lines)
        .build()
}

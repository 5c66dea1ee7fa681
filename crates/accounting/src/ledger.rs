use rust_decimal::Decimal;
use serde::Serialize;

use libro_core::{Entity, EntryId};

use crate::entry::{DisplayRow, JournalEntry, JournalRow, Side};

/// The journal ("libro diario"): every entry recorded in a session.
///
/// Insertion order is recording order, which need not match entry dates.
/// Append-only; entries are never edited or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Ledger {
    entries: Vec<JournalEntry>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validated entry.
    ///
    /// `JournalEntry` can only be produced by `EntryBuilder`, so the balance
    /// check has already run; the re-check here only guards debug builds.
    pub fn append(&mut self, entry: JournalEntry) -> &JournalEntry {
        debug_assert!(entry.is_balanced(), "unbalanced entry reached the ledger");

        tracing::debug!(
            entry_id = %entry.id(),
            concept = entry.concept(),
            position = self.entries.len(),
            "journal entry appended"
        );

        self.entries.push(entry);
        &self.entries[self.entries.len() - 1]
    }

    /// All entries in recording order.
    pub fn all(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, JournalEntry> {
        self.entries.iter()
    }

    pub fn get(&self, id: EntryId) -> Option<&JournalEntry> {
        self.entries.iter().find(|e| *e.id() == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Display rows for the whole journal.
    pub fn rows(&self) -> Vec<JournalRow> {
        self.entries.iter().flat_map(JournalEntry::rows).collect()
    }

    /// Column totals of the whole journal.
    pub fn totals(&self) -> JournalTotals {
        let mut totals = JournalTotals::default();
        for entry in &self.entries {
            for (side, line) in entry.postings() {
                totals.add(side, line.amount);
            }
        }
        totals
    }
}

impl<'a> IntoIterator for &'a Ledger {
    type Item = &'a JournalEntry;
    type IntoIter = std::slice::Iter<'a, JournalEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Debit and credit column totals of the journal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JournalTotals {
    pub total_debit: Decimal,
    pub total_credit: Decimal,
}

impl JournalTotals {
    fn add(&mut self, side: Side, amount: Decimal) {
        match side {
            Side::Debit => self.total_debit += amount,
            Side::Credit => self.total_credit += amount,
        }
    }

    /// Totals recomputed from rendered rows. Malformed cells count as zero.
    pub fn from_display_rows<'a>(rows: impl IntoIterator<Item = &'a DisplayRow>) -> Self {
        rows.into_iter().fold(Self::default(), |mut acc, row| {
            acc.add(Side::Debit, row.debit_amount());
            acc.add(Side::Credit, row.credit_amount());
            acc
        })
    }

    pub fn difference(&self) -> Decimal {
        (self.total_debit - self.total_credit).abs()
    }

    /// Exact column equality.
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

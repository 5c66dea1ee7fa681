use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use libro_core::BALANCE_TOLERANCE;
use libro_core::amount::{round_cents, within_tolerance};

use crate::denomination::{BASELINE_TOTAL, DENOMINATIONS, Denomination, DenominationKind, smallest};
use crate::error::{CashError, CashResult};

/// How a breakdown was produced.
///
/// Amounts of at least [`BASELINE_TOTAL`] first take one unit of every
/// denomination, then fill the rest greedily. Smaller amounts are filled
/// greedily from scratch. The two paths give different unit counts around
/// the 1888.50 boundary; that boundary is deliberate policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountStrategy {
    BaselineFirst,
    Greedy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DenominationCount {
    pub denomination: Denomination,
    pub count: u64,
}

impl DenominationCount {
    pub fn subtotal(&self) -> Decimal {
        self.denomination.value() * Decimal::from(self.count)
    }
}

/// Unit count per face value, largest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DenominationBreakdown {
    amount: Decimal,
    strategy: CountStrategy,
    counts: Vec<DenominationCount>,
}

impl DenominationBreakdown {
    fn empty(amount: Decimal, strategy: CountStrategy) -> Self {
        Self {
            amount,
            strategy,
            counts: DENOMINATIONS
                .iter()
                .map(|&denomination| DenominationCount {
                    denomination,
                    count: 0,
                })
                .collect(),
        }
    }

    /// The requested amount, rounded to cents.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn strategy(&self) -> CountStrategy {
        self.strategy
    }

    pub fn count(&self, denomination: Denomination) -> u64 {
        self.counts
            .iter()
            .find(|c| c.denomination == denomination)
            .map_or(0, |c| c.count)
    }

    /// Count for a face value such as `dec!(0.5)`; zero for unknown values.
    pub fn count_of(&self, face_value: Decimal) -> u64 {
        self.counts
            .iter()
            .find(|c| c.denomination.value() == face_value)
            .map_or(0, |c| c.count)
    }

    /// Denominations with a non-zero count, largest first.
    pub fn iter(&self) -> impl Iterator<Item = &DenominationCount> + '_ {
        self.counts.iter().filter(|c| c.count > 0)
    }

    pub fn bills(&self) -> impl Iterator<Item = &DenominationCount> + '_ {
        self.iter()
            .filter(|c| c.denomination.kind() == DenominationKind::Bill)
    }

    pub fn coins(&self) -> impl Iterator<Item = &DenominationCount> + '_ {
        self.iter()
            .filter(|c| c.denomination.kind() == DenominationKind::Coin)
    }

    pub fn pieces(&self) -> u64 {
        self.counts.iter().map(|c| c.count).sum()
    }

    /// `sum(face * count)`.
    pub fn total(&self) -> Decimal {
        self.counts.iter().map(DenominationCount::subtotal).sum()
    }

    /// Compare the counted total against an expected cash balance.
    pub fn verify(&self, expected: Decimal, tolerance: Decimal) -> Reconciliation {
        let counted = self.total();
        Reconciliation {
            expected,
            counted,
            discrepancy: (counted - expected).abs(),
            is_correct: within_tolerance(counted, expected, tolerance),
        }
    }

    fn add(&mut self, index: usize, units: u64) {
        self.counts[index].count += units;
    }

    /// Greedy fill, largest first. Returns what is left over (always < 0.50).
    fn fill_greedy(&mut self, mut remaining: Decimal) -> CashResult<Decimal> {
        for (index, denomination) in DENOMINATIONS.iter().enumerate() {
            if remaining < BALANCE_TOLERANCE {
                break;
            }

            let units = (remaining / denomination.value()).floor();
            if units.is_zero() {
                continue;
            }

            let whole = units.to_u64().ok_or(CashError::TooLarge(self.amount))?;
            self.add(index, whole);
            remaining = round_cents(remaining - units * denomination.value());
        }
        Ok(remaining)
    }
}

/// Outcome of checking a count against the expected balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reconciliation {
    pub expected: Decimal,
    pub counted: Decimal,
    pub discrepancy: Decimal,
    pub is_correct: bool,
}

/// Break `amount` into denominations, choosing the strategy by amount.
///
/// Leftovers smaller than the 0.50 coin are covered by one more 0.50 coin, so
/// the breakdown never totals less than the amount. For multiples of 0.50 it
/// reconstructs the amount exactly.
pub fn count_cash(amount: Decimal) -> CashResult<DenominationBreakdown> {
    let strategy = if round_cents(amount) >= BASELINE_TOTAL {
        CountStrategy::BaselineFirst
    } else {
        CountStrategy::Greedy
    };
    count_cash_with(amount, strategy)
}

/// Break `amount` into denominations with an explicit strategy.
///
/// `BaselineFirst` below [`BASELINE_TOTAL`] falls back to `Greedy`.
pub fn count_cash_with(
    amount: Decimal,
    strategy: CountStrategy,
) -> CashResult<DenominationBreakdown> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(CashError::NegativeAmount(amount));
    }
    let amount = round_cents(amount);

    let strategy = match strategy {
        CountStrategy::BaselineFirst if amount < BASELINE_TOTAL => CountStrategy::Greedy,
        other => other,
    };

    let mut breakdown = DenominationBreakdown::empty(amount, strategy);
    let remaining = match strategy {
        CountStrategy::BaselineFirst => {
            for index in 0..DENOMINATIONS.len() {
                breakdown.add(index, 1);
            }
            breakdown.fill_greedy(amount - BASELINE_TOTAL)?
        }
        CountStrategy::Greedy => breakdown.fill_greedy(amount)?,
    };

    if remaining >= BALANCE_TOLERANCE {
        breakdown.add(DENOMINATIONS.len() - 1, 1);
        tracing::debug!(%amount, %remaining, "covered leftover with an extra {}", smallest());
    }

    tracing::debug!(%amount, ?strategy, pieces = breakdown.pieces(), "cash counted");
    Ok(breakdown)
}

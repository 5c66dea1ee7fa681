use rust_decimal::Decimal;
use serde::Serialize;

/// Face values of 20 and above are bills; smaller ones are coins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DenominationKind {
    Bill,
    Coin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Denomination(Decimal);

impl Denomination {
    const fn units(units: u32) -> Self {
        Self(Decimal::from_parts(units, 0, 0, false, 0))
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn kind(self) -> DenominationKind {
        if self.0 >= Decimal::from(20) {
            DenominationKind::Bill
        } else {
            DenominationKind::Coin
        }
    }
}

impl core::fmt::Display for Denomination {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

/// Fixed denomination set, largest first.
pub const DENOMINATIONS: [Denomination; 11] = [
    Denomination::units(1000),
    Denomination::units(500),
    Denomination::units(200),
    Denomination::units(100),
    Denomination::units(50),
    Denomination::units(20),
    Denomination::units(10),
    Denomination::units(5),
    Denomination::units(2),
    Denomination::units(1),
    Denomination(Decimal::from_parts(5, 0, 0, false, 1)),
];

/// Sum of one unit of every denomination (1888.50).
///
/// Both the baseline-first threshold and the amount the baseline consumes.
pub const BASELINE_TOTAL: Decimal = Decimal::from_parts(18885, 0, 0, false, 1);

/// Smallest face value (0.50).
pub(crate) fn smallest() -> Denomination {
    DENOMINATIONS[DENOMINATIONS.len() - 1]
}

//! Decimal amount helpers shared by every ledger component.
//!
//! Amounts are `rust_decimal::Decimal` throughout; these helpers pin down the
//! tolerance, rounding and text conventions in one place.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{DomainError, DomainResult};

/// Maximum debit/credit difference accepted for a balanced entry (0.01).
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Default tolerance for verifying a cash count against the expected total (0.05).
pub const RECONCILIATION_TOLERANCE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Round to whole cents, half away from zero.
pub fn round_cents(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// `|a - b| <= tolerance`.
pub fn within_tolerance(a: Decimal, b: Decimal, tolerance: Decimal) -> bool {
    (a - b).abs() <= tolerance
}

fn normalize(text: &str) -> String {
    text.trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect()
}

/// Parse displayed amount text such as `"8,512,990.00"`.
///
/// Malformed text is recovered locally as zero; it is never surfaced.
pub fn parse_lenient(text: &str) -> Decimal {
    match parse_strict(text) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(text, error = %err, "treating malformed amount as zero");
            Decimal::ZERO
        }
    }
}

/// Parse displayed amount text, failing on malformed input.
pub fn parse_strict(text: &str) -> DomainResult<Decimal> {
    let normalized = normalize(text);
    normalized
        .parse::<Decimal>()
        .map_err(|e| DomainError::validation(format!("malformed amount {text:?}: {e}")))
}

/// Format with thousands separators and two decimals (`8,512,990.00`).
pub fn format_amount(value: Decimal) -> String {
    let rounded = round_cents(value);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}.{frac_part}")
    } else {
        format!("{grouped}.{frac_part}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn tolerance_constants() {
        assert_eq!(BALANCE_TOLERANCE, dec!(0.01));
        assert_eq!(RECONCILIATION_TOLERANCE, dec!(0.05));
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_cents(dec!(2.345)), dec!(2.35));
        assert_eq!(round_cents(dec!(-2.345)), dec!(-2.35));
        assert_eq!(round_cents(dec!(2.344)), dec!(2.34));
    }

    #[test]
    fn formats_with_thousands_separators() {
        assert_eq!(format_amount(dec!(8512990)), "8,512,990.00");
        assert_eq!(format_amount(dec!(481000.5)), "481,000.50");
        assert_eq!(format_amount(dec!(999.999)), "1,000.00");
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(-1234.5)), "-1,234.50");
    }

    #[test]
    fn lenient_parse_strips_separators() {
        assert_eq!(parse_lenient("8,512,990.00"), dec!(8512990.00));
        assert_eq!(parse_lenient(" $2,320.00 "), dec!(2320.00));
    }

    #[test]
    fn lenient_parse_recovers_malformed_text_as_zero() {
        assert_eq!(parse_lenient("n/a"), Decimal::ZERO);
        assert_eq!(parse_lenient(""), Decimal::ZERO);
        assert_eq!(parse_lenient("12.3.4"), Decimal::ZERO);
    }

    #[test]
    fn strict_parse_reports_malformed_text() {
        let err = parse_strict("abc").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    proptest! {
        #[test]
        fn formatted_amounts_parse_back(cents in 0i64..10_000_000_000i64) {
            let value = Decimal::new(cents, 2);
            prop_assert_eq!(parse_lenient(&format_amount(value)), value);
        }
    }
}

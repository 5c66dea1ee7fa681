//! Canonical business transactions and the journal entries they produce.
//!
//! Every template derives its lines from one input amount at a fixed 16% VAT
//! rate. Amounts are rounded to cents; when a gross amount is split into net
//! and VAT, the VAT line takes the rounding residue so the entry balances
//! exactly.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use libro_core::amount::round_cents;

use crate::accounts;
use crate::entry::{EntryBuilder, JournalEntry};
use crate::error::{LedgerError, LedgerResult};

/// Fixed VAT rate (16%).
pub const VAT_RATE: Decimal = Decimal::from_parts(16, 0, 0, false, 2);

/// `1 + VAT_RATE`.
pub const VAT_FACTOR: Decimal = Decimal::from_parts(116, 0, 0, false, 2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    CashToBank,
    BankToCash,
}

/// A business transaction recorded through one of the canonical templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transaction {
    /// Opening balances: cash and bank against capital.
    Opening { cash: Decimal, bank: Decimal },
    /// Purchase of goods at a net (pre-VAT) amount paid by bank.
    Purchase { net: Decimal },
    /// Purchase of goods given the gross amount paid by bank.
    PurchaseAtGrossTotal { total: Decimal },
    /// Early-payment discount received on purchases (gross refund).
    PurchaseDiscount { amount: Decimal },
    /// Cash sale collected in the bank (gross).
    CashSale { amount: Decimal },
    /// Early-payment discount granted on sales (net).
    SalesDiscount { amount: Decimal },
    PurchaseReturn { amount: Decimal },
    SalesReturn { amount: Decimal },
    PurchaseRebate { amount: Decimal },
    SalesRebate { amount: Decimal },
    /// General expense paid by bank (gross).
    GeneralExpense { amount: Decimal },
    /// Move funds between cash and bank.
    Transfer {
        direction: TransferDirection,
        amount: Decimal,
    },
}

const OVERFLOW: LedgerError = LedgerError::AmountOverflow {
    context: "template amounts",
};

/// Net and VAT parts of a net amount.
fn add_vat(net: Decimal) -> LedgerResult<(Decimal, Decimal, Decimal)> {
    let net = round_cents(net);
    let vat = round_cents(net.checked_mul(VAT_RATE).ok_or(OVERFLOW)?);
    let gross = net.checked_add(vat).ok_or(OVERFLOW)?;
    Ok((net, vat, gross))
}

/// Net and VAT parts of a gross (VAT-inclusive) amount.
fn split_vat(gross: Decimal) -> (Decimal, Decimal, Decimal) {
    let gross = round_cents(gross);
    let net = round_cents(gross / VAT_FACTOR);
    (net, gross - net, gross)
}

impl Transaction {
    /// Concept label written on the journal entry.
    pub fn concept(&self) -> &'static str {
        match self {
            Transaction::Opening { .. } => "Apertura de cuentas",
            Transaction::Purchase { .. } | Transaction::PurchaseAtGrossTotal { .. } => {
                "Compra de mercancía"
            }
            Transaction::PurchaseDiscount { .. } => "Descuento por pronto pago s/compras",
            Transaction::CashSale { .. } => "Venta de mercancía al contado",
            Transaction::SalesDiscount { .. } => "Descuento por pronto pago s/ventas",
            Transaction::PurchaseReturn { .. } => "Devolución s/compras",
            Transaction::SalesReturn { .. } => "Devolución s/ventas",
            Transaction::PurchaseRebate { .. } => "Rebaja s/compras",
            Transaction::SalesRebate { .. } => "Rebaja s/ventas",
            Transaction::GeneralExpense { .. } => "Pago de gastos generales",
            Transaction::Transfer { .. } => "Traspaso entre cuentas",
        }
    }

    /// Build the balanced entry for this transaction.
    pub fn entry(&self, date: NaiveDate) -> LedgerResult<JournalEntry> {
        self.builder(date)?.build()
    }

    /// The pre-filled builder, for callers that need a fixed entry id.
    ///
    /// Fails only when the derived amounts leave the decimal range.
    pub fn builder(&self, date: NaiveDate) -> LedgerResult<EntryBuilder> {
        let b = EntryBuilder::new(date, self.concept());

        let b = match *self {
            Transaction::Opening { cash, bank } => {
                let (cash, bank) = (round_cents(cash), round_cents(bank));
                let capital = cash.checked_add(bank).ok_or(OVERFLOW)?;
                b.debit(accounts::CASH, cash)
                    .debit(accounts::BANK, bank)
                    .credit(accounts::CAPITAL, capital)
            }
            Transaction::Purchase { net } => {
                let (net, vat, gross) = add_vat(net)?;
                b.debit(accounts::PURCHASES, net)
                    .debit(accounts::VAT_IN, vat)
                    .credit(accounts::BANK, gross)
            }
            Transaction::PurchaseAtGrossTotal { total } => {
                let (net, vat, gross) = split_vat(total);
                b.debit(accounts::PURCHASES, net)
                    .debit(accounts::VAT_IN, vat)
                    .credit(accounts::BANK, gross)
            }
            Transaction::PurchaseDiscount { amount } => {
                let (net, vat, gross) = split_vat(amount);
                b.debit(accounts::BANK, gross)
                    .credit(accounts::PURCHASE_DISCOUNTS, net)
                    .credit(accounts::VAT_IN, vat)
            }
            Transaction::CashSale { amount } => {
                let (net, vat, gross) = split_vat(amount);
                b.debit(accounts::BANK, gross)
                    .credit(accounts::SALES, net)
                    .credit(accounts::VAT_OUT, vat)
            }
            Transaction::SalesDiscount { amount } => {
                let (net, vat, gross) = add_vat(amount)?;
                b.debit(accounts::SALES_DISCOUNTS, net)
                    .debit(accounts::VAT_OUT, vat)
                    .credit(accounts::BANK, gross)
            }
            Transaction::PurchaseReturn { amount } => {
                let (net, vat, gross) = split_vat(amount);
                b.debit(accounts::BANK, gross)
                    .credit(accounts::PURCHASE_RETURNS, net)
                    .credit(accounts::VAT_IN, vat)
            }
            Transaction::SalesReturn { amount } => {
                let (net, vat, gross) = split_vat(amount);
                b.debit(accounts::SALES_RETURNS, net)
                    .debit(accounts::VAT_OUT, vat)
                    .credit(accounts::BANK, gross)
            }
            Transaction::PurchaseRebate { amount } => {
                let (net, vat, gross) = split_vat(amount);
                b.debit(accounts::BANK, gross)
                    .credit(accounts::PURCHASE_REBATES, net)
                    .credit(accounts::VAT_IN, vat)
            }
            Transaction::SalesRebate { amount } => {
                let (net, vat, gross) = split_vat(amount);
                b.debit(accounts::SALES_REBATES, net)
                    .debit(accounts::VAT_OUT, vat)
                    .credit(accounts::BANK, gross)
            }
            Transaction::GeneralExpense { amount } => {
                let (net, vat, gross) = split_vat(amount);
                b.debit(accounts::GENERAL_EXPENSES, net)
                    .debit(accounts::VAT_IN, vat)
                    .credit(accounts::BANK, gross)
            }
            Transaction::Transfer { direction, amount } => {
                let amount = round_cents(amount);
                match direction {
                    TransferDirection::CashToBank => b
                        .debit(accounts::BANK, amount)
                        .credit(accounts::CASH, amount),
                    TransferDirection::BankToCash => b
                        .debit(accounts::CASH, amount)
                        .credit(accounts::BANK, amount),
                }
            }
        };
        Ok(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libro_core::{Entity, EntryId};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    fn lines(entry: &JournalEntry) -> (Vec<(&str, Decimal)>, Vec<(&str, Decimal)>) {
        let d = entry
            .debit_lines()
            .iter()
            .map(|l| (l.account.as_str(), l.amount))
            .collect();
        let c = entry
            .credit_lines()
            .iter()
            .map(|l| (l.account.as_str(), l.amount))
            .collect();
        (d, c)
    }

    #[test]
    fn opening_balances_credit_capital() {
        let entry = Transaction::Opening {
            cash: dec!(8512990.00),
            bank: dec!(481000.00),
        }
        .entry(test_date())
        .unwrap();

        let (d, c) = lines(&entry);
        assert_eq!(d, [("Caja", dec!(8512990.00)), ("Bancos", dec!(481000.00))]);
        assert_eq!(c, [("Capital Social", dec!(8993990.00))]);
        assert_eq!(entry.concept(), "Apertura de cuentas");
    }

    #[test]
    fn purchase_adds_input_vat() {
        let entry = Transaction::Purchase { net: dec!(2000.00) }
            .entry(test_date())
            .unwrap();

        let (d, c) = lines(&entry);
        assert_eq!(d, [("Compras", dec!(2000.00)), ("IVA Acreditable", dec!(320.00))]);
        assert_eq!(c, [("Bancos", dec!(2320.00))]);
        assert_eq!(entry.total_debit(), dec!(2320.00));
        assert_eq!(entry.total_credit(), dec!(2320.00));
    }

    #[test]
    fn gross_purchase_splits_out_vat() {
        let entry = Transaction::PurchaseAtGrossTotal { total: dec!(2320.00) }
            .entry(test_date())
            .unwrap();
        let (d, c) = lines(&entry);
        assert_eq!(d, [("Compras", dec!(2000.00)), ("IVA Acreditable", dec!(320.00))]);
        assert_eq!(c, [("Bancos", dec!(2320.00))]);
    }

    #[test]
    fn cash_sale_splits_output_vat() {
        let entry = Transaction::CashSale { amount: dec!(1160.00) }
            .entry(test_date())
            .unwrap();
        let (d, c) = lines(&entry);
        assert_eq!(d, [("Bancos", dec!(1160.00))]);
        assert_eq!(c, [("Ventas", dec!(1000.00)), ("IVA Trasladado", dec!(160.00))]);
    }

    #[test]
    fn sales_discount_is_net_plus_vat() {
        let entry = Transaction::SalesDiscount { amount: dec!(100.00) }
            .entry(test_date())
            .unwrap();
        let (d, c) = lines(&entry);
        assert_eq!(
            d,
            [("Descuentos s/ventas", dec!(100.00)), ("IVA Trasladado", dec!(16.00))]
        );
        assert_eq!(c, [("Bancos", dec!(116.00))]);
    }

    #[test]
    fn returns_and_rebates_use_their_contra_accounts() {
        let purchase_return = Transaction::PurchaseReturn { amount: dec!(58.00) }
            .entry(test_date())
            .unwrap();
        let (_, c) = lines(&purchase_return);
        assert_eq!(
            c,
            [("Devoluciones s/compras", dec!(50.00)), ("IVA Acreditable", dec!(8.00))]
        );

        let sales_rebate = Transaction::SalesRebate { amount: dec!(58.00) }
            .entry(test_date())
            .unwrap();
        let (d, _) = lines(&sales_rebate);
        assert_eq!(d, [("Rebajas s/ventas", dec!(50.00)), ("IVA Trasladado", dec!(8.00))]);
    }

    #[test]
    fn builder_accepts_a_fixed_entry_id() {
        let id = EntryId::new();
        let entry = Transaction::CashSale { amount: dec!(1160.00) }
            .builder(test_date())
            .unwrap()
            .with_id(id)
            .build()
            .unwrap();

        assert_eq!(*entry.id(), id);
        assert_eq!(entry.concept(), "Venta de mercancía al contado");
        assert_eq!(entry.total_credit(), dec!(1160.00));
    }

    #[test]
    fn out_of_range_amounts_are_rejected() {
        let overflow = LedgerError::AmountOverflow {
            context: "template amounts",
        };
        assert_eq!(
            Transaction::Purchase { net: Decimal::MAX }.entry(test_date()),
            Err(overflow.clone())
        );
        assert_eq!(
            Transaction::SalesDiscount { amount: Decimal::MAX }.entry(test_date()),
            Err(overflow.clone())
        );
        assert_eq!(
            Transaction::Opening {
                cash: Decimal::MAX,
                bank: Decimal::ONE,
            }
            .entry(test_date()),
            Err(overflow)
        );
    }

    #[test]
    fn expense_split_absorbs_rounding_in_vat() {
        // 100 / 1.16 = 86.2068..., rounds to 86.21; VAT takes the rest.
        let entry = Transaction::GeneralExpense { amount: dec!(100.00) }
            .entry(test_date())
            .unwrap();
        let (d, c) = lines(&entry);
        assert_eq!(
            d,
            [("Gastos generales", dec!(86.21)), ("IVA Acreditable", dec!(13.79))]
        );
        assert_eq!(c, [("Bancos", dec!(100.00))]);
    }

    #[test]
    fn transfer_moves_funds_between_cash_and_bank() {
        let entry = Transaction::Transfer {
            direction: TransferDirection::CashToBank,
            amount: dec!(500),
        }
        .entry(test_date())
        .unwrap();
        let (d, c) = lines(&entry);
        assert_eq!(d, [("Bancos", dec!(500))]);
        assert_eq!(c, [("Caja", dec!(500))]);
    }

    proptest! {
        #[test]
        fn every_template_balances_exactly(cents in 0i64..100_000_000_000i64) {
            let amount = Decimal::new(cents, 2);
            for tx in crate::test_support::every_template(amount) {
                let entry = tx.entry(test_date()).unwrap();
                prop_assert_eq!(entry.total_debit(), entry.total_credit());
            }
        }
    }
}

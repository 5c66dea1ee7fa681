use rust_decimal::Decimal;
use serde::Serialize;

use crate::accounts;
use crate::entry::Side;
use crate::general_ledger::GeneralLedger;

/// Handling surcharge applied to net purchases to get cost of sales (0.03%).
pub const HANDLING_SURCHARGE: Decimal = Decimal::from_parts(3, 0, 0, false, 4);

/// Income statement ("estado de resultados") derived from the general ledger.
///
/// Contra accounts (discounts, returns, rebates) are stored as positive
/// magnitudes and are *added* to their gross figure. Reference figures depend
/// on that convention.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IncomeStatement {
    pub net_sales: Decimal,
    pub total_purchases: Decimal,
    pub net_purchases: Decimal,
    pub total_merchandise: Decimal,
    pub cost_of_sales: Decimal,
    pub gross_profit: Decimal,
    /// No operating expense layer is modelled; equals `gross_profit`.
    pub operating_result: Decimal,
}

impl IncomeStatement {
    pub fn derive(gl: &GeneralLedger) -> Self {
        let sales = gl.side_total(accounts::SALES, Side::Credit);
        let sales_discounts = gl.side_total(accounts::SALES_DISCOUNTS, Side::Debit);
        let sales_returns = gl.side_total(accounts::SALES_RETURNS, Side::Debit);
        let sales_rebates = gl.side_total(accounts::SALES_REBATES, Side::Debit);

        let purchases = gl.side_total(accounts::PURCHASES, Side::Debit);
        let purchase_discounts = gl.side_total(accounts::PURCHASE_DISCOUNTS, Side::Credit);
        let purchase_returns = gl.side_total(accounts::PURCHASE_RETURNS, Side::Credit);
        let purchase_rebates = gl.side_total(accounts::PURCHASE_REBATES, Side::Credit);

        let net_sales = sales + sales_discounts + sales_returns + sales_rebates;
        let net_purchases = purchases + purchase_discounts + purchase_returns + purchase_rebates;
        let cost_of_sales = net_purchases + net_purchases * HANDLING_SURCHARGE;
        let gross_profit = net_sales - cost_of_sales;

        Self {
            net_sales,
            total_purchases: purchases,
            net_purchases,
            total_merchandise: net_purchases,
            cost_of_sales,
            gross_profit,
            operating_result: gross_profit,
        }
    }
}

pub fn derive_income_statement(gl: &GeneralLedger) -> IncomeStatement {
    IncomeStatement::derive(gl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntryBuilder;
    use crate::general_ledger::aggregate;
    use crate::ledger::Ledger;
    use crate::templates::Transaction;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 10).unwrap()
    }

    #[test]
    fn surcharge_constant() {
        assert_eq!(HANDLING_SURCHARGE, dec!(0.0003));
    }

    #[test]
    fn sales_and_purchases_only() {
        let mut ledger = Ledger::new();
        ledger.append(
            EntryBuilder::new(test_date(), "Venta")
                .debit(accounts::BANK, dec!(1000))
                .credit(accounts::SALES, dec!(1000))
                .build()
                .unwrap(),
        );
        ledger.append(
            EntryBuilder::new(test_date(), "Compra")
                .debit(accounts::PURCHASES, dec!(600))
                .credit(accounts::BANK, dec!(600))
                .build()
                .unwrap(),
        );

        let is = derive_income_statement(&aggregate(&ledger));
        assert_eq!(is.net_sales, dec!(1000));
        assert_eq!(is.total_purchases, dec!(600));
        assert_eq!(is.net_purchases, dec!(600));
        assert_eq!(is.total_merchandise, dec!(600));
        assert_eq!(is.cost_of_sales, dec!(600.18));
        assert_eq!(is.gross_profit, dec!(399.82));
        assert_eq!(is.operating_result, dec!(399.82));
    }

    #[test]
    fn contra_accounts_are_added_not_subtracted() {
        let mut ledger = Ledger::new();
        for tx in [
            Transaction::CashSale { amount: dec!(11600) },
            Transaction::SalesDiscount { amount: dec!(100) },
            Transaction::SalesReturn { amount: dec!(232) },
            Transaction::SalesRebate { amount: dec!(116) },
            Transaction::Purchase { net: dec!(5000) },
            Transaction::PurchaseDiscount { amount: dec!(58) },
            Transaction::PurchaseReturn { amount: dec!(116) },
            Transaction::PurchaseRebate { amount: dec!(232) },
        ] {
            ledger.append(tx.entry(test_date()).unwrap());
        }

        let is = derive_income_statement(&aggregate(&ledger));
        // 10000 + 100 + 200 + 100
        assert_eq!(is.net_sales, dec!(10400));
        assert_eq!(is.total_purchases, dec!(5000));
        // 5000 + 50 + 100 + 200
        assert_eq!(is.net_purchases, dec!(5350));
        assert_eq!(is.cost_of_sales, dec!(5351.605));
        assert_eq!(is.gross_profit, dec!(5048.395));
    }

    #[test]
    fn empty_ledger_yields_zero_statement() {
        let is = derive_income_statement(&aggregate(&Ledger::new()));
        assert_eq!(is, IncomeStatement::default());
    }

    #[test]
    fn accounts_on_the_unnatural_side_are_ignored() {
        let mut ledger = Ledger::new();
        // A debit to Ventas does not reduce sales: only the credit side is read.
        ledger.append(
            EntryBuilder::new(test_date(), "Ajuste")
                .debit(accounts::SALES, dec!(50))
                .credit(accounts::CASH, dec!(50))
                .build()
                .unwrap(),
        );
        let is = derive_income_statement(&aggregate(&ledger));
        assert_eq!(is.net_sales, Decimal::ZERO);
        assert_eq!(is.gross_profit, Decimal::ZERO);
    }
}

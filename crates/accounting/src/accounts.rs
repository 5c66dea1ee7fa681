//! Canonical account names used by the transaction templates and reports.

pub const CASH: &str = "Caja";
pub const BANK: &str = "Bancos";
pub const CAPITAL: &str = "Capital Social";

pub const PURCHASES: &str = "Compras";
pub const PURCHASE_DISCOUNTS: &str = "Descuentos s/compras";
pub const PURCHASE_RETURNS: &str = "Devoluciones s/compras";
pub const PURCHASE_REBATES: &str = "Rebajas s/compras";

pub const SALES: &str = "Ventas";
pub const SALES_DISCOUNTS: &str = "Descuentos s/ventas";
pub const SALES_RETURNS: &str = "Devoluciones s/ventas";
pub const SALES_REBATES: &str = "Rebajas s/ventas";

/// Input VAT (paid on purchases and expenses).
pub const VAT_IN: &str = "IVA Acreditable";
/// Output VAT (charged on sales).
pub const VAT_OUT: &str = "IVA Trasladado";

pub const GENERAL_EXPENSES: &str = "Gastos generales";

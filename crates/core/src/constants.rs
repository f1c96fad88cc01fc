/// Cash granted to a freshly registered user, in whole currency units.
pub const DEFAULT_STARTING_CASH: u32 = 10_000;

/// Decimal precision for monetary amounts.
pub const CASH_DECIMAL_PRECISION: u32 = 2;

/// Decimal precision for quoted prices.
pub const PRICE_DECIMAL_PRECISION: u32 = 4;

//! Derived portfolio views.
//!
//! Nothing here is persisted: holdings are recomputed from the ledger on
//! every read, and valuations re-quote every symbol per request.

use rust_decimal::Decimal;
use serde::Serialize;

/// A currently held position (net shares > 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub symbol: String,
    pub net_shares: i64,
}

/// A holding priced at the current quote.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingValuation {
    pub symbol: String,
    pub name: String,
    pub net_shares: i64,
    pub price: Decimal,
    pub market_value: Decimal,
}

/// The live portfolio view: valued holdings, cash, and their sum.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub holdings: Vec<HoldingValuation>,
    pub cash: Decimal,
    pub grand_total: Decimal,
}

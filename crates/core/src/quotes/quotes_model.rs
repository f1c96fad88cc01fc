//! Quote domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point-in-time price/name lookup for a ticker symbol.
///
/// Prices are valid only at call time; the provider is queried fresh for
/// every buy, sell, quote, and valuation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Uppercase ticker symbol as resolved by the provider.
    pub symbol: String,
    /// Display name of the instrument.
    pub name: String,
    /// Latest traded price.
    pub price: Decimal,
}

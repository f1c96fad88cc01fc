//! Position aggregation traits.

use async_trait::async_trait;

use super::holdings_model::{Holding, PortfolioSummary};
use crate::errors::Result;

/// Pure read-side computation over the ledger.
#[async_trait]
pub trait HoldingsServiceTrait: Send + Sync {
    /// Net shares for one (user, symbol) pair; zero when never traded.
    ///
    /// Reports whatever the ledger contains, without assuming the
    /// write-time invariant held for historic data.
    fn net_position(&self, user_id: i64, symbol: &str) -> Result<i64>;

    /// Symbols currently held (net shares > 0).
    fn holdings(&self, user_id: i64) -> Result<Vec<Holding>>;

    /// Live valuation: every held symbol re-quoted, plus cash.
    ///
    /// A quote failure aborts the whole valuation rather than returning
    /// partial results.
    async fn portfolio_value(&self, user_id: i64) -> Result<PortfolioSummary>;
}

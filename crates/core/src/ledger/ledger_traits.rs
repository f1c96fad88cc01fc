//! Ledger repository and service traits.

use async_trait::async_trait;

use super::ledger_model::{Position, TradeConfirmation, Transaction, TransactionDraft};
use crate::errors::Result;

/// Contract for ledger persistence.
///
/// `record` is the only write path for both the transactions table and
/// the user's cash balance. Implementations must run the side-specific
/// guard check (funds for buys, net position for sells), the transaction
/// insert, and the cash update within a single serialized commit so that
/// a partial write is structurally impossible and two racing trades for
/// the same user cannot both pass a guard against stale state.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Atomically applies a trade, returning the recorded transaction and
    /// the resulting cash balance.
    ///
    /// Fails with `LedgerError::InsufficientFunds` (buy),
    /// `LedgerError::NoSuchHolding` or `LedgerError::OverSell` (sell)
    /// without any state change.
    async fn record(&self, draft: TransactionDraft) -> Result<TradeConfirmation>;

    /// All transactions for a user in insertion order.
    fn get_transactions(&self, user_id: i64) -> Result<Vec<Transaction>>;

    /// Net position per symbol the user has ever traded, including zeros.
    ///
    /// Reports whatever the ledger contains; callers filter as needed.
    fn get_positions(&self, user_id: i64) -> Result<Vec<Position>>;

    /// Net position for one symbol, zero when never traded.
    fn get_position(&self, user_id: i64, symbol: &str) -> Result<i64>;
}

/// Contract for the ledger's buy/sell operations.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Validates and applies a buy: fresh quote, funds check, atomic commit.
    async fn buy(&self, user_id: i64, symbol: &str, quantity: i64) -> Result<TradeConfirmation>;

    /// Validates and applies a sell: fresh quote, position check, atomic commit.
    async fn sell(&self, user_id: i64, symbol: &str, quantity: i64) -> Result<TradeConfirmation>;

    /// Audit trail for a user, in insertion order.
    fn transaction_history(&self, user_id: i64) -> Result<Vec<Transaction>>;
}

//! Ledger domain models.
//!
//! A `Transaction` is immutable once recorded; the ledger is append-only
//! and is the sole source for position reconstruction.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Direction of a trade, persisted as a signed unit (+1 buy, -1 sell)
/// so positions reduce to a sum of `direction * quantity`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl TradeSide {
    /// Signed unit direction: +1 for buys, -1 for sells.
    pub fn direction(&self) -> i64 {
        match self {
            TradeSide::Buy => 1,
            TradeSide::Sell => -1,
        }
    }

    /// Reconstructs a side from a stored direction value.
    pub fn from_direction(direction: i64) -> Result<Self> {
        match direction {
            1 => Ok(TradeSide::Buy),
            -1 => Ok(TradeSide::Sell),
            other => Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Invalid trade direction: {}",
                other
            )))),
        }
    }
}

/// An immutable buy/sell record.
///
/// The execution price is captured from the quote provider at submission
/// time and never re-fetched; live valuation always queries fresh quotes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: i64,
    pub side: TradeSide,
    pub symbol: String,
    pub price: Decimal,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Signed share delta this transaction contributes to the position.
    pub fn signed_quantity(&self) -> i64 {
        self.side.direction() * self.quantity
    }

    /// Gross cash amount of the trade (always positive).
    pub fn gross_amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// A buy/sell intent before quote resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeOrder {
    pub user_id: i64,
    pub symbol: String,
    pub quantity: i64,
}

impl TradeOrder {
    /// Validates the order input.
    ///
    /// Quantity must be a positive integer; the symbol must be non-empty
    /// after trimming.
    pub fn validate(&self) -> Result<()> {
        if self.symbol.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "symbol".to_string(),
            )));
        }
        if self.quantity < 1 {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "Quantity must be a positive integer, got {}",
                self.quantity
            ))));
        }
        Ok(())
    }

    /// Trimmed, uppercased symbol used for quoting and persistence.
    pub fn normalized_symbol(&self) -> String {
        self.symbol.trim().to_uppercase()
    }
}

/// A validated trade with its captured execution price, ready to be
/// applied atomically by the ledger repository.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub user_id: i64,
    pub side: TradeSide,
    pub symbol: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl TransactionDraft {
    /// Gross cash amount of the trade (always positive).
    pub fn gross_amount(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Outcome of an accepted trade.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeConfirmation {
    pub transaction: Transaction,
    /// Cash balance after the trade committed.
    pub cash_after: Decimal,
}

/// Net share count for one (user, symbol) pair, derived by summing
/// signed quantities over the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub symbol: String,
    pub net_shares: i64,
}

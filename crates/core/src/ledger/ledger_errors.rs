//! Ledger-related error types.
//!
//! Each variant corresponds to a rejected buy/sell intent; a rejected
//! intent leaves no trace in the ledger or on the cash balance.

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Buy cost exceeds the user's available cash.
    #[error("Insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        required: Decimal,
        available: Decimal,
    },

    /// Sell against a symbol the user holds no shares of.
    #[error("No holding in {0}")]
    NoSuchHolding(String),

    /// Sell quantity exceeds the net position.
    #[error("Cannot sell {requested} shares, only {held} held")]
    OverSell { requested: i64, held: i64 },
}

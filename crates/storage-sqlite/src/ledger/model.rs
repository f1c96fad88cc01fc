//! Database models for ledger transactions.

use chrono::{NaiveDateTime, TimeZone, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use paperfolio_core::ledger::{TradeSide, Transaction};

use crate::users::model::parse_decimal_column;

/// Database model for transactions. Rows are append-only.
#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: String,
    pub user_id: i64,
    /// Signed unit: +1 buy, -1 sell.
    pub direction: i64,
    pub symbol: String,
    pub price: String,
    pub quantity: i64,
    pub created_at: NaiveDateTime,
}

impl From<TransactionDB> for Transaction {
    fn from(db: TransactionDB) -> Self {
        // A direction outside {+1,-1} is rejected by the CHECK constraint;
        // default to Sell only to keep reads total.
        let side = TradeSide::from_direction(db.direction).unwrap_or(TradeSide::Sell);
        Transaction {
            id: db.id,
            user_id: db.user_id,
            side,
            symbol: db.symbol,
            price: parse_decimal_column(&db.price, "transactions.price"),
            quantity: db.quantity,
            created_at: Utc.from_utc_datetime(&db.created_at),
        }
    }
}

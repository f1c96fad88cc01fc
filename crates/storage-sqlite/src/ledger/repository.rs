use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use paperfolio_core::constants::CASH_DECIMAL_PRECISION;
use paperfolio_core::ledger::{
    LedgerError, LedgerRepositoryTrait, Position, TradeConfirmation, TradeSide, Transaction,
    TransactionDraft,
};
use paperfolio_core::users::UserError;
use paperfolio_core::{Error, Result};

// Diesel's built-in `sum` maps BigInt to Numeric, which SQLite cannot
// deserialize into i64; SQLite's SUM over integers stays integral.
diesel::define_sql_function! {
    #[aggregate]
    #[sql_name = "SUM"]
    fn sum(expr: diesel::sql_types::BigInt) -> diesel::sql_types::Nullable<diesel::sql_types::BigInt>;
}

use super::model::TransactionDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{transactions, users};
use crate::users::model::{parse_decimal_column, UserDB};

/// Repository for the append-only transaction ledger.
///
/// `record` is the single write path for both tables it touches: the
/// guard check, the transaction insert, and the cash update run in one
/// job on the write actor, i.e. inside one immediate transaction. A
/// failed guard rolls back with no state change.
pub struct LedgerRepository {
    pool: Arc<Pool<ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl LedgerRepository {
    /// Creates a new LedgerRepository instance.
    pub fn new(pool: Arc<Pool<ConnectionManager<SqliteConnection>>>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn net_shares_in_tx(
        conn: &mut SqliteConnection,
        user_id: i64,
        symbol: &str,
    ) -> Result<i64> {
        let net: Option<i64> = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::symbol.eq(symbol))
            .select(sum(transactions::direction * transactions::quantity))
            .first(conn)
            .into_core()?;
        Ok(net.unwrap_or(0))
    }
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn record(&self, draft: TransactionDraft) -> Result<TradeConfirmation> {
        self.writer
            .exec(move |conn| {
                let user = users::table
                    .select(UserDB::as_select())
                    .find(draft.user_id)
                    .first::<UserDB>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::from(UserError::NotFound(draft.user_id.to_string())))?;

                let cash = parse_decimal_column(&user.cash, "users.cash");
                let amount = draft.gross_amount();

                let cash_after = match draft.side {
                    TradeSide::Buy => {
                        if cash < amount {
                            return Err(LedgerError::InsufficientFunds {
                                required: amount,
                                available: cash,
                            }
                            .into());
                        }
                        cash - amount
                    }
                    TradeSide::Sell => {
                        let held =
                            Self::net_shares_in_tx(conn, draft.user_id, &draft.symbol)?;
                        if held <= 0 {
                            return Err(LedgerError::NoSuchHolding(draft.symbol.clone()).into());
                        }
                        if draft.quantity > held {
                            return Err(LedgerError::OverSell {
                                requested: draft.quantity,
                                held,
                            }
                            .into());
                        }
                        cash + amount
                    }
                };
                // Balances are stored at cent precision.
                let cash_after = cash_after.round_dp(CASH_DECIMAL_PRECISION);

                let row = TransactionDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: draft.user_id,
                    direction: draft.side.direction(),
                    symbol: draft.symbol.clone(),
                    price: draft.price.to_string(),
                    quantity: draft.quantity,
                    created_at: Utc::now().naive_utc(),
                };

                diesel::insert_into(transactions::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;

                diesel::update(users::table.find(draft.user_id))
                    .set((
                        users::cash.eq(cash_after.to_string()),
                        users::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .into_core()?;

                Ok(TradeConfirmation {
                    transaction: Transaction::from(row),
                    cash_after,
                })
            })
            .await
    }

    fn get_transactions(&self, user_id: i64) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;

        // rowid, not created_at: two trades can land in the same
        // timestamp granule, and the ids are random.
        let rows = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .select(TransactionDB::as_select())
            .order(transactions::rowid.asc())
            .load::<TransactionDB>(&mut conn)
            .into_core()?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    fn get_positions(&self, user_id: i64) -> Result<Vec<Position>> {
        let mut conn = get_connection(&self.pool)?;

        let rows: Vec<(String, Option<i64>)> = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .group_by(transactions::symbol)
            .select((
                transactions::symbol,
                sum(transactions::direction * transactions::quantity),
            ))
            .order(transactions::symbol.asc())
            .load(&mut conn)
            .into_core()?;

        Ok(rows
            .into_iter()
            .map(|(symbol, net)| Position {
                symbol,
                net_shares: net.unwrap_or(0),
            })
            .collect())
    }

    fn get_position(&self, user_id: i64, symbol: &str) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;

        let net: Option<i64> = transactions::table
            .filter(transactions::user_id.eq(user_id))
            .filter(transactions::symbol.eq(symbol))
            .select(sum(transactions::direction * transactions::quantity))
            .first(&mut conn)
            .into_core()?;

        Ok(net.unwrap_or(0))
    }
}

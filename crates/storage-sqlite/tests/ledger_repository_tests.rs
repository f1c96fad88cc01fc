//! Integration tests for the SQLite repositories against a real database.
//!
//! Each test opens a fresh database file in a temporary directory, runs
//! the embedded migrations, and exercises the repositories through the
//! same write actor the server uses.

use std::sync::Arc;

use diesel::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tempfile::TempDir;

use paperfolio_core::ledger::{
    LedgerError, LedgerRepositoryTrait, TradeSide, TransactionDraft,
};
use paperfolio_core::users::{UserError, UserRepositoryTrait};
use paperfolio_core::Error;
use paperfolio_storage_sqlite::ledger::{LedgerRepository, TransactionDB};
use paperfolio_storage_sqlite::schema::transactions;
use paperfolio_storage_sqlite::users::UserRepository;
use paperfolio_storage_sqlite::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbPool, WriteHandle,
};

struct TestDb {
    // Held so the database file outlives the repositories.
    _dir: TempDir,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn setup() -> TestDb {
    let dir = TempDir::new().expect("failed to create temp dir");
    let db_path = dir
        .path()
        .join("paperfolio-test.db")
        .to_str()
        .expect("temp path is not valid utf-8")
        .to_string();

    let db_path = init(&db_path).expect("failed to init database");
    let pool = create_pool(&db_path).expect("failed to create pool");
    run_migrations(&pool).expect("failed to run migrations");
    let writer = spawn_writer((*pool).clone());

    TestDb {
        _dir: dir,
        pool,
        writer,
    }
}

fn repositories(db: &TestDb) -> (UserRepository, LedgerRepository) {
    (
        UserRepository::new(db.pool.clone(), db.writer.clone()),
        LedgerRepository::new(db.pool.clone(), db.writer.clone()),
    )
}

async fn seed_user(users: &UserRepository, username: &str, cash: Decimal) -> i64 {
    users
        .create(username, "$argon2id$stub", cash)
        .await
        .expect("failed to create user")
        .id
}

fn buy(user_id: i64, symbol: &str, price: Decimal, quantity: i64) -> TransactionDraft {
    TransactionDraft {
        user_id,
        side: TradeSide::Buy,
        symbol: symbol.to_string(),
        price,
        quantity,
    }
}

fn sell(user_id: i64, symbol: &str, price: Decimal, quantity: i64) -> TransactionDraft {
    TransactionDraft {
        user_id,
        side: TradeSide::Sell,
        symbol: symbol.to_string(),
        price,
        quantity,
    }
}

#[tokio::test]
async fn test_buy_debits_cash_and_opens_position() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    let confirmation = ledger
        .record(buy(user_id, "AAPL", dec!(100), 10))
        .await
        .expect("buy should succeed");

    assert_eq!(confirmation.cash_after, dec!(9000));
    assert_eq!(confirmation.transaction.symbol, "AAPL");
    assert_eq!(confirmation.transaction.quantity, 10);
    assert_eq!(confirmation.transaction.side, TradeSide::Buy);

    let stored = users.get_by_id(user_id).expect("user should exist");
    assert_eq!(stored.cash, dec!(9000));

    let positions = ledger.get_positions(user_id).expect("positions query");
    assert_eq!(positions.len(), 1);
    assert_eq!(positions[0].symbol, "AAPL");
    assert_eq!(positions[0].net_shares, 10);
}

#[tokio::test]
async fn test_sell_credits_cash_and_reduces_position() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    ledger
        .record(buy(user_id, "AAPL", dec!(100), 10))
        .await
        .expect("buy should succeed");
    let confirmation = ledger
        .record(sell(user_id, "AAPL", dec!(120), 4))
        .await
        .expect("sell should succeed");

    assert_eq!(confirmation.cash_after, dec!(9480));
    assert_eq!(ledger.get_position(user_id, "AAPL").unwrap(), 6);
    assert_eq!(users.get_by_id(user_id).unwrap().cash, dec!(9480));
}

#[tokio::test]
async fn test_insufficient_funds_rolls_back_cleanly() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(500)).await;

    let err = ledger
        .record(buy(user_id, "AAPL", dec!(100), 10))
        .await
        .expect_err("buy beyond cash must fail");

    match err {
        Error::Ledger(LedgerError::InsufficientFunds {
            required,
            available,
        }) => {
            assert_eq!(required, dec!(1000));
            assert_eq!(available, dec!(500));
        }
        other => panic!("expected InsufficientFunds, got {other:?}"),
    }

    // No partial state: cash untouched, ledger empty.
    assert_eq!(users.get_by_id(user_id).unwrap().cash, dec!(500));
    assert!(ledger.get_transactions(user_id).unwrap().is_empty());
    assert!(ledger.get_positions(user_id).unwrap().is_empty());
}

#[tokio::test]
async fn test_oversell_is_rejected_without_side_effects() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    ledger
        .record(buy(user_id, "AAPL", dec!(100), 5))
        .await
        .expect("buy should succeed");

    let err = ledger
        .record(sell(user_id, "AAPL", dec!(100), 6))
        .await
        .expect_err("selling more than held must fail");

    match err {
        Error::Ledger(LedgerError::OverSell { requested, held }) => {
            assert_eq!(requested, 6);
            assert_eq!(held, 5);
        }
        other => panic!("expected OverSell, got {other:?}"),
    }

    assert_eq!(ledger.get_position(user_id, "AAPL").unwrap(), 5);
    assert_eq!(users.get_by_id(user_id).unwrap().cash, dec!(9500));
    assert_eq!(ledger.get_transactions(user_id).unwrap().len(), 1);
}

#[tokio::test]
async fn test_sell_without_holding_is_rejected() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    let err = ledger
        .record(sell(user_id, "TSLA", dec!(200), 1))
        .await
        .expect_err("selling a symbol never held must fail");

    match err {
        Error::Ledger(LedgerError::NoSuchHolding(symbol)) => assert_eq!(symbol, "TSLA"),
        other => panic!("expected NoSuchHolding, got {other:?}"),
    }
}

#[tokio::test]
async fn test_record_for_unknown_user_fails() {
    let db = setup();
    let (_, ledger) = repositories(&db);

    let err = ledger
        .record(buy(9999, "AAPL", dec!(100), 1))
        .await
        .expect_err("trading for a missing user must fail");

    assert!(matches!(err, Error::User(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_history_preserves_insertion_order() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    ledger
        .record(buy(user_id, "AAPL", dec!(100), 3))
        .await
        .unwrap();
    ledger
        .record(buy(user_id, "MSFT", dec!(50), 2))
        .await
        .unwrap();
    ledger
        .record(sell(user_id, "AAPL", dec!(110), 1))
        .await
        .unwrap();

    let history = ledger.get_transactions(user_id).unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0].symbol, "AAPL");
    assert_eq!(history[0].side, TradeSide::Buy);
    assert_eq!(history[1].symbol, "MSFT");
    assert_eq!(history[2].side, TradeSide::Sell);
    assert_eq!(history[2].price, dec!(110));
}

#[tokio::test]
async fn test_history_order_survives_timestamp_collisions() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    // Rows sharing one timestamp, with ids in reverse lexicographic
    // order so an id tiebreaker would flip them.
    let stamp = chrono::Utc::now().naive_utc();
    let mut conn = get_connection(&db.pool).expect("connection");
    for (id, symbol) in [("c-first", "AAPL"), ("b-second", "MSFT"), ("a-third", "TSLA")] {
        let row = TransactionDB {
            id: id.to_string(),
            user_id,
            direction: 1,
            symbol: symbol.to_string(),
            price: "10".to_string(),
            quantity: 1,
            created_at: stamp,
        };
        diesel::insert_into(transactions::table)
            .values(&row)
            .execute(&mut conn)
            .expect("insert");
    }

    let history = ledger.get_transactions(user_id).unwrap();
    let symbols: Vec<&str> = history.iter().map(|t| t.symbol.as_str()).collect();
    assert_eq!(symbols, ["AAPL", "MSFT", "TSLA"]);
}

#[tokio::test]
async fn test_cash_is_stored_at_cent_precision() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    let confirmation = ledger
        .record(buy(user_id, "AAPL", dec!(7.1234), 1))
        .await
        .expect("buy should succeed");

    assert_eq!(confirmation.cash_after, dec!(9992.88));
    assert_eq!(users.get_by_id(user_id).unwrap().cash, dec!(9992.88));
    // The transaction keeps the full execution price.
    assert_eq!(confirmation.transaction.price, dec!(7.1234));
}

#[tokio::test]
async fn test_positions_net_out_per_symbol() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    ledger
        .record(buy(user_id, "AAPL", dec!(10), 8))
        .await
        .unwrap();
    ledger
        .record(buy(user_id, "MSFT", dec!(10), 5))
        .await
        .unwrap();
    ledger
        .record(sell(user_id, "MSFT", dec!(10), 5))
        .await
        .unwrap();

    let positions = ledger.get_positions(user_id).unwrap();
    // Derived positions include closed symbols at zero; ordering is by symbol.
    assert_eq!(positions.len(), 2);
    assert_eq!(positions[0].symbol, "AAPL");
    assert_eq!(positions[0].net_shares, 8);
    assert_eq!(positions[1].symbol, "MSFT");
    assert_eq!(positions[1].net_shares, 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_full_position_sells_only_one_commits() {
    let db = setup();
    let (users, ledger) = repositories(&db);
    let ledger = Arc::new(ledger);
    let user_id = seed_user(&users, "alice", dec!(10000)).await;

    ledger
        .record(buy(user_id, "AAPL", dec!(100), 10))
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..2 {
        let ledger = ledger.clone();
        handles.push(tokio::spawn(async move {
            ledger.record(sell(user_id, "AAPL", dec!(100), 10)).await
        }));
    }

    let mut successes = 0;
    let mut oversells = 0;
    for handle in handles {
        match handle.await.expect("task panicked") {
            Ok(_) => successes += 1,
            Err(Error::Ledger(LedgerError::OverSell { .. }))
            | Err(Error::Ledger(LedgerError::NoSuchHolding(_))) => oversells += 1,
            Err(other) => panic!("unexpected error: {other:?}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(oversells, 1);
    assert_eq!(ledger.get_position(user_id, "AAPL").unwrap(), 0);
    assert_eq!(users.get_by_id(user_id).unwrap().cash, dec!(10000));
}

#[tokio::test]
async fn test_username_uniqueness_is_enforced() {
    let db = setup();
    let (users, _) = repositories(&db);

    seed_user(&users, "alice", dec!(10000)).await;
    let err = users
        .create("alice", "$argon2id$stub", dec!(10000))
        .await
        .expect_err("duplicate username must fail");

    assert!(matches!(err, Error::User(UserError::UsernameTaken(name)) if name == "alice"));
}

#[tokio::test]
async fn test_get_by_username_roundtrip() {
    let db = setup();
    let (users, _) = repositories(&db);
    let user_id = seed_user(&users, "bob", dec!(10000)).await;

    let found = users
        .get_by_username("bob")
        .expect("query should succeed")
        .expect("bob should exist");
    assert_eq!(found.id, user_id);
    assert_eq!(found.cash, dec!(10000));

    assert!(users.get_by_username("nobody").unwrap().is_none());
}

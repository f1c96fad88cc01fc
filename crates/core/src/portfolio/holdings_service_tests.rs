use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::holdings_service::HoldingsService;
use super::holdings_traits::HoldingsServiceTrait;
use crate::errors::{Error, Result};
use crate::ledger::{
    LedgerRepositoryTrait, Position, TradeConfirmation, TradeSide, Transaction, TransactionDraft,
};
use crate::quotes::{Quote, QuoteError, QuoteProviderTrait};
use crate::users::{User, UserError, UserRepositoryTrait};

// --- Fixed-ledger mock: positions are scripted, not derived ---

#[derive(Clone, Default)]
struct ScriptedLedger {
    positions: Arc<Mutex<Vec<Position>>>,
}

impl ScriptedLedger {
    fn set(&self, symbol: &str, net_shares: i64) {
        self.positions.lock().unwrap().push(Position {
            symbol: symbol.to_string(),
            net_shares,
        });
    }
}

#[async_trait]
impl LedgerRepositoryTrait for ScriptedLedger {
    async fn record(&self, _draft: TransactionDraft) -> Result<TradeConfirmation> {
        unimplemented!()
    }

    fn get_transactions(&self, _user_id: i64) -> Result<Vec<Transaction>> {
        let positions = self.positions.lock().unwrap();
        Ok(positions
            .iter()
            .map(|p| Transaction {
                id: p.symbol.clone(),
                user_id: 1,
                side: TradeSide::Buy,
                symbol: p.symbol.clone(),
                price: Decimal::ONE,
                quantity: p.net_shares.max(0),
                created_at: Utc::now(),
            })
            .collect())
    }

    fn get_positions(&self, _user_id: i64) -> Result<Vec<Position>> {
        Ok(self.positions.lock().unwrap().clone())
    }

    fn get_position(&self, _user_id: i64, symbol: &str) -> Result<i64> {
        Ok(self
            .positions
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.symbol == symbol)
            .map(|p| p.net_shares)
            .unwrap_or(0))
    }
}

#[derive(Clone)]
struct MockUserRepository {
    cash: Decimal,
}

#[async_trait]
impl UserRepositoryTrait for MockUserRepository {
    async fn create(&self, _username: &str, _password_hash: &str, _cash: Decimal) -> Result<User> {
        unimplemented!()
    }

    fn get_by_id(&self, user_id: i64) -> Result<User> {
        let now = Utc::now().naive_utc();
        Ok(User {
            id: user_id,
            username: "tester".to_string(),
            password_hash: String::new(),
            cash: self.cash,
            created_at: now,
            updated_at: now,
        })
    }

    fn get_by_username(&self, _username: &str) -> Result<Option<User>> {
        unimplemented!()
    }
}

#[derive(Clone, Default)]
struct MockQuoteProvider {
    quotes: Arc<Mutex<HashMap<String, Quote>>>,
}

impl MockQuoteProvider {
    fn set(&self, symbol: &str, name: &str, price: Decimal) {
        self.quotes.lock().unwrap().insert(
            symbol.to_string(),
            Quote {
                symbol: symbol.to_string(),
                name: name.to_string(),
                price,
            },
        );
    }
}

#[async_trait]
impl QuoteProviderTrait for MockQuoteProvider {
    async fn lookup(&self, symbol: &str) -> std::result::Result<Quote, QuoteError> {
        self.quotes
            .lock()
            .unwrap()
            .get(symbol)
            .cloned()
            .ok_or_else(|| QuoteError::SymbolNotFound(symbol.to_string()))
    }
}

fn setup(cash: Decimal) -> (HoldingsService, ScriptedLedger, MockQuoteProvider) {
    let ledger = ScriptedLedger::default();
    let provider = MockQuoteProvider::default();
    let service = HoldingsService::new(
        Arc::new(ledger.clone()),
        Arc::new(MockUserRepository { cash }),
        Arc::new(provider.clone()),
    );
    (service, ledger, provider)
}

#[tokio::test]
async fn holdings_filter_out_closed_positions() {
    let (service, ledger, _provider) = setup(dec!(0));
    ledger.set("AAA", 10);
    ledger.set("BBB", 0);
    ledger.set("CCC", 3);

    let holdings = service.holdings(1).unwrap();
    let symbols: Vec<&str> = holdings.iter().map(|h| h.symbol.as_str()).collect();
    assert_eq!(symbols, ["AAA", "CCC"]);
}

#[tokio::test]
async fn net_position_reports_ledger_contents_verbatim() {
    let (service, ledger, _provider) = setup(dec!(0));
    // A corrupt ledger could sum negative; the aggregator must not mask it.
    ledger.set("BAD", -2);

    assert_eq!(service.net_position(1, "BAD").unwrap(), -2);
    assert_eq!(service.net_position(1, "NONE").unwrap(), 0);
}

#[tokio::test]
async fn portfolio_value_sums_cash_and_market_values() {
    let (service, ledger, provider) = setup(dec!(9480));
    ledger.set("SYM", 6);
    provider.set("SYM", "Symbolic Inc", dec!(120));

    let summary = service.portfolio_value(1).await.unwrap();

    assert_eq!(summary.holdings.len(), 1);
    let row = &summary.holdings[0];
    assert_eq!(row.name, "Symbolic Inc");
    assert_eq!(row.market_value, dec!(720));
    assert_eq!(summary.cash, dec!(9480));
    assert_eq!(summary.grand_total, dec!(10200));
}

#[tokio::test]
async fn portfolio_value_of_empty_ledger_is_cash_only() {
    let (service, _ledger, _provider) = setup(dec!(10000));

    let summary = service.portfolio_value(1).await.unwrap();
    assert!(summary.holdings.is_empty());
    assert_eq!(summary.grand_total, dec!(10000));
}

#[tokio::test]
async fn quote_failure_aborts_valuation_entirely() {
    let (service, ledger, provider) = setup(dec!(100));
    ledger.set("AAA", 1);
    ledger.set("GONE", 2);
    provider.set("AAA", "Aaa Corp", dec!(10));

    let err = service.portfolio_value(1).await.unwrap_err();
    assert!(matches!(err, Error::Quote(QuoteError::SymbolNotFound(_))));
}

#[tokio::test]
async fn holdings_reads_are_idempotent() {
    let (service, ledger, _provider) = setup(dec!(0));
    ledger.set("AAA", 4);

    assert_eq!(service.holdings(1).unwrap(), service.holdings(1).unwrap());
}

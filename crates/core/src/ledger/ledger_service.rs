use log::debug;
use std::sync::Arc;

use super::ledger_model::{TradeConfirmation, TradeOrder, TradeSide, Transaction, TransactionDraft};
use super::ledger_traits::{LedgerRepositoryTrait, LedgerServiceTrait};
use crate::constants::PRICE_DECIMAL_PRECISION;
use crate::errors::Result;
use crate::quotes::QuoteProviderTrait;

/// Service accepting or rejecting buy/sell intents.
///
/// The price is captured once per trade, at submission time, and is
/// immutable thereafter. The repository applies the guarded commit; this
/// service owns input validation and quote resolution.
pub struct LedgerService {
    repository: Arc<dyn LedgerRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
}

impl LedgerService {
    /// Creates a new LedgerService instance.
    pub fn new(
        repository: Arc<dyn LedgerRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
    ) -> Self {
        Self {
            repository,
            quote_provider,
        }
    }

    async fn submit(
        &self,
        user_id: i64,
        symbol: &str,
        quantity: i64,
        side: TradeSide,
    ) -> Result<TradeConfirmation> {
        let order = TradeOrder {
            user_id,
            symbol: symbol.to_string(),
            quantity,
        };
        order.validate()?;

        let symbol = order.normalized_symbol();
        let quote = self.quote_provider.lookup(&symbol).await?;
        debug!(
            "Quoted {} at {} for user {} ({:?} x{})",
            quote.symbol, quote.price, user_id, side, quantity
        );

        let draft = TransactionDraft {
            user_id,
            side,
            symbol: quote.symbol.trim().to_uppercase(),
            // Execution price is captured at a fixed precision; providers
            // may hand back raw f64 conversions with junk digits.
            price: quote.price.round_dp(PRICE_DECIMAL_PRECISION),
            quantity,
        };
        self.repository.record(draft).await
    }
}

#[async_trait::async_trait]
impl LedgerServiceTrait for LedgerService {
    async fn buy(&self, user_id: i64, symbol: &str, quantity: i64) -> Result<TradeConfirmation> {
        self.submit(user_id, symbol, quantity, TradeSide::Buy).await
    }

    async fn sell(&self, user_id: i64, symbol: &str, quantity: i64) -> Result<TradeConfirmation> {
        self.submit(user_id, symbol, quantity, TradeSide::Sell)
            .await
    }

    fn transaction_history(&self, user_id: i64) -> Result<Vec<Transaction>> {
        self.repository.get_transactions(user_id)
    }
}

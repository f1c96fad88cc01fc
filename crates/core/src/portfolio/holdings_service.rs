use log::debug;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::holdings_model::{Holding, HoldingValuation, PortfolioSummary};
use super::holdings_traits::HoldingsServiceTrait;
use crate::errors::Result;
use crate::ledger::LedgerRepositoryTrait;
use crate::quotes::QuoteProviderTrait;
use crate::users::UserRepositoryTrait;

/// Derives positions and live valuations from the ledger.
pub struct HoldingsService {
    ledger_repository: Arc<dyn LedgerRepositoryTrait>,
    user_repository: Arc<dyn UserRepositoryTrait>,
    quote_provider: Arc<dyn QuoteProviderTrait>,
}

impl HoldingsService {
    /// Creates a new HoldingsService instance.
    pub fn new(
        ledger_repository: Arc<dyn LedgerRepositoryTrait>,
        user_repository: Arc<dyn UserRepositoryTrait>,
        quote_provider: Arc<dyn QuoteProviderTrait>,
    ) -> Self {
        Self {
            ledger_repository,
            user_repository,
            quote_provider,
        }
    }
}

#[async_trait::async_trait]
impl HoldingsServiceTrait for HoldingsService {
    fn net_position(&self, user_id: i64, symbol: &str) -> Result<i64> {
        self.ledger_repository.get_position(user_id, symbol)
    }

    fn holdings(&self, user_id: i64) -> Result<Vec<Holding>> {
        let positions = self.ledger_repository.get_positions(user_id)?;
        Ok(positions
            .into_iter()
            .filter(|p| p.net_shares > 0)
            .map(|p| Holding {
                symbol: p.symbol,
                net_shares: p.net_shares,
            })
            .collect())
    }

    async fn portfolio_value(&self, user_id: i64) -> Result<PortfolioSummary> {
        let holdings = self.holdings(user_id)?;
        debug!(
            "Valuing portfolio of user {} ({} holdings)",
            user_id,
            holdings.len()
        );

        let mut valued = Vec::with_capacity(holdings.len());
        let mut market_total = Decimal::ZERO;
        for holding in holdings {
            let quote = self.quote_provider.lookup(&holding.symbol).await?;
            let market_value = quote.price * Decimal::from(holding.net_shares);
            market_total += market_value;
            valued.push(HoldingValuation {
                symbol: holding.symbol,
                name: quote.name,
                net_shares: holding.net_shares,
                price: quote.price,
                market_value,
            });
        }

        let cash = self.user_repository.get_by_id(user_id)?.cash;
        Ok(PortfolioSummary {
            holdings: valued,
            cash,
            grand_total: cash + market_total,
        })
    }
}

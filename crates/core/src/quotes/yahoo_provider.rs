//! Yahoo Finance quote provider.
//!
//! Resolves the latest close price through the chart API and the display
//! name through ticker search. The chart response carries no name, so a
//! failed search falls back to the raw symbol rather than failing the
//! whole lookup.

use async_trait::async_trait;
use log::warn;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use yahoo_finance_api as yahoo;

use super::quotes_errors::QuoteError;
use super::quotes_model::Quote;
use super::quotes_traits::QuoteProviderTrait;

/// Quote provider backed by the Yahoo Finance API.
pub struct YahooQuoteProvider {
    connector: yahoo::YahooConnector,
}

impl YahooQuoteProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> std::result::Result<Self, QuoteError> {
        let connector = yahoo::YahooConnector::new().map_err(|e| {
            QuoteError::ProviderUnavailable(format!("Failed to initialize Yahoo connector: {}", e))
        })?;
        Ok(Self { connector })
    }

    /// Resolve a display name for `symbol` via ticker search.
    async fn resolve_name(&self, symbol: &str) -> Option<String> {
        let result = match self.connector.search_ticker(symbol).await {
            Ok(result) => result,
            Err(e) => {
                warn!("Ticker search failed for {}: {}", symbol, e);
                return None;
            }
        };

        result
            .quotes
            .iter()
            .find(|q| q.symbol.eq_ignore_ascii_case(symbol))
            .map(|q| {
                if q.long_name.is_empty() {
                    q.short_name.clone()
                } else {
                    q.long_name.clone()
                }
            })
            .filter(|name| !name.is_empty())
    }
}

#[async_trait]
impl QuoteProviderTrait for YahooQuoteProvider {
    async fn lookup(&self, symbol: &str) -> std::result::Result<Quote, QuoteError> {
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    QuoteError::SymbolNotFound(symbol.to_string())
                } else {
                    QuoteError::from(e)
                }
            })?;

        let last = response
            .last_quote()
            .map_err(|_| QuoteError::SymbolNotFound(symbol.to_string()))?;

        let price = Decimal::from_f64(last.close).ok_or_else(|| {
            QuoteError::InvalidData(format!(
                "Failed to convert close price {} to Decimal",
                last.close
            ))
        })?;

        if price <= Decimal::ZERO {
            return Err(QuoteError::InvalidData(format!(
                "Non-positive price {} for {}",
                price, symbol
            )));
        }

        let name = self
            .resolve_name(symbol)
            .await
            .unwrap_or_else(|| symbol.to_string());

        Ok(Quote {
            symbol: symbol.to_string(),
            name,
            price,
        })
    }
}

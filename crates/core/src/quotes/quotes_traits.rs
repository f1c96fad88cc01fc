//! Quote provider trait.
//!
//! The trait decouples the ledger and portfolio services from the concrete
//! market data source, allowing tests to substitute a scripted provider.

use async_trait::async_trait;

use super::quotes_errors::QuoteError;
use super::quotes_model::Quote;

/// Contract for the external quote provider.
///
/// Every call fetches a fresh price; implementations must not cache.
#[async_trait]
pub trait QuoteProviderTrait: Send + Sync {
    /// Resolves the current quote for `symbol`.
    ///
    /// Returns `QuoteError::SymbolNotFound` when the provider cannot
    /// resolve the symbol, and `QuoteError::ProviderUnavailable` for
    /// infrastructure failures.
    async fn lookup(&self, symbol: &str) -> std::result::Result<Quote, QuoteError>;
}

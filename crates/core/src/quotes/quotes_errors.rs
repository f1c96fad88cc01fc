//! Quote-related error types.

use thiserror::Error;

/// Errors that can occur while resolving a quote from the external provider.
///
/// `SymbolNotFound` is terminal (the symbol does not resolve), while
/// `ProviderUnavailable` covers infrastructure failures the caller may
/// choose to retry at the request level.
#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("Quote provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Invalid quote data: {0}")]
    InvalidData(String),
}

impl From<yahoo_finance_api::YahooError> for QuoteError {
    fn from(error: yahoo_finance_api::YahooError) -> Self {
        use yahoo_finance_api::YahooError;
        match error {
            YahooError::NoQuotes => QuoteError::SymbolNotFound("No quotes found".to_string()),
            YahooError::NoResult => QuoteError::SymbolNotFound("No data found".to_string()),
            YahooError::FetchFailed(e) => QuoteError::ProviderUnavailable(e),
            other => QuoteError::ProviderUnavailable(other.to_string()),
        }
    }
}

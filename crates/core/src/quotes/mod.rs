pub mod quotes_errors;
pub mod quotes_model;
pub mod quotes_traits;
pub mod yahoo_provider;

pub use quotes_errors::QuoteError;
pub use quotes_model::Quote;
pub use quotes_traits::QuoteProviderTrait;
pub use yahoo_provider::YahooQuoteProvider;

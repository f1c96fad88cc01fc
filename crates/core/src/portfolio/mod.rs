pub mod holdings_model;
pub mod holdings_service;
pub mod holdings_traits;

pub use holdings_model::{Holding, HoldingValuation, PortfolioSummary};
pub use holdings_service::HoldingsService;
pub use holdings_traits::HoldingsServiceTrait;

#[cfg(test)]
mod holdings_service_tests;

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use paperfolio_core::{
    ledger::{LedgerService, LedgerServiceTrait},
    portfolio::{HoldingsService, HoldingsServiceTrait},
    quotes::{QuoteProviderTrait, YahooQuoteProvider},
    users::{UserService, UserServiceTrait},
};
use paperfolio_storage_sqlite::{db, ledger::LedgerRepository, users::UserRepository};

use crate::auth::{decode_secret_key, AuthManager};
use crate::config::Config;

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub holdings_service: Arc<dyn HoldingsServiceTrait>,
    pub quote_provider: Arc<dyn QuoteProviderTrait>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let fmt_layer = fmt::layer().json().with_current_span(false);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::write_actor::spawn_writer((*pool).clone());

    let quote_provider: Arc<dyn QuoteProviderTrait> = Arc::new(
        YahooQuoteProvider::new().map_err(|e| anyhow::anyhow!("Quote provider init failed: {e}"))?,
    );

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let ledger_repository = Arc::new(LedgerRepository::new(pool.clone(), writer.clone()));

    let user_service: Arc<dyn UserServiceTrait> = match config.starting_cash {
        Some(cash) => Arc::new(UserService::with_starting_cash(user_repository.clone(), cash)),
        None => Arc::new(UserService::new(user_repository.clone())),
    };
    let ledger_service: Arc<dyn LedgerServiceTrait> = Arc::new(LedgerService::new(
        ledger_repository.clone(),
        quote_provider.clone(),
    ));
    let holdings_service: Arc<dyn HoldingsServiceTrait> = Arc::new(HoldingsService::new(
        ledger_repository,
        user_repository,
        quote_provider.clone(),
    ));

    let jwt_secret = decode_secret_key(&config.jwt_secret)?;
    let auth = Arc::new(AuthManager::new(&jwt_secret, config.token_ttl));

    Ok(Arc::new(AppState {
        user_service,
        ledger_service,
        holdings_service,
        quote_provider,
        auth,
    }))
}

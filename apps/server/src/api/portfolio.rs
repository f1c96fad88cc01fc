use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    routing::get,
    Json, Router,
};

use paperfolio_core::ledger::Transaction;
use paperfolio_core::portfolio::{Holding, PortfolioSummary};

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

async fn get_portfolio(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<PortfolioSummary>> {
    let summary = state.holdings_service.portfolio_value(user_id).await?;
    Ok(Json(summary))
}

async fn get_holdings(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Holding>>> {
    let holdings = state.holdings_service.holdings(user_id)?;
    Ok(Json(holdings))
}

async fn get_history(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let history = state.ledger_service.transaction_history(user_id)?;
    Ok(Json(history))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/portfolio", get(get_portfolio))
        .route("/holdings", get(get_holdings))
        .route("/history", get(get_history))
}

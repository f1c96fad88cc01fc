use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use serde::Deserialize;

use paperfolio_core::ledger::TradeConfirmation;

use crate::{auth::AuthUser, error::ApiResult, main_lib::AppState};

#[derive(Deserialize)]
pub struct TradeBody {
    pub symbol: String,
    pub quantity: i64,
}

async fn buy(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<TradeBody>,
) -> ApiResult<(StatusCode, Json<TradeConfirmation>)> {
    let confirmation = state
        .ledger_service
        .buy(user_id, &body.symbol, body.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

async fn sell(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<TradeBody>,
) -> ApiResult<(StatusCode, Json<TradeConfirmation>)> {
    let confirmation = state
        .ledger_service
        .sell(user_id, &body.symbol, body.quantity)
        .await?;
    Ok((StatusCode::CREATED, Json(confirmation)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/trades/buy", post(buy))
        .route("/trades/sell", post(sell))
}

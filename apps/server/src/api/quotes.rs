use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use paperfolio_core::quotes::Quote;
use paperfolio_core::Error as CoreError;

use crate::{error::ApiResult, main_lib::AppState};

async fn get_quote(
    Path(symbol): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Quote>> {
    let quote = state
        .quote_provider
        .lookup(symbol.trim())
        .await
        .map_err(CoreError::from)?;
    Ok(Json(quote))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/quotes/{symbol}", get(get_quote))
}

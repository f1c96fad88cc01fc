use std::sync::Arc;

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use paperfolio_core::users::User;

use crate::{
    auth::AuthUser,
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(Deserialize)]
pub struct CredentialsBody {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

fn session(state: &AppState, user: User) -> ApiResult<SessionResponse> {
    let token = state
        .auth
        .issue_token(user.id)
        .map_err(|_| ApiError::Unauthorized("Failed to issue token".into()))?;
    Ok(SessionResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
        user,
    })
}

async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> ApiResult<(StatusCode, Json<SessionResponse>)> {
    let user = state
        .user_service
        .register(&body.username, &body.password)
        .await?;
    tracing::info!("Registered user '{}'", user.username);
    Ok((StatusCode::CREATED, Json(session(&state, user)?)))
}

async fn login(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CredentialsBody>,
) -> ApiResult<Json<SessionResponse>> {
    let user = state
        .user_service
        .authenticate(&body.username, &body.password)?;
    Ok(Json(session(&state, user)?))
}

async fn me(
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    let user = state.user_service.get_user(user_id)?;
    Ok(Json(user))
}

pub fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

pub fn protected_router() -> Router<Arc<AppState>> {
    Router::new().route("/auth/me", get(me))
}

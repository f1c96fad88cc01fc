use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use paperfolio_core::errors::{DatabaseError, Error as CoreError};
use paperfolio_core::quotes::QuoteError;
use paperfolio_core::users::UserError;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    // Surface the underlying error message to help debugging during development
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

fn core_status(e: &CoreError) -> StatusCode {
    match e {
        CoreError::Validation(_) => StatusCode::BAD_REQUEST,
        // A rejected trade is a well-formed request the ledger refuses.
        CoreError::Ledger(_) => StatusCode::UNPROCESSABLE_ENTITY,
        CoreError::Quote(QuoteError::SymbolNotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Quote(_) => StatusCode::BAD_GATEWAY,
        CoreError::User(UserError::UsernameTaken(_)) => StatusCode::CONFLICT,
        CoreError::User(UserError::InvalidCredentials) => StatusCode::UNAUTHORIZED,
        CoreError::User(UserError::NotFound(_)) => StatusCode::NOT_FOUND,
        CoreError::Database(DatabaseError::NotFound(_)) => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match &self {
            ApiError::Core(e) => (core_status(e), e.to_string()),
            ApiError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            ApiError::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            ApiError::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason.clone()),
            ApiError::Anyhow(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };
        if status.is_server_error() {
            tracing::error!("Request failed: {}", msg);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: msg,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

//! API error taxonomy and its mapping to HTTP responses.
//!
//! Validation failures are produced before any query runs; store
//! failures are classified once, here, so every route maps errors the
//! same way.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::db;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Malformed or contradictory input; the store is never reached
    #[error("{0}")]
    Validation(String),
    /// Well-formed single-entity lookup that matched zero rows
    #[error("{0}")]
    NotFound(String),
    /// Store unreachable, pool exhausted or statement timeout exceeded
    #[error("service unavailable: {0}")]
    Unavailable(String),
    /// Anything uncategorized; detail is logged, not surfaced
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// JSON body returned for every error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Error::Unavailable(msg) => {
                error!("store unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "service temporarily unavailable".to_string(),
                )
            }
            Error::Internal(err) => {
                error!("unexpected error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<db::Error> for Error {
    fn from(err: db::Error) -> Self {
        match err {
            db::Error::Query(e) => classify_sqlx(e),
            db::Error::TimeFormat(e) => Error::Internal(e.into()),
        }
    }
}

// Postgres cancels statements that exceed statement_timeout with
// SQLSTATE 57014 (query_canceled).
const QUERY_CANCELED: &str = "57014";

fn classify_sqlx(err: sqlx::Error) -> Error {
    match &err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => Error::Unavailable(err.to_string()),
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) => Error::Unavailable(err.to_string()),
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(QUERY_CANCELED) => {
            Error::Unavailable(err.to_string())
        }
        _ => Error::Internal(err.into()),
    }
}

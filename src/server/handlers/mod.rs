pub mod auth;
pub mod branch_counters;
pub mod branch_offices;
pub mod company_profile;
pub mod dashboard;
pub mod health;
pub mod users;
pub mod votes;

use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};
use tracing::error;

use crate::errors::{ServiceError, UserError, VoteError};

/// Error shape every handler answers with: a status code plus
/// `{"error": "..."}`.
pub(crate) type ApiError = (StatusCode, Json<Value>);

pub(crate) fn error_body(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub(crate) fn service_error(err: ServiceError) -> ApiError {
    to_response(err.http_status(), err.to_string())
}

pub(crate) fn user_error(err: UserError) -> ApiError {
    to_response(err.http_status(), err.to_string())
}

pub(crate) fn vote_error(err: VoteError) -> ApiError {
    to_response(err.http_status(), err.to_string())
}

fn to_response(status: u16, message: String) -> ApiError {
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(%message, "request failed");
        return error_body(status, "An internal error occurred");
    }
    error_body(status, message)
}

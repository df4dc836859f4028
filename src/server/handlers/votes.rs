use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::server::app::AppState;
use crate::services::{VoteService, VoteType};

use super::{vote_error, ApiError};

#[derive(Deserialize)]
pub struct VoteRequest {
    pub vote_type: String,
}

/// Record a like/dislike for one officer.
///
/// Not idempotent: every accepted call adds exactly one vote, so clients
/// must not blindly retry after a timeout.
pub async fn vote_user(
    State(state): State<AppState>,
    Path(user_id): Path<i32>,
    Json(payload): Json<VoteRequest>,
) -> Result<Json<Value>, ApiError> {
    let vote_type = payload.vote_type.parse::<VoteType>().map_err(vote_error)?;

    VoteService::new(state.db.clone())
        .record_vote(vote_type, user_id)
        .await
        .map_err(vote_error)?;

    Ok(Json(json!({ "message": "Vote recorded successfully" })))
}

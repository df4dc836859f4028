use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::server::app::AppState;
use crate::services::{BranchCounterService, BranchOfficeService, CreateBranchCounter};

use super::{service_error, ApiError};

#[derive(Deserialize)]
pub struct CreateCounterRequest {
    pub counter_location: String,
    pub user_id: i32,
    pub branch_id: i32,
}

#[derive(Serialize)]
pub struct CounterResponse {
    pub id: i32,
    pub counter_location: String,
    pub full_name: Option<String>,
    pub image: Option<String>,
}

/// Counters of one branch with the officers staffing them, plus the branch
/// name and its counter capacity.
pub async fn list_counters_by_branch(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let office = BranchOfficeService::new(state.db.clone())
        .get_branch_office(branch_id)
        .await
        .map_err(service_error)?;

    let counters = BranchCounterService::new(state.db.clone())
        .list_counters_by_branch(branch_id)
        .await
        .map_err(service_error)?;

    let counters: Vec<CounterResponse> = counters
        .into_iter()
        .map(|(counter, officer)| CounterResponse {
            id: counter.id,
            counter_location: counter.counter_location,
            full_name: officer.as_ref().map(|user| user.full_name.clone()),
            image: officer.and_then(|user| user.image),
        })
        .collect();

    Ok(Json(json!({
        "list_counter": counters,
        "name_branch": office.name,
        "total_counter": office.total_counter,
    })))
}

pub async fn create_counter(
    State(state): State<AppState>,
    Json(payload): Json<CreateCounterRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    BranchCounterService::new(state.db.clone())
        .create_counter(CreateBranchCounter {
            counter_location: payload.counter_location,
            user_id: payload.user_id,
            branch_id: payload.branch_id,
        })
        .await
        .map_err(service_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Branch counter created successfully" })),
    ))
}

pub async fn delete_counter(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    BranchCounterService::new(state.db.clone())
        .delete_counter(id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({
        "message": "Branch counter deleted successfully",
        "id": id,
    })))
}

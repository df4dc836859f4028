use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::entities::total_data_branch;
use crate::server::app::AppState;
use crate::services::DashboardService;

use super::{service_error, ApiError};

#[derive(Deserialize)]
pub struct OfficerQuery {
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Serialize)]
pub struct BranchVoteResponse {
    pub id: i32,
    pub name_office: String,
    pub total_likes: i32,
    pub total_dislikes: i32,
    pub branch_id: i32,
}

impl From<total_data_branch::Model> for BranchVoteResponse {
    fn from(model: total_data_branch::Model) -> Self {
        Self {
            id: model.id,
            name_office: model.name_office,
            total_likes: model.total_likes,
            total_dislikes: model.total_dislikes,
            branch_id: model.branch_id,
        }
    }
}

pub async fn total_data(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let totals = DashboardService::new(state.db.clone())
        .totals()
        .await
        .map_err(service_error)?;

    Ok(Json(json!({
        "total_officer": totals.total_officer,
        "total_likes": totals.total_likes,
        "total_dislikes": totals.total_dislikes,
        "total_voted": totals.total_voted,
    })))
}

pub async fn total_vote_office(
    State(state): State<AppState>,
) -> Result<Json<Vec<BranchVoteResponse>>, ApiError> {
    let totals = DashboardService::new(state.db.clone())
        .branch_totals()
        .await
        .map_err(service_error)?;

    Ok(Json(totals.into_iter().map(BranchVoteResponse::from).collect()))
}

pub async fn branch_graph_data(
    State(state): State<AppState>,
    Path(branch_office_id): Path<i32>,
) -> Result<Json<BranchVoteResponse>, ApiError> {
    let totals = DashboardService::new(state.db.clone())
        .branch_totals_for(branch_office_id)
        .await
        .map_err(service_error)?;

    Ok(Json(totals.into()))
}

pub async fn officer_vote_data(
    State(state): State<AppState>,
    Query(query): Query<OfficerQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = query.limit.filter(|l| *l >= 1).unwrap_or(5);
    let offset = (page - 1) * limit;

    let officers = DashboardService::new(state.db.clone())
        .top_officers(limit, offset)
        .await
        .map_err(service_error)?;

    let officers: Vec<Value> = officers
        .into_iter()
        .map(|officer| {
            json!({
                "full_name": officer.full_name,
                "likes": officer.likes,
                "dislikes": officer.dislikes,
            })
        })
        .collect();

    Ok(Json(json!({
        "page": page,
        "limit": limit,
        "officers": officers,
    })))
}

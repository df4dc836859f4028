use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::entities::branch_offices;
use crate::server::app::AppState;
use crate::services::{BranchOfficeInput, BranchOfficeService};

use super::{service_error, ApiError};

#[derive(Deserialize)]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
}

#[derive(Serialize)]
pub struct BranchOfficeResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub total_counter: i32,
}

impl From<branch_offices::Model> for BranchOfficeResponse {
    fn from(model: branch_offices::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            address: model.address,
            total_counter: model.total_counter,
        }
    }
}

#[derive(Serialize)]
pub struct BranchOfficeOption {
    pub id: i32,
    pub name: String,
}

#[derive(Deserialize)]
pub struct BranchOfficeRequest {
    pub name: String,
    pub address: String,
    pub total_counter: i32,
}

pub async fn list_branch_offices(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = query.limit.filter(|l| *l >= 1).unwrap_or(5);
    let offset = (page - 1) * limit;

    let service = BranchOfficeService::new(state.db.clone());
    let offices = service
        .list_branch_offices(limit, offset)
        .await
        .map_err(service_error)?;
    let total_count = service.count_branch_offices().await.map_err(service_error)?;
    let total_pages = total_count.div_ceil(limit);

    let offices: Vec<BranchOfficeResponse> =
        offices.into_iter().map(BranchOfficeResponse::from).collect();

    Ok(Json(json!({
        "page": page,
        "limit": limit,
        "total_pages": total_pages,
        "total_count": total_count,
        "branch_offices": offices,
    })))
}

pub async fn branch_office_options(
    State(state): State<AppState>,
) -> Result<Json<Vec<BranchOfficeOption>>, ApiError> {
    let offices = BranchOfficeService::new(state.db.clone())
        .list_all_branch_offices()
        .await
        .map_err(service_error)?;

    let options = offices
        .into_iter()
        .map(|office| BranchOfficeOption {
            id: office.id,
            name: office.name,
        })
        .collect();

    Ok(Json(options))
}

pub async fn get_branch_office(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<BranchOfficeResponse>, ApiError> {
    let office = BranchOfficeService::new(state.db.clone())
        .get_branch_office(id)
        .await
        .map_err(service_error)?;

    Ok(Json(office.into()))
}

pub async fn create_branch_office(
    State(state): State<AppState>,
    Json(payload): Json<BranchOfficeRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    BranchOfficeService::new(state.db.clone())
        .create_branch_office(BranchOfficeInput {
            name: payload.name,
            address: payload.address,
            total_counter: payload.total_counter,
        })
        .await
        .map_err(service_error)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Branch office created successfully" })),
    ))
}

pub async fn update_branch_office(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<BranchOfficeRequest>,
) -> Result<Json<Value>, ApiError> {
    BranchOfficeService::new(state.db.clone())
        .update_branch_office(
            id,
            BranchOfficeInput {
                name: payload.name,
                address: payload.address,
                total_counter: payload.total_counter,
            },
        )
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "message": "Branch office updated successfully" })))
}

pub async fn delete_branch_office(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    BranchOfficeService::new(state.db.clone())
        .delete_branch_office(id)
        .await
        .map_err(service_error)?;

    Ok(Json(json!({ "message": "Branch office deleted successfully" })))
}

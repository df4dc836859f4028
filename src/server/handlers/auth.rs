use axum::extract::State;
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::server::app::AppState;
use crate::services::AuthService;

use super::{service_error, users::UserResponse, ApiError};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginMobileRequest {
    pub email: String,
    pub password: String,
    pub branch_id: i32,
}

pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = AuthService::new(state.db.clone());
    let user = service
        .login(&payload.email, &payload.password)
        .await
        .map_err(service_error)?;

    let token =
        AuthService::generate_token(&state.settings.jwt_secret, &user).map_err(service_error)?;

    Ok(Json(json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}

pub async fn login_mobile(
    State(state): State<AppState>,
    Json(payload): Json<LoginMobileRequest>,
) -> Result<Json<Value>, ApiError> {
    let service = AuthService::new(state.db.clone());
    let user = service
        .login_mobile(&payload.email, &payload.password, payload.branch_id)
        .await
        .map_err(service_error)?;

    let token =
        AuthService::generate_token(&state.settings.jwt_secret, &user).map_err(service_error)?;

    Ok(Json(json!({
        "token": token,
        "user": UserResponse::from(user),
    })))
}

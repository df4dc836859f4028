use std::path::PathBuf;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::warn;
use uuid::Uuid;

use crate::database::entities::users;
use crate::server::app::AppState;
use crate::services::{CreateUser, UpdateUser, UserService};

use super::{error_body, user_error, ApiError};

#[derive(Deserialize)]
pub struct ListQuery {
    page: Option<u64>,
    limit: Option<u64>,
    role: Option<String>,
}

/// User payload without the password hash.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub likes: i32,
    pub dislikes: i32,
    pub image: Option<String>,
    pub branch_id: Option<i32>,
}

impl From<users::Model> for UserResponse {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            email: model.email,
            role: model.role,
            likes: model.likes,
            dislikes: model.dislikes,
            image: model.image,
            branch_id: model.branch_id,
        }
    }
}

/// Form fields shared by user create and update.
#[derive(Default)]
struct UserForm {
    full_name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
    branch_id: Option<i32>,
    image_bytes: Option<Vec<u8>>,
}

async fn read_user_form(mut multipart: Multipart) -> Result<UserForm, ApiError> {
    let mut form = UserForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| error_body(StatusCode::BAD_REQUEST, "Failed to parse form"))?
    {
        let key = field.name().unwrap_or("").to_string();
        match key.as_str() {
            "full_name" => form.full_name = Some(read_text(&key, field).await?),
            "email" => form.email = Some(read_text(&key, field).await?),
            "password" => {
                let value = read_text(&key, field).await?;
                if !value.is_empty() {
                    form.password = Some(value);
                }
            }
            "role" => form.role = Some(read_text(&key, field).await?),
            "branch_id" => {
                let raw = read_text(&key, field).await?;
                let parsed = raw
                    .parse::<i32>()
                    .map_err(|_| error_body(StatusCode::BAD_REQUEST, "Invalid branch_id"))?;
                form.branch_id = Some(parsed);
            }
            "image" => {
                let bytes = field.bytes().await.map_err(|_| {
                    error_body(StatusCode::BAD_REQUEST, "Failed to read image upload")
                })?;
                if !bytes.is_empty() {
                    form.image_bytes = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_text(key: &str, field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field.text().await.map_err(|_| {
        error_body(
            StatusCode::BAD_REQUEST,
            format!("Invalid value for field '{}'", key),
        )
    })
}

fn required(value: Option<String>, name: &str) -> Result<String, ApiError> {
    value.ok_or_else(|| {
        error_body(
            StatusCode::BAD_REQUEST,
            format!("Missing required parameter: {}", name),
        )
    })
}

fn generate_image_name() -> String {
    format!("{}.png", Uuid::new_v4())
}

async fn save_image(dir: PathBuf, name: &str, bytes: &[u8]) -> Result<(), ApiError> {
    let path = dir.join(name);
    tokio::fs::write(&path, bytes).await.map_err(|e| {
        warn!(error = %e, path = %path.display(), "Failed to store image");
        error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store image")
    })
}

async fn remove_image(dir: PathBuf, name: &str) {
    let path = dir.join(name);
    if let Err(e) = tokio::fs::remove_file(&path).await {
        warn!(error = %e, path = %path.display(), "Failed to delete old image");
    }
}

pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let page = query.page.filter(|p| *p >= 1).unwrap_or(1);
    let limit = query.limit.filter(|l| *l >= 1).unwrap_or(5);
    let offset = (page - 1) * limit;
    let role = query.role.unwrap_or_else(|| "officer".to_string());

    let service = UserService::new(state.db.clone());
    let users = service
        .list_users(limit, offset, Some(&role))
        .await
        .map_err(user_error)?;
    let total_count = service.count_users(Some(&role)).await.map_err(user_error)?;
    let total_pages = total_count.div_ceil(limit);

    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(json!({
        "page": page,
        "limit": limit,
        "total_pages": total_pages,
        "total_count": total_count,
        "users": users,
        "role": role,
    })))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserService::new(state.db.clone())
        .get_user(id)
        .await
        .map_err(user_error)?;

    Ok(Json(user.into()))
}

pub async fn list_users_by_branch(
    State(state): State<AppState>,
    Path(branch_id): Path<i32>,
) -> Result<Json<Vec<UserResponse>>, ApiError> {
    let users = UserService::new(state.db.clone())
        .list_users_by_branch(branch_id)
        .await
        .map_err(user_error)?;

    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

pub async fn create_user(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let form = read_user_form(multipart).await?;

    let image_name = form.image_bytes.as_ref().map(|_| generate_image_name());

    UserService::new(state.db.clone())
        .create_user(CreateUser {
            full_name: required(form.full_name, "full_name")?,
            email: required(form.email, "email")?,
            password: required(form.password, "password")?,
            role: required(form.role, "role")?,
            branch_id: form.branch_id,
            image: image_name.clone(),
        })
        .await
        .map_err(user_error)?;

    // Write the file only once the account exists.
    if let (Some(name), Some(bytes)) = (image_name, form.image_bytes) {
        save_image(state.settings.images_dir(), &name, &bytes).await?;
    }

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully" })),
    ))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let form = read_user_form(multipart).await?;

    let service = UserService::new(state.db.clone());
    let stored = service.get_user(id).await.map_err(user_error)?;
    let old_image = stored.image.clone();

    let image_name = form.image_bytes.as_ref().map(|_| generate_image_name());

    service
        .update_user(
            id,
            UpdateUser {
                full_name: required(form.full_name, "full_name")?,
                email: required(form.email, "email")?,
                password: form.password,
                role: required(form.role, "role")?,
                branch_id: form.branch_id,
                image: image_name.clone(),
            },
        )
        .await
        .map_err(user_error)?;

    if let (Some(name), Some(bytes)) = (image_name.as_deref(), form.image_bytes) {
        save_image(state.settings.images_dir(), name, &bytes).await?;

        // The replaced file is no longer referenced by anything.
        if let Some(old) = old_image.filter(|old| Some(old.as_str()) != image_name.as_deref()) {
            remove_image(state.settings.images_dir(), &old).await;
        }
    }

    Ok(Json(json!({ "message": "User updated successfully" })))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    let deleted = UserService::new(state.db.clone())
        .delete_user(id)
        .await
        .map_err(user_error)?;

    if let Some(image) = deleted.image {
        remove_image(state.settings.images_dir(), &image).await;
    }

    Ok(Json(json!({ "message": "User deleted successfully" })))
}

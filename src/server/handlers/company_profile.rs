use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde_json::{json, Value};
use tracing::warn;

use crate::server::app::AppState;
use crate::services::CompanyProfileService;

use super::{error_body, service_error, ApiError};

/// Fixed file name the company logo is stored under.
const LOGO_FILE_NAME: &str = "application_logo.png";

pub async fn get_profile(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    let profile = CompanyProfileService::new(state.db.clone())
        .get_profile()
        .await
        .map_err(service_error)?;

    // Clients resolve the logo through the static /assets route.
    let logo = profile.logo.map(|logo| format!("/assets/{}", logo));

    Ok(Json(json!({
        "id": profile.id,
        "name": profile.name,
        "logo": logo,
    })))
}

pub async fn update_profile(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, ApiError> {
    let mut name: Option<String> = None;
    let mut logo_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| error_body(StatusCode::BAD_REQUEST, "Failed to parse form"))?
    {
        let key = field.name().unwrap_or("").to_string();
        match key.as_str() {
            "name" => {
                name = Some(field.text().await.map_err(|_| {
                    error_body(StatusCode::BAD_REQUEST, "Invalid value for field 'name'")
                })?);
            }
            "logo" => {
                let bytes = field.bytes().await.map_err(|_| {
                    error_body(StatusCode::BAD_REQUEST, "Failed to read logo upload")
                })?;
                if !bytes.is_empty() {
                    logo_bytes = Some(bytes.to_vec());
                }
            }
            _ => {}
        }
    }

    let name = name.ok_or_else(|| {
        error_body(StatusCode::BAD_REQUEST, "Missing required parameter: name")
    })?;

    let service = CompanyProfileService::new(state.db.clone());
    let stored = service.get_profile().await.map_err(service_error)?;
    let old_logo = stored.logo;

    let logo_name = logo_bytes.as_ref().map(|_| LOGO_FILE_NAME.to_string());
    service
        .update_profile(name, logo_name.clone())
        .await
        .map_err(service_error)?;

    if let (Some(logo_name), Some(bytes)) = (logo_name, logo_bytes) {
        let path = state.settings.assets_dir().join(&logo_name);
        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            warn!(error = %e, path = %path.display(), "Failed to store logo");
            error_body(StatusCode::INTERNAL_SERVER_ERROR, "Failed to store logo")
        })?;

        // A previous logo stored under a different name is now orphaned.
        if let Some(old) = old_logo.filter(|old| *old != logo_name) {
            let old_path = state.settings.assets_dir().join(&old);
            if let Err(e) = tokio::fs::remove_file(&old_path).await {
                warn!(error = %e, path = %old_path.display(), "Failed to delete old logo");
            }
        }
    }

    Ok(Json(json!({ "message": "Company profile updated successfully" })))
}

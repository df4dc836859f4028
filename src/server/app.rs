use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use sea_orm::DatabaseConnection;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use super::handlers::{
    auth, branch_counters, branch_offices, company_profile, dashboard, health, users, votes,
};
use super::middleware::{limit_concurrent_requests, RequestLimiter};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub limiter: Arc<RequestLimiter>,
    pub settings: Arc<ServerSettings>,
}

pub struct ServerSettings {
    pub jwt_secret: String,
    /// Root of the uploaded-file tree: user images under `images/`, the
    /// company logo under `assets/`.
    pub public_dir: PathBuf,
}

impl ServerSettings {
    pub fn images_dir(&self) -> PathBuf {
        self.public_dir.join("images")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.public_dir.join("assets")
    }
}

pub async fn create_app(state: AppState, cors_origin: Option<&str>) -> Result<Router> {
    let cors = match cors_origin {
        Some(origin) => CorsLayer::new()
            .allow_origin(origin.parse::<axum::http::HeaderValue>()?)
            .allow_methods(Any)
            .allow_headers(Any),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
    };

    tokio::fs::create_dir_all(state.settings.images_dir()).await?;
    tokio::fs::create_dir_all(state.settings.assets_dir()).await?;

    let app = Router::new()
        // Health check endpoint
        .route("/health", get(health::health_check))
        // API routes
        .merge(api_routes())
        // Uploaded files
        .nest_service("/images", ServeDir::new(state.settings.images_dir()))
        .nest_service("/assets", ServeDir::new(state.settings.assets_dir()))
        // Add middleware; the admission gate sits in front of every route
        .layer(
            ServiceBuilder::new()
                .layer(cors)
                .layer(middleware::from_fn_with_state(
                    state.clone(),
                    limit_concurrent_requests,
                )),
        )
        .with_state(state);

    Ok(app)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        // Branch office routes
        .route(
            "/branch_offices",
            get(branch_offices::list_branch_offices).post(branch_offices::create_branch_office),
        )
        .route(
            "/branch_offices/option-list",
            get(branch_offices::branch_office_options),
        )
        .route(
            "/branch_offices/:id",
            get(branch_offices::get_branch_office)
                .put(branch_offices::update_branch_office)
                .delete(branch_offices::delete_branch_office),
        )
        // User routes
        .route("/users", get(users::list_users).post(users::create_user))
        .route(
            "/users/:id",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/users/branch-office/:id",
            get(users::list_users_by_branch),
        )
        // Branch counter routes
        .route("/branch_counters", post(branch_counters::create_counter))
        .route(
            "/branch_counters/:id",
            get(branch_counters::list_counters_by_branch).delete(branch_counters::delete_counter),
        )
        // Company profile routes
        .route(
            "/company_profiles",
            get(company_profile::get_profile).put(company_profile::update_profile),
        )
        // Vote routes
        .route("/voted-user/:user_id", post(votes::vote_user))
        // Dashboard routes
        .route("/dashboard/total-data", get(dashboard::total_data))
        .route(
            "/dashboard/total-vote-office",
            get(dashboard::total_vote_office),
        )
        .route(
            "/dashboard/graph-data/:branch_office_id",
            get(dashboard::branch_graph_data),
        )
        .route(
            "/dashboard/vote-data-officer",
            get(dashboard::officer_vote_data),
        )
        // Authentication
        .route("/login", post(auth::login))
        .route("/login-mobile", post(auth::login_mobile))
}

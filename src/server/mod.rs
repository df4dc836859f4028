pub mod app;
pub mod handlers;
pub mod middleware;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::database::connection::{establish_connection, get_database_url, setup_database};
use crate::database::seed_data;
use app::{AppState, ServerSettings};
use middleware::RequestLimiter;

pub struct ServerConfig {
    pub port: u16,
    pub database_path: String,
    pub cors_origin: Option<String>,
    pub max_concurrent_requests: usize,
    pub public_dir: PathBuf,
    pub jwt_secret: String,
    pub seed: bool,
}

pub async fn start_server(config: ServerConfig) -> Result<()> {
    let database_url = get_database_url(Some(&config.database_path));
    let db = establish_connection(&database_url).await?;

    setup_database(&db).await?;
    info!("Database migrations completed");

    if config.seed {
        seed_data::seed_example_data(&db).await?;
        info!("Seed data applied");
    }

    let state = AppState {
        db,
        limiter: Arc::new(RequestLimiter::new(config.max_concurrent_requests)),
        settings: Arc::new(ServerSettings {
            jwt_secret: config.jwt_secret,
            public_dir: config.public_dir,
        }),
    };

    let app = app::create_app(state, config.cors_origin.as_deref()).await?;

    log_routes();

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    info!("Server running on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}

fn log_routes() {
    info!("API Endpoints:");
    info!("  /health                     - Health check");
    info!("  /branch_offices             - Branch office CRUD");
    info!("  /users                      - User CRUD");
    info!("  /branch_counters            - Counter assignments");
    info!("  /company_profiles           - Company profile");
    info!("  /voted-user/:user_id        - Officer feedback voting");
    info!("  /dashboard/*                - Aggregate counters");
    info!("  /login, /login-mobile       - Authentication");
    info!("  /images, /assets            - Uploaded files");
}

//! API integration tests
//!
//! Tests for the REST endpoints, the error-status mapping and the
//! request admission gate.

use std::sync::Arc;

use anyhow::Result;
use axum::http::StatusCode;
use axum_test::TestServer;
use branchdesk::database::entities::user_feedback_history;
use branchdesk::database::{seed_data, setup_database};
use branchdesk::server::app::{create_app, AppState, ServerSettings};
use branchdesk::server::middleware::RequestLimiter;
use branchdesk::services::{CreateUser, UserService};
use sea_orm::{Database, EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use tempfile::{NamedTempFile, TempDir};

struct TestContext {
    server: TestServer,
    state: AppState,
    _db_file: NamedTempFile,
    _public_dir: TempDir,
}

async fn setup_test_server_with_cap(max_concurrent: usize) -> Result<TestContext> {
    let db_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", db_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    let public_dir = TempDir::new()?;
    let state = AppState {
        db,
        limiter: Arc::new(RequestLimiter::new(max_concurrent)),
        settings: Arc::new(ServerSettings {
            jwt_secret: "test-secret".to_string(),
            public_dir: public_dir.path().to_path_buf(),
        }),
    };

    let app = create_app(state.clone(), Some("*")).await?;
    let server = TestServer::new(app)?;

    Ok(TestContext {
        server,
        state,
        _db_file: db_file,
        _public_dir: public_dir,
    })
}

async fn setup_test_server() -> Result<TestContext> {
    // Generous cap so ordinary tests never trip the admission gate
    setup_test_server_with_cap(16).await
}

async fn create_branch_via_api(ctx: &TestContext, name: &str) -> Result<i32> {
    let response = ctx
        .server
        .post("/branch_offices")
        .json(&json!({
            "name": name,
            "address": "1 Main Street",
            "total_counter": 4
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let list: Value = ctx.server.get("/branch_offices/option-list").await.json();
    let id = list
        .as_array()
        .and_then(|offices| {
            offices
                .iter()
                .find(|office| office["name"] == name)
                .and_then(|office| office["id"].as_i64())
        })
        .expect("created branch should be listed");
    Ok(id as i32)
}

async fn create_officer(ctx: &TestContext, name: &str, email: &str, branch_id: i32) -> Result<i32> {
    let officer = UserService::new(ctx.state.db.clone())
        .create_user(CreateUser {
            full_name: name.to_string(),
            email: email.to_string(),
            password: "secret1".to_string(),
            role: "officer".to_string(),
            branch_id: Some(branch_id),
            image: None,
        })
        .await?;
    Ok(officer.id)
}

#[tokio::test]
async fn test_health_endpoint() -> Result<()> {
    let ctx = setup_test_server().await?;

    let response = ctx.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["service"], "branchdesk");
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_branch_offices_crud_api() -> Result<()> {
    let ctx = setup_test_server().await?;

    let id = create_branch_via_api(&ctx, "Downtown").await?;

    // List with pagination envelope
    let response = ctx.server.get("/branch_offices").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 5);
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["branch_offices"][0]["name"], "Downtown");

    // Get one
    let response = ctx.server.get(&format!("/branch_offices/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["name"], "Downtown");
    assert_eq!(body["total_counter"], 4);

    // Update
    let response = ctx
        .server
        .put(&format!("/branch_offices/{}", id))
        .json(&json!({
            "name": "Downtown East",
            "address": "2 Main Street",
            "total_counter": 6
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = ctx.server.get(&format!("/branch_offices/{}", id)).await;
    let body: Value = response.json();
    assert_eq!(body["name"], "Downtown East");
    assert_eq!(body["total_counter"], 6);

    // Delete, then the branch is gone
    let response = ctx.server.delete(&format!("/branch_offices/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let response = ctx.server.get(&format!("/branch_offices/{}", id)).await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_branch_office_validation_errors() -> Result<()> {
    let ctx = setup_test_server().await?;

    let response = ctx
        .server
        .post("/branch_offices")
        .json(&json!({
            "name": "No Counters",
            "address": "1 Main Street",
            "total_counter": 0
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());

    Ok(())
}

#[tokio::test]
async fn test_vote_endpoint_updates_dashboard() -> Result<()> {
    let ctx = setup_test_server().await?;
    let branch_id = create_branch_via_api(&ctx, "Central").await?;
    let officer_id = create_officer(&ctx, "Amira Hassan", "amira@example.com", branch_id).await?;

    // Record a like
    let response = ctx
        .server
        .post(&format!("/voted-user/{}", officer_id))
        .json(&json!({ "vote_type": "like" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // Global aggregate moved
    let body: Value = ctx.server.get("/dashboard/total-data").await.json();
    assert_eq!(body["total_likes"], 1);
    assert_eq!(body["total_voted"], 1);
    assert_eq!(body["total_officer"], 1);

    // Branch aggregate moved
    let body: Value = ctx
        .server
        .get(&format!("/dashboard/graph-data/{}", branch_id))
        .await
        .json();
    assert_eq!(body["total_likes"], 1);
    assert_eq!(body["branch_id"], branch_id);

    // Officer ranking includes the subject
    let body: Value = ctx.server.get("/dashboard/vote-data-officer").await.json();
    assert_eq!(body["officers"][0]["full_name"], "Amira Hassan");
    assert_eq!(body["officers"][0]["likes"], 1);

    // Branch list is exposed too
    let body: Value = ctx.server.get("/dashboard/total-vote-office").await.json();
    assert_eq!(body[0]["name_office"], "Central");
    assert_eq!(body[0]["total_likes"], 1);

    Ok(())
}

#[tokio::test]
async fn test_invalid_vote_type_writes_nothing() -> Result<()> {
    let ctx = setup_test_server().await?;
    let branch_id = create_branch_via_api(&ctx, "Central").await?;
    let officer_id = create_officer(&ctx, "Omar Said", "omar@example.com", branch_id).await?;

    let response = ctx
        .server
        .post(&format!("/voted-user/{}", officer_id))
        .json(&json!({ "vote_type": "maybe" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let history = user_feedback_history::Entity::find()
        .count(&ctx.state.db)
        .await?;
    assert_eq!(history, 0);

    let body: Value = ctx.server.get("/dashboard/total-data").await.json();
    assert_eq!(body["total_voted"], 0);

    Ok(())
}

#[tokio::test]
async fn test_vote_for_unknown_user_is_404() -> Result<()> {
    let ctx = setup_test_server().await?;
    create_branch_via_api(&ctx, "Central").await?;

    let response = ctx
        .server
        .post("/voted-user/999")
        .json(&json!({ "vote_type": "like" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_branch_counters_api() -> Result<()> {
    let ctx = setup_test_server().await?;
    let branch_id = create_branch_via_api(&ctx, "Harbor").await?;
    let officer_id = create_officer(&ctx, "Counter Officer", "counter@example.com", branch_id).await?;

    let response = ctx
        .server
        .post("/branch_counters")
        .json(&json!({
            "counter_location": "Counter 1",
            "user_id": officer_id,
            "branch_id": branch_id
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let body: Value = ctx
        .server
        .get(&format!("/branch_counters/{}", branch_id))
        .await
        .json();
    assert_eq!(body["name_branch"], "Harbor");
    assert_eq!(body["total_counter"], 4);
    assert_eq!(body["list_counter"][0]["counter_location"], "Counter 1");
    assert_eq!(body["list_counter"][0]["full_name"], "Counter Officer");

    let counter_id = body["list_counter"][0]["id"].as_i64().expect("counter id");
    let response = ctx
        .server
        .delete(&format!("/branch_counters/{}", counter_id))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_company_profile_api() -> Result<()> {
    let ctx = setup_test_server().await?;
    seed_data::seed_example_data(&ctx.state.db).await?;

    let response = ctx.server.get("/company_profiles").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["name"], "Sample Company");
    assert_eq!(body["logo"], "/assets/application_logo.png");

    Ok(())
}

#[tokio::test]
async fn test_login_flow() -> Result<()> {
    let ctx = setup_test_server().await?;
    seed_data::seed_example_data(&ctx.state.db).await?;

    // Correct credentials for a back-office role
    let response = ctx
        .server
        .post("/login")
        .json(&json!({
            "email": "administrator@example.com",
            "password": "admin12345"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert!(body["token"].as_str().is_some_and(|token| !token.is_empty()));
    assert_eq!(body["user"]["email"], "administrator@example.com");
    assert!(body["user"]["password"].is_null());

    // Wrong password
    let response = ctx
        .server
        .post("/login")
        .json(&json!({
            "email": "administrator@example.com",
            "password": "wrong"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    // Officers cannot use the dashboard login
    let branch_id = create_branch_via_api(&ctx, "Central").await?;
    create_officer(&ctx, "Login Officer", "login@example.com", branch_id).await?;
    let response = ctx
        .server
        .post("/login")
        .json(&json!({
            "email": "login@example.com",
            "password": "secret1"
        }))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_admission_gate_rejects_above_cap() -> Result<()> {
    let ctx = setup_test_server_with_cap(2).await?;

    // Occupy both slots as if two requests were in flight
    let first = ctx.state.limiter.clone().try_acquire().expect("first slot");
    let _second = ctx.state.limiter.clone().try_acquire().expect("second slot");

    let response = ctx.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::TOO_MANY_REQUESTS);

    // Releasing one slot admits the next request
    drop(first);
    let response = ctx.server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    Ok(())
}

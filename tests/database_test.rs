//! Database functionality tests
//!
//! Tests for migrations, entity operations and the seeded baseline rows.

use anyhow::Result;
use branchdesk::database::entities::*;
use branchdesk::database::{seed_data, setup_database};
use branchdesk::services::{BranchOfficeInput, BranchOfficeService, CreateUser, UserService};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Database, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tempfile::NamedTempFile;

/// Create a test database connection with migrations
async fn setup_test_db() -> Result<(DatabaseConnection, NamedTempFile)> {
    let temp_file = NamedTempFile::new()?;
    let db_url = format!("sqlite://{}?mode=rwc", temp_file.path().display());

    let db = Database::connect(&db_url).await?;
    setup_database(&db).await?;

    Ok((db, temp_file))
}

#[tokio::test]
async fn test_database_migrations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    // Verify all tables exist by attempting to query them
    assert_eq!(users::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(branch_offices::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(branch_counters::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(company_profiles::Entity::find().all(&db).await?.len(), 0);
    assert_eq!(
        user_feedback_history::Entity::find().all(&db).await?.len(),
        0
    );
    assert_eq!(total_data_branch::Entity::find().all(&db).await?.len(), 0);

    Ok(())
}

#[tokio::test]
async fn test_setup_creates_global_aggregate_row() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let totals = total_data::Entity::find_by_id(total_data::GLOBAL_ROW_ID)
        .one(&db)
        .await?
        .expect("global aggregate row should exist after setup");

    assert_eq!(totals.total_likes, 0);
    assert_eq!(totals.total_dislikes, 0);
    assert_eq!(totals.total_officer, 0);
    assert_eq!(totals.total_voted, 0);

    // Running setup again must not fail or duplicate the row
    setup_database(&db).await?;
    assert_eq!(total_data::Entity::find().count(&db).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_user_crud_operations() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let now = Utc::now();
    let user = users::ActiveModel {
        full_name: Set("Test Officer".to_string()),
        email: Set("officer@example.com".to_string()),
        password: Set("hashed".to_string()),
        role: Set("officer".to_string()),
        likes: Set(0),
        dislikes: Set(0),
        image: Set(None),
        branch_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    assert_eq!(user.full_name, "Test Officer");

    // Read
    let found = users::Entity::find_by_id(user.id)
        .one(&db)
        .await?
        .expect("user should exist");
    assert_eq!(found.email, "officer@example.com");

    // Update
    let mut update: users::ActiveModel = found.into();
    update.full_name = Set("Renamed Officer".to_string());
    let updated = update.update(&db).await?;
    assert_eq!(updated.full_name, "Renamed Officer");

    // Delete
    users::Entity::delete_by_id(updated.id).exec(&db).await?;
    assert!(users::Entity::find_by_id(updated.id).one(&db).await?.is_none());

    Ok(())
}

#[tokio::test]
async fn test_duplicate_email_is_rejected() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let service = UserService::new(db.clone());
    service
        .create_user(CreateUser {
            full_name: "First User".to_string(),
            email: "taken@example.com".to_string(),
            password: "secret1".to_string(),
            role: "supervisor".to_string(),
            branch_id: None,
            image: None,
        })
        .await?;

    let result = service
        .create_user(CreateUser {
            full_name: "Second User".to_string(),
            email: "taken@example.com".to_string(),
            password: "secret1".to_string(),
            role: "supervisor".to_string(),
            branch_id: None,
            image: None,
        })
        .await;

    assert!(matches!(
        result,
        Err(branchdesk::errors::UserError::EmailTaken)
    ));
    assert_eq!(users::Entity::find().count(&db).await?, 1);

    Ok(())
}

#[tokio::test]
async fn test_branch_office_creates_aggregate_row() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let service = BranchOfficeService::new(db.clone());
    let office = service
        .create_branch_office(BranchOfficeInput {
            name: "Downtown".to_string(),
            address: "1 Main Street".to_string(),
            total_counter: 4,
        })
        .await?;

    let aggregate = total_data_branch::Entity::find()
        .filter(total_data_branch::Column::BranchId.eq(office.id))
        .one(&db)
        .await?
        .expect("aggregate row should be created with the branch");
    assert_eq!(aggregate.name_office, "Downtown");
    assert_eq!(aggregate.total_likes, 0);

    // Renaming the branch keeps the denormalized office name in sync
    service
        .update_branch_office(
            office.id,
            BranchOfficeInput {
                name: "Downtown East".to_string(),
                address: "1 Main Street".to_string(),
                total_counter: 4,
            },
        )
        .await?;

    let aggregate = total_data_branch::Entity::find()
        .filter(total_data_branch::Column::BranchId.eq(office.id))
        .one(&db)
        .await?
        .expect("aggregate row should survive a rename");
    assert_eq!(aggregate.name_office, "Downtown East");

    Ok(())
}

#[tokio::test]
async fn test_branch_delete_keeps_staff() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    let office = BranchOfficeService::new(db.clone())
        .create_branch_office(BranchOfficeInput {
            name: "Airport".to_string(),
            address: "Terminal 2".to_string(),
            total_counter: 2,
        })
        .await?;

    let user_service = UserService::new(db.clone());
    let officer = user_service
        .create_user(CreateUser {
            full_name: "Airport Officer".to_string(),
            email: "airport@example.com".to_string(),
            password: "secret1".to_string(),
            role: "officer".to_string(),
            branch_id: Some(office.id),
            image: None,
        })
        .await?;

    BranchOfficeService::new(db.clone())
        .delete_branch_office(office.id)
        .await?;

    // The aggregate row cascades away, the officer stays with no branch
    assert!(total_data_branch::Entity::find()
        .filter(total_data_branch::Column::BranchId.eq(office.id))
        .one(&db)
        .await?
        .is_none());

    let officer = users::Entity::find_by_id(officer.id)
        .one(&db)
        .await?
        .expect("officer should survive branch deletion");
    assert_eq!(officer.branch_id, None);

    let totals = total_data::Entity::find_by_id(total_data::GLOBAL_ROW_ID)
        .one(&db)
        .await?
        .expect("global aggregate row");
    assert_eq!(totals.total_officer, 1);

    Ok(())
}

#[tokio::test]
async fn test_seed_example_data_is_idempotent() -> Result<()> {
    let (db, _temp_file) = setup_test_db().await?;

    seed_data::seed_example_data(&db).await?;
    seed_data::seed_example_data(&db).await?;

    let admins = users::Entity::find()
        .filter(users::Column::Role.eq("administrator"))
        .count(&db)
        .await?;
    assert_eq!(admins, 1);

    let profiles = company_profiles::Entity::find().count(&db).await?;
    assert_eq!(profiles, 1);

    Ok(())
}

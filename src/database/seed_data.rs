use anyhow::Result;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use tracing::info;

use crate::database::entities::{company_profiles, total_data, users};
use crate::services::auth_service::AuthService;

/// Insert the `total_data` singleton if it is missing.
///
/// The vote and user services update this row with relative increments and
/// assume it exists, so it is created right after migrations rather than by
/// the optional seeder.
pub async fn ensure_base_rows(db: &DatabaseConnection) -> Result<(), DbErr> {
    let existing = total_data::Entity::find_by_id(total_data::GLOBAL_ROW_ID)
        .one(db)
        .await?;
    if existing.is_some() {
        return Ok(());
    }

    let now = Utc::now();
    total_data::ActiveModel {
        id: Set(total_data::GLOBAL_ROW_ID),
        total_likes: Set(0),
        total_dislikes: Set(0),
        total_officer: Set(0),
        total_voted: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await?;

    info!("Created global aggregate row");
    Ok(())
}

/// Seed an administrator account and a sample company profile.
///
/// Both steps are idempotent: existing data is left untouched.
pub async fn seed_example_data(db: &DatabaseConnection) -> Result<()> {
    seed_administrator(db).await?;
    seed_company_profile(db).await?;
    Ok(())
}

async fn seed_administrator(db: &DatabaseConnection) -> Result<()> {
    let existing = users::Entity::find()
        .filter(users::Column::Role.eq("administrator"))
        .one(db)
        .await?;
    if existing.is_some() {
        info!("Administrator account already exists, skipping");
        return Ok(());
    }

    let now = Utc::now();
    users::ActiveModel {
        full_name: Set("Administrator".to_string()),
        email: Set("administrator@example.com".to_string()),
        password: Set(AuthService::hash_password("admin12345")?),
        role: Set("administrator".to_string()),
        likes: Set(0),
        dislikes: Set(0),
        image: Set(None),
        branch_id: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Seeded administrator account");
    Ok(())
}

async fn seed_company_profile(db: &DatabaseConnection) -> Result<()> {
    let count = company_profiles::Entity::find().count(db).await?;
    if count > 0 {
        info!("Company profile already exists, skipping");
        return Ok(());
    }

    let now = Utc::now();
    company_profiles::ActiveModel {
        name: Set("Sample Company".to_string()),
        logo: Set(Some("application_logo.png".to_string())),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Seeded company profile");
    Ok(())
}

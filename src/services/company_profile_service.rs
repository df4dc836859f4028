use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::database::entities::company_profiles;
use crate::errors::ServiceError;

/// Id of the single company profile row.
const PROFILE_ID: i32 = 1;

#[derive(Clone)]
pub struct CompanyProfileService {
    db: DatabaseConnection,
}

impl CompanyProfileService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn get_profile(&self) -> Result<company_profiles::Model, ServiceError> {
        company_profiles::Entity::find_by_id(PROFILE_ID)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Company profile", PROFILE_ID))
    }

    /// Update the company name; `logo` of `None` keeps the stored file name.
    pub async fn update_profile(
        &self,
        name: String,
        logo: Option<String>,
    ) -> Result<company_profiles::Model, ServiceError> {
        if name.trim().is_empty() {
            return Err(ServiceError::validation("company name cannot be empty"));
        }

        let stored = self.get_profile().await?;

        let mut active: company_profiles::ActiveModel = stored.into();
        active.name = Set(name);
        if let Some(logo) = logo {
            active.logo = Set(Some(logo));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(updated)
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::debug;

use crate::database::entities::{branch_counters, users};
use crate::errors::ServiceError;
use crate::services::validation::ValidationService;

pub struct CreateBranchCounter {
    pub counter_location: String,
    pub user_id: i32,
    pub branch_id: i32,
}

/// Counter assignment CRUD.
#[derive(Clone)]
pub struct BranchCounterService {
    db: DatabaseConnection,
}

impl BranchCounterService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counters of one branch, each with the officer staffing it.
    pub async fn list_counters_by_branch(
        &self,
        branch_id: i32,
    ) -> Result<Vec<(branch_counters::Model, Option<users::Model>)>, ServiceError> {
        let counters = branch_counters::Entity::find()
            .filter(branch_counters::Column::BranchId.eq(branch_id))
            .order_by_asc(branch_counters::Column::Id)
            .find_also_related(users::Entity)
            .all(&self.db)
            .await?;
        Ok(counters)
    }

    pub async fn create_counter(
        &self,
        input: CreateBranchCounter,
    ) -> Result<branch_counters::Model, ServiceError> {
        ValidationService::validate_branch_counter(
            &input.counter_location,
            input.user_id,
            input.branch_id,
        )
        .map_err(|e| ServiceError::validation(e.to_string()))?;

        let now = Utc::now();
        let counter = branch_counters::ActiveModel {
            counter_location: Set(input.counter_location),
            user_id: Set(input.user_id),
            branch_id: Set(input.branch_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        debug!(counter_id = counter.id, "Created branch counter");
        Ok(counter)
    }

    pub async fn delete_counter(&self, id: i32) -> Result<(), ServiceError> {
        let result = branch_counters::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Branch counter", id));
        }

        Ok(())
    }
}

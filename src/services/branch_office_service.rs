use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use crate::database::entities::{branch_offices, total_data_branch};
use crate::errors::ServiceError;
use crate::services::validation::ValidationService;

/// Fields for creating or updating a branch office.
pub struct BranchOfficeInput {
    pub name: String,
    pub address: String,
    pub total_counter: i32,
}

/// Branch office CRUD.
///
/// A branch office and its aggregate counter row are created and renamed
/// together; the aggregate row is removed by the store when the branch is
/// deleted.
#[derive(Clone)]
pub struct BranchOfficeService {
    db: DatabaseConnection,
}

impl BranchOfficeService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_branch_offices(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<branch_offices::Model>, ServiceError> {
        let offices = branch_offices::Entity::find()
            .order_by_asc(branch_offices::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(offices)
    }

    /// All branch offices, for select/option lists.
    pub async fn list_all_branch_offices(&self) -> Result<Vec<branch_offices::Model>, ServiceError> {
        let offices = branch_offices::Entity::find()
            .order_by_asc(branch_offices::Column::Id)
            .all(&self.db)
            .await?;
        Ok(offices)
    }

    pub async fn count_branch_offices(&self) -> Result<u64, ServiceError> {
        let count = branch_offices::Entity::find().count(&self.db).await?;
        Ok(count)
    }

    pub async fn get_branch_office(&self, id: i32) -> Result<branch_offices::Model, ServiceError> {
        branch_offices::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Branch office", id))
    }

    /// Create a branch office together with its aggregate counter row.
    pub async fn create_branch_office(
        &self,
        input: BranchOfficeInput,
    ) -> Result<branch_offices::Model, ServiceError> {
        ValidationService::validate_branch_office(&input.name, &input.address, input.total_counter)
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let txn = self.db.begin().await?;

        let now = Utc::now();
        let office = branch_offices::ActiveModel {
            name: Set(input.name.clone()),
            address: Set(input.address),
            total_counter: Set(input.total_counter),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        total_data_branch::ActiveModel {
            name_office: Set(input.name),
            total_likes: Set(0),
            total_dislikes: Set(0),
            branch_id: Set(office.id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        txn.commit().await?;
        debug!(branch_id = office.id, "Created branch office");
        Ok(office)
    }

    /// Update a branch office and keep the denormalized office name on its
    /// aggregate row in sync.
    pub async fn update_branch_office(
        &self,
        id: i32,
        input: BranchOfficeInput,
    ) -> Result<branch_offices::Model, ServiceError> {
        ValidationService::validate_branch_office(&input.name, &input.address, input.total_counter)
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        let txn = self.db.begin().await?;

        let stored = branch_offices::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::not_found("Branch office", id))?;

        let now = Utc::now();
        let mut active: branch_offices::ActiveModel = stored.into();
        active.name = Set(input.name.clone());
        active.address = Set(input.address);
        active.total_counter = Set(input.total_counter);
        active.updated_at = Set(now);
        let updated = active.update(&txn).await?;

        if let Some(aggregate) = total_data_branch::Entity::find()
            .filter(total_data_branch::Column::BranchId.eq(id))
            .one(&txn)
            .await?
        {
            let mut aggregate: total_data_branch::ActiveModel = aggregate.into();
            aggregate.name_office = Set(input.name);
            aggregate.updated_at = Set(now);
            aggregate.update(&txn).await?;
        }

        txn.commit().await?;
        Ok(updated)
    }

    pub async fn delete_branch_office(&self, id: i32) -> Result<(), ServiceError> {
        let result = branch_offices::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(ServiceError::not_found("Branch office", id));
        }

        debug!(branch_id = id, "Deleted branch office");
        Ok(())
    }
}

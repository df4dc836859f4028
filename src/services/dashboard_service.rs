use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::database::entities::{total_data, total_data_branch, users};
use crate::errors::ServiceError;
use crate::services::user_service::ROLE_OFFICER;

/// Read-only queries over the aggregate tables.
///
/// Nothing here mutates a counter; all writes go through the vote and user
/// services.
#[derive(Clone)]
pub struct DashboardService {
    db: DatabaseConnection,
}

impl DashboardService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The global aggregate row.
    pub async fn totals(&self) -> Result<total_data::Model, ServiceError> {
        total_data::Entity::find_by_id(total_data::GLOBAL_ROW_ID)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Global aggregate", total_data::GLOBAL_ROW_ID))
    }

    /// Per-branch aggregates, best-rated branches first.
    pub async fn branch_totals(&self) -> Result<Vec<total_data_branch::Model>, ServiceError> {
        let totals = total_data_branch::Entity::find()
            .order_by_desc(total_data_branch::Column::TotalLikes)
            .all(&self.db)
            .await?;
        Ok(totals)
    }

    /// The aggregate row of a single branch.
    pub async fn branch_totals_for(
        &self,
        branch_id: i32,
    ) -> Result<total_data_branch::Model, ServiceError> {
        total_data_branch::Entity::find()
            .filter(total_data_branch::Column::BranchId.eq(branch_id))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found("Branch aggregate", branch_id))
    }

    /// Officers ordered by likes, for the ranking widget.
    pub async fn top_officers(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<users::Model>, ServiceError> {
        let officers = users::Entity::find()
            .filter(users::Column::Role.eq(ROLE_OFFICER))
            .order_by_desc(users::Column::Likes)
            .limit(limit)
            .offset(offset)
            .all(&self.db)
            .await?;
        Ok(officers)
    }
}

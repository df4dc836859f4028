use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

use crate::database::entities::{total_data, users};
use crate::errors::UserError;
use crate::services::auth_service::AuthService;
use crate::services::validation::ValidationService;

pub const ROLE_OFFICER: &str = "officer";

/// Fields for a new user account.
pub struct CreateUser {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub branch_id: Option<i32>,
    pub image: Option<String>,
}

/// Fields for a user update. `password`/`image` of `None` keep the stored
/// values.
pub struct UpdateUser {
    pub full_name: String,
    pub email: String,
    pub password: Option<String>,
    pub role: String,
    pub branch_id: Option<i32>,
    pub image: Option<String>,
}

/// User account CRUD.
///
/// Every role-mutating write runs in a transaction that also adjusts the
/// global officer counter, so `total_data.total_officer` always equals the
/// live number of officer accounts. There is deliberately no bulk update
/// path around this service.
#[derive(Clone)]
pub struct UserService {
    db: DatabaseConnection,
}

impl UserService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_users(
        &self,
        limit: u64,
        offset: u64,
        role: Option<&str>,
    ) -> Result<Vec<users::Model>, UserError> {
        let mut query = users::Entity::find().order_by_asc(users::Column::Id);
        if let Some(role) = role {
            query = query.filter(users::Column::Role.eq(role));
        }

        let users = query.limit(limit).offset(offset).all(&self.db).await?;
        Ok(users)
    }

    pub async fn count_users(&self, role: Option<&str>) -> Result<u64, UserError> {
        let mut query = users::Entity::find();
        if let Some(role) = role {
            query = query.filter(users::Column::Role.eq(role));
        }

        let count = query.count(&self.db).await?;
        Ok(count)
    }

    pub async fn get_user(&self, id: i32) -> Result<users::Model, UserError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(UserError::NotFound(id))
    }

    pub async fn list_users_by_branch(&self, branch_id: i32) -> Result<Vec<users::Model>, UserError> {
        let users = users::Entity::find()
            .filter(users::Column::BranchId.eq(branch_id))
            .order_by_asc(users::Column::Id)
            .all(&self.db)
            .await?;
        Ok(users)
    }

    /// Create a user; an officer account also bumps the global officer
    /// counter in the same transaction.
    pub async fn create_user(&self, input: CreateUser) -> Result<users::Model, UserError> {
        ValidationService::validate_full_name(&input.full_name)
            .map_err(|e| UserError::validation(e.to_string()))?;
        ValidationService::validate_email(&input.email)
            .map_err(|e| UserError::validation(e.to_string()))?;
        ValidationService::validate_password(&input.password)
            .map_err(|e| UserError::validation(e.to_string()))?;
        ValidationService::validate_role(&input.role)
            .map_err(|e| UserError::validation(e.to_string()))?;

        let hashed = AuthService::hash_password(&input.password)
            .map_err(|e| UserError::Internal(e.to_string()))?;

        let txn = self.db.begin().await?;

        let now = Utc::now();
        let user = users::ActiveModel {
            full_name: Set(input.full_name),
            email: Set(input.email),
            password: Set(hashed),
            role: Set(input.role.clone()),
            likes: Set(0),
            dislikes: Set(0),
            image: Set(input.image),
            branch_id: Set(input.branch_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if input.role == ROLE_OFFICER {
            Self::adjust_officer_count(&txn, 1).await?;
        }

        txn.commit().await?;
        debug!(user_id = user.id, role = %user.role, "Created user");
        Ok(user)
    }

    /// Update a user. The stored role is read inside the same transaction
    /// as the write, so a concurrent role change on the row cannot desync
    /// the officer counter.
    pub async fn update_user(&self, id: i32, input: UpdateUser) -> Result<users::Model, UserError> {
        ValidationService::validate_full_name(&input.full_name)
            .map_err(|e| UserError::validation(e.to_string()))?;
        ValidationService::validate_email(&input.email)
            .map_err(|e| UserError::validation(e.to_string()))?;
        ValidationService::validate_role(&input.role)
            .map_err(|e| UserError::validation(e.to_string()))?;
        if let Some(password) = &input.password {
            ValidationService::validate_password(password)
                .map_err(|e| UserError::validation(e.to_string()))?;
        }

        let hashed = match &input.password {
            Some(password) => Some(
                AuthService::hash_password(password)
                    .map_err(|e| UserError::Internal(e.to_string()))?,
            ),
            None => None,
        };

        let txn = self.db.begin().await?;

        let stored = users::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(UserError::NotFound(id))?;

        let was_officer = stored.role == ROLE_OFFICER;
        let is_officer = input.role == ROLE_OFFICER;

        let mut active: users::ActiveModel = stored.into();
        active.full_name = Set(input.full_name);
        active.email = Set(input.email);
        active.role = Set(input.role);
        active.branch_id = Set(input.branch_id);
        if let Some(hashed) = hashed {
            active.password = Set(hashed);
        }
        if let Some(image) = input.image {
            active.image = Set(Some(image));
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&txn).await?;

        match (was_officer, is_officer) {
            (false, true) => Self::adjust_officer_count(&txn, 1).await?,
            (true, false) => Self::adjust_officer_count(&txn, -1).await?,
            _ => {}
        }

        txn.commit().await?;
        debug!(user_id = updated.id, "Updated user");
        Ok(updated)
    }

    /// Delete a user; deleting an officer decrements the global officer
    /// counter in the same transaction. Returns the deleted row so the
    /// caller can clean up the profile image.
    pub async fn delete_user(&self, id: i32) -> Result<users::Model, UserError> {
        let txn = self.db.begin().await?;

        let stored = users::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(UserError::NotFound(id))?;

        users::Entity::delete_by_id(stored.id).exec(&txn).await?;

        if stored.role == ROLE_OFFICER {
            Self::adjust_officer_count(&txn, -1).await?;
        }

        txn.commit().await?;
        debug!(user_id = stored.id, "Deleted user");
        Ok(stored)
    }

    async fn adjust_officer_count(txn: &DatabaseTransaction, delta: i32) -> Result<(), UserError> {
        total_data::Entity::update_many()
            .col_expr(
                total_data::Column::TotalOfficer,
                Expr::col(total_data::Column::TotalOfficer).add(delta),
            )
            .col_expr(total_data::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(total_data::Column::Id.eq(total_data::GLOBAL_ROW_ID))
            .exec(txn)
            .await?;
        Ok(())
    }
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only audit row for one vote event.
///
/// Exactly one of `likes`/`dislikes` is 1, the other 0. The officer name is
/// denormalized at the moment of voting so the history survives renames.
/// Rows are never updated or deleted by the application.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_feedback_history")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub likes: i32,
    pub dislikes: i32,
    pub officer_name: String,
    pub user_id: i32,
    pub branch_id: i32,
    pub created_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id",
        on_delete = "Cascade"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::branch_offices::Entity",
        from = "Column::BranchId",
        to = "super::branch_offices::Column::Id",
        on_delete = "Cascade"
    )]
    BranchOffices,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::branch_offices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BranchOffices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

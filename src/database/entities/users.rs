use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Staff account: administrators, branch admins, supervisors and officers.
///
/// The `likes`/`dislikes` columns are running totals owned by the vote
/// recording path; nothing else may write them.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub full_name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub password: String,
    pub role: String,
    pub likes: i32,
    pub dislikes: i32,
    pub image: Option<String>,
    pub branch_id: Option<i32>,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::branch_offices::Entity",
        from = "Column::BranchId",
        to = "super::branch_offices::Column::Id"
    )]
    BranchOffices,
    #[sea_orm(has_many = "super::branch_counters::Entity")]
    BranchCounters,
    #[sea_orm(has_many = "super::user_feedback_history::Entity")]
    UserFeedbackHistory,
}

impl Related<super::branch_offices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BranchOffices.def()
    }
}

impl Related<super::branch_counters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BranchCounters.def()
    }
}

impl Related<super::user_feedback_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserFeedbackHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Per-branch aggregate counters, one row per branch office.
///
/// Created in the same transaction as the branch office it mirrors.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "total_data_branch")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name_office: String,
    pub total_likes: i32,
    pub total_dislikes: i32,
    #[sea_orm(unique)]
    pub branch_id: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::branch_offices::Entity",
        from = "Column::BranchId",
        to = "super::branch_offices::Column::Id",
        on_delete = "Cascade"
    )]
    BranchOffices,
}

impl Related<super::branch_offices::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BranchOffices.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Physical counter position inside a branch, staffed by one officer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branch_counters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub counter_location: String,
    pub user_id: i32,
    pub branch_id: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
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

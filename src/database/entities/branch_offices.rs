use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "branch_offices")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub address: String,
    pub total_counter: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::users::Entity")]
    Users,
    #[sea_orm(has_many = "super::branch_counters::Entity")]
    BranchCounters,
    #[sea_orm(has_one = "super::total_data_branch::Entity")]
    TotalDataBranch,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::branch_counters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BranchCounters.def()
    }
}

impl Related<super::total_data_branch::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TotalDataBranch.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

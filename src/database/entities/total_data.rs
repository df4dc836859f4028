use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Global aggregate counters, a single row with id 1.
///
/// Every vote bumps `total_likes`/`total_dislikes` and `total_voted`;
/// `total_officer` tracks the live number of officer accounts. All writes
/// go through the vote and user services as relative increments.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "total_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,
    pub total_likes: i32,
    pub total_dislikes: i32,
    pub total_officer: i32,
    pub total_voted: i32,
    pub created_at: ChronoDateTimeUtc,
    pub updated_at: ChronoDateTimeUtc,
}

/// Id of the singleton row.
pub const GLOBAL_ROW_ID: i32 = 1;

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

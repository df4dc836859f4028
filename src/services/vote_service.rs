use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::debug;

use crate::database::entities::{total_data, total_data_branch, user_feedback_history, users};
use crate::errors::VoteError;

/// Direction of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteType {
    Like,
    Dislike,
}

impl FromStr for VoteType {
    type Err = VoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "dislike" => Ok(Self::Dislike),
            other => Err(VoteError::InvalidVoteType(other.to_string())),
        }
    }
}

impl fmt::Display for VoteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Like => write!(f, "like"),
            Self::Dislike => write!(f, "dislike"),
        }
    }
}

/// Records votes and keeps the denormalized counters consistent.
///
/// This is the only place that writes the per-user, per-branch and global
/// vote counters. Each call applies four writes in one transaction:
/// the subject's counter, the audit row, the global aggregate and the
/// branch aggregate. The transaction handle rolls back on drop, so any
/// early return leaves the store untouched.
#[derive(Clone)]
pub struct VoteService {
    db: DatabaseConnection,
}

impl VoteService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Record one like/dislike for the given user.
    ///
    /// Counter updates are relative SQL expressions (`likes = likes + 1`);
    /// the store serializes concurrent increments on the row, so votes are
    /// never lost to read-modify-write races. There is no idempotency key:
    /// a retry after a timed-out request counts twice.
    pub async fn record_vote(&self, vote_type: VoteType, user_id: i32) -> Result<(), VoteError> {
        let txn = self.db.begin().await?;

        // Bump the subject's counter first. Writing before reading takes the
        // write lock up front, and the affected-row count doubles as the
        // existence check.
        let counter = match vote_type {
            VoteType::Like => users::Column::Likes,
            VoteType::Dislike => users::Column::Dislikes,
        };
        let updated = users::Entity::update_many()
            .col_expr(counter, Expr::col(counter).add(1))
            .col_expr(users::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(users::Column::Id.eq(user_id))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(VoteError::SubjectNotFound(user_id));
        }

        // The audit row denormalizes the subject's name and branch as they
        // are at the moment of voting.
        let subject = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or(VoteError::SubjectNotFound(user_id))?;
        let branch_id = subject.branch_id.ok_or_else(|| {
            VoteError::ConstraintViolation(format!("user {} has no branch affiliation", user_id))
        })?;

        let (likes, dislikes) = match vote_type {
            VoteType::Like => (1, 0),
            VoteType::Dislike => (0, 1),
        };
        user_feedback_history::ActiveModel {
            likes: Set(likes),
            dislikes: Set(dislikes),
            officer_name: Set(subject.full_name.clone()),
            user_id: Set(subject.id),
            branch_id: Set(branch_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        let global_counter = match vote_type {
            VoteType::Like => total_data::Column::TotalLikes,
            VoteType::Dislike => total_data::Column::TotalDislikes,
        };
        let updated = total_data::Entity::update_many()
            .col_expr(global_counter, Expr::col(global_counter).add(1))
            .col_expr(
                total_data::Column::TotalVoted,
                Expr::col(total_data::Column::TotalVoted).add(1),
            )
            .col_expr(total_data::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(total_data::Column::Id.eq(total_data::GLOBAL_ROW_ID))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(VoteError::Database(DbErr::Custom(
                "global aggregate row is missing".to_string(),
            )));
        }

        let branch_counter = match vote_type {
            VoteType::Like => total_data_branch::Column::TotalLikes,
            VoteType::Dislike => total_data_branch::Column::TotalDislikes,
        };
        let updated = total_data_branch::Entity::update_many()
            .col_expr(branch_counter, Expr::col(branch_counter).add(1))
            .col_expr(
                total_data_branch::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(total_data_branch::Column::BranchId.eq(branch_id))
            .exec(&txn)
            .await?;
        if updated.rows_affected == 0 {
            return Err(VoteError::ConstraintViolation(format!(
                "no aggregate row for branch {}",
                branch_id
            )));
        }

        txn.commit().await?;
        debug!(user_id, vote = %vote_type, "Recorded vote");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_vote_types() {
        assert_eq!("like".parse::<VoteType>().unwrap(), VoteType::Like);
        assert_eq!("dislike".parse::<VoteType>().unwrap(), VoteType::Dislike);
    }

    #[test]
    fn rejects_unknown_vote_type() {
        let err = "maybe".parse::<VoteType>().unwrap_err();
        assert!(matches!(err, VoteError::InvalidVoteType(v) if v == "maybe"));
    }

    #[test]
    fn vote_type_display_matches_wire_format() {
        assert_eq!(VoteType::Like.to_string(), "like");
        assert_eq!(VoteType::Dislike.to_string(), "dislike");
    }
}

//! Error type for the vote recording path.

use sea_orm::DbErr;
use thiserror::Error;

use super::common::{is_connection_error, is_foreign_key_violation};

/// Failures of a single vote event.
///
/// A vote either commits all of its writes (subject counter, audit row,
/// global and branch aggregates) or none of them; every variant here means
/// the transaction rolled back and nothing was recorded.
#[derive(Error, Debug)]
pub enum VoteError {
    /// Vote type other than `like`/`dislike`; rejected before any store
    /// interaction.
    #[error("invalid vote type '{0}', expected 'like' or 'dislike'")]
    InvalidVoteType(String),

    /// The rated user does not exist.
    #[error("user {0} not found")]
    SubjectNotFound(i32),

    /// The vote references data that cannot be recorded against, e.g. a
    /// subject without a branch affiliation or a branch with no aggregate
    /// row.
    #[error("vote rejected: {0}")]
    ConstraintViolation(String),

    /// The store could not be reached. The vote was not recorded; callers
    /// must not blindly retry, a request that timed out after commit would
    /// be counted twice.
    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl VoteError {
    /// HTTP status code the request layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::InvalidVoteType(_) => 400,
            Self::SubjectNotFound(_) => 404,
            Self::ConstraintViolation(_) => 400,
            Self::StoreUnavailable(_) => 503,
            Self::Database(_) => 500,
        }
    }
}

impl From<DbErr> for VoteError {
    fn from(err: DbErr) -> Self {
        if is_connection_error(&err) {
            Self::StoreUnavailable(err.to_string())
        } else if is_foreign_key_violation(&err) {
            Self::ConstraintViolation(err.to_string())
        } else {
            Self::Database(err)
        }
    }
}

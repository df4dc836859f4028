//! Error type for user account operations.

use sea_orm::DbErr;
use thiserror::Error;

use super::common::{is_connection_error, is_unique_violation};

#[derive(Error, Debug)]
pub enum UserError {
    #[error("user {0} not found")]
    NotFound(i32),

    #[error("email already in use")]
    EmailTaken,

    #[error("{0}")]
    Validation(String),

    #[error("store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("{0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl UserError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status code the request layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound(_) => 404,
            Self::EmailTaken => 409,
            Self::Validation(_) => 400,
            Self::StoreUnavailable(_) => 503,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
        }
    }
}

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        if is_connection_error(&err) {
            Self::StoreUnavailable(err.to_string())
        } else if is_unique_violation(&err) {
            // The only unique column on users is the email address.
            Self::EmailTaken
        } else {
            Self::Database(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    #[test]
    fn unique_violation_becomes_email_taken() {
        let err = UserError::from(DbErr::Exec(RuntimeErr::Internal(
            "UNIQUE constraint failed: users.email".to_string(),
        )));
        assert!(matches!(err, UserError::EmailTaken));
        assert_eq!(err.http_status(), 409);
    }

    #[test]
    fn validation_is_client_error() {
        assert_eq!(UserError::validation("bad role").http_status(), 400);
    }
}

//! Shared service error type and database error categorization.

use sea_orm::DbErr;
use thiserror::Error;

/// Errors surfaced by the plain CRUD services (branch offices, counters,
/// company profile, dashboard, login).
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: i32 },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    /// The store could not be reached; retrying later may succeed.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("{0}")]
    Internal(String),

    #[error("database error: {0}")]
    Database(DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// HTTP status code the request layer should answer with.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Conflict(_) => 409,
            Self::Unauthorized(_) => 401,
            Self::Unavailable(_) => 503,
            Self::Internal(_) => 500,
            Self::Database(_) => 500,
        }
    }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        if is_connection_error(&err) {
            Self::Unavailable(err.to_string())
        } else if is_unique_violation(&err) {
            Self::Conflict("duplicate key".to_string())
        } else if is_foreign_key_violation(&err) {
            Self::Validation("invalid reference to a related record".to_string())
        } else {
            Self::Database(err)
        }
    }
}

/// True for errors that mean the store itself is unreachable.
pub fn is_connection_error(err: &DbErr) -> bool {
    matches!(err, DbErr::Conn(_) | DbErr::ConnectionAcquire(_))
}

/// True for unique constraint violations (duplicate key).
pub fn is_unique_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(e) | DbErr::Query(e) => {
            let msg = e.to_string().to_lowercase();
            msg.contains("unique") || msg.contains("duplicate")
        }
        _ => false,
    }
}

/// True for foreign key constraint violations.
pub fn is_foreign_key_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(e) | DbErr::Query(e) => {
            e.to_string().to_lowercase().contains("foreign key")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::RuntimeErr;

    fn exec_err(message: &str) -> DbErr {
        DbErr::Exec(RuntimeErr::Internal(message.to_string()))
    }

    #[test]
    fn unique_violation_maps_to_conflict() {
        let err = ServiceError::from(exec_err("UNIQUE constraint failed: users.email"));
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(err.http_status(), 409);
    }

    #[test]
    fn foreign_key_violation_maps_to_validation() {
        let err = ServiceError::from(exec_err("FOREIGN KEY constraint failed"));
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(err.http_status(), 400);
    }

    #[test]
    fn connection_error_maps_to_unavailable() {
        let err = ServiceError::from(DbErr::Conn(RuntimeErr::Internal(
            "connection refused".to_string(),
        )));
        assert!(matches!(err, ServiceError::Unavailable(_)));
        assert_eq!(err.http_status(), 503);
    }

    #[test]
    fn not_found_formats_entity_and_id() {
        let err = ServiceError::not_found("BranchOffice", 42);
        assert_eq!(err.to_string(), "BranchOffice with id '42' not found");
        assert_eq!(err.http_status(), 404);
    }
}

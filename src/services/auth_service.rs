use anyhow::{anyhow, Result};
use bcrypt::{hash, verify, DEFAULT_COST};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::database::entities::users;
use crate::errors::ServiceError;

/// Token claims for an authenticated session.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Email address of the account.
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Service for handling authentication operations
#[derive(Clone)]
pub struct AuthService {
    db: DatabaseConnection,
}

impl AuthService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Hash a password using bcrypt
    pub fn hash_password(password: &str) -> Result<String> {
        hash(password, DEFAULT_COST).map_err(|e| anyhow!("Failed to hash password: {}", e))
    }

    /// Verify a password against a hash
    pub fn verify_password(password: &str, hashed: &str) -> Result<bool> {
        verify(password, hashed).map_err(|e| anyhow!("Failed to verify password: {}", e))
    }

    /// Issue a signed token valid for 24 hours.
    pub fn generate_token(secret: &str, user: &users::Model) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            role: user.role.clone(),
            exp: (now + Duration::hours(24)).timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| ServiceError::Internal(format!("failed to sign token: {}", e)))
    }

    /// Parse and verify a token issued by `generate_token`.
    pub fn validate_token(secret: &str, token: &str) -> Result<Claims, ServiceError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| ServiceError::Unauthorized("invalid authentication token".to_string()))
    }

    /// Authenticate a web dashboard login.
    ///
    /// Only back-office roles may sign in here; officers rate at the
    /// counters and have no dashboard account.
    pub async fn login(&self, email: &str, password: &str) -> Result<users::Model, ServiceError> {
        let user = self.check_credentials(email, password).await?;

        match user.role.as_str() {
            "administrator" | "admin" | "supervisor" => Ok(user),
            _ => Err(ServiceError::Unauthorized(
                "user is not authorized".to_string(),
            )),
        }
    }

    /// Authenticate a mobile (per-branch) login.
    pub async fn login_mobile(
        &self,
        email: &str,
        password: &str,
        branch_id: i32,
    ) -> Result<users::Model, ServiceError> {
        let user = self.check_credentials(email, password).await?;

        let authorized = matches!(user.role.as_str(), "admin" | "supervisor")
            && user.branch_id == Some(branch_id);
        if !authorized {
            return Err(ServiceError::Unauthorized(
                "user is not authorized for this branch".to_string(),
            ));
        }

        Ok(user)
    }

    async fn check_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<users::Model, ServiceError> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::Unauthorized("invalid email or password".to_string()))?;

        let matches = Self::verify_password(password, &user.password)
            .map_err(|e| ServiceError::Unauthorized(e.to_string()))?;
        if !matches {
            return Err(ServiceError::Unauthorized(
                "invalid email or password".to_string(),
            ));
        }

        Ok(user)
    }
}

use anyhow::{anyhow, Result};
use regex::Regex;

/// Roles a user account can hold.
pub const ROLES: [&str; 4] = ["administrator", "admin", "supervisor", "officer"];

/// Service for request payload validation
pub struct ValidationService;

impl ValidationService {
    pub fn validate_full_name(full_name: &str) -> Result<()> {
        let trimmed = full_name.trim();

        if trimmed.is_empty() {
            return Err(anyhow!("full name cannot be empty"));
        }

        if trimmed.len() < 3 {
            return Err(anyhow!("full name must be at least 3 characters"));
        }

        Ok(())
    }

    pub fn validate_email(email: &str) -> Result<()> {
        if email.is_empty() {
            return Err(anyhow!("email cannot be empty"));
        }

        let regex = Regex::new(r"^[a-z0-9._%+\-]+@[a-z0-9.\-]+\.[a-z]{2,}$")
            .map_err(|e| anyhow!("Failed to compile email regex: {}", e))?;
        if !regex.is_match(&email.to_lowercase()) {
            return Err(anyhow!("invalid email format"));
        }

        Ok(())
    }

    pub fn validate_password(password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(anyhow!("password cannot be empty"));
        }

        if password.len() < 6 {
            return Err(anyhow!("password must be at least 6 characters"));
        }

        Ok(())
    }

    pub fn validate_role(role: &str) -> Result<()> {
        if !ROLES.contains(&role) {
            return Err(anyhow!(
                "role must be one of 'administrator', 'admin', 'supervisor', 'officer'"
            ));
        }

        Ok(())
    }

    pub fn validate_branch_office(name: &str, address: &str, total_counter: i32) -> Result<()> {
        if name.trim().is_empty() {
            return Err(anyhow!("branch office name cannot be empty"));
        }

        if address.trim().is_empty() {
            return Err(anyhow!("address cannot be empty"));
        }

        if total_counter < 1 {
            return Err(anyhow!("total counter must be greater than 0"));
        }

        Ok(())
    }

    pub fn validate_branch_counter(counter_location: &str, user_id: i32, branch_id: i32) -> Result<()> {
        if counter_location.trim().is_empty() {
            return Err(anyhow!("counter location cannot be empty"));
        }

        if user_id < 1 {
            return Err(anyhow!("user id must be a positive number"));
        }

        if branch_id < 1 {
            return Err(anyhow!("branch id must be a positive number"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_user_fields() {
        assert!(ValidationService::validate_full_name("Amira Hassan").is_ok());
        assert!(ValidationService::validate_email("amira@example.com").is_ok());
        assert!(ValidationService::validate_password("secret1").is_ok());
        assert!(ValidationService::validate_role("officer").is_ok());
    }

    #[test]
    fn rejects_short_full_name() {
        assert!(ValidationService::validate_full_name("Al").is_err());
        assert!(ValidationService::validate_full_name("").is_err());
    }

    #[test]
    fn rejects_malformed_email() {
        assert!(ValidationService::validate_email("not-an-email").is_err());
        assert!(ValidationService::validate_email("missing@tld").is_err());
        assert!(ValidationService::validate_email("").is_err());
    }

    #[test]
    fn rejects_short_password() {
        assert!(ValidationService::validate_password("12345").is_err());
    }

    #[test]
    fn rejects_unknown_role() {
        assert!(ValidationService::validate_role("manager").is_err());
    }

    #[test]
    fn rejects_branch_office_without_counters() {
        assert!(ValidationService::validate_branch_office("Downtown", "1 Main St", 0).is_err());
        assert!(ValidationService::validate_branch_office("", "1 Main St", 4).is_err());
        assert!(ValidationService::validate_branch_office("Downtown", "1 Main St", 4).is_ok());
    }

    #[test]
    fn rejects_counter_without_location() {
        assert!(ValidationService::validate_branch_counter("", 1, 1).is_err());
        assert!(ValidationService::validate_branch_counter("Counter 1", 0, 1).is_err());
        assert!(ValidationService::validate_branch_counter("Counter 1", 1, 1).is_ok());
    }
}

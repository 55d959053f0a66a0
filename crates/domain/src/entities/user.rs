use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Authenticated principal. Content operations only look at `admin`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub admin: bool,
}

impl User {
    pub fn new(username: String, email: String, admin: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            username,
            email,
            admin,
        }
    }

    pub fn with_id(id: String, username: String, email: String, admin: bool) -> Self {
        Self {
            id,
            username,
            email,
            admin,
        }
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.username.trim().is_empty() {
            return Err(crate::DomainError::ValidationError("Username cannot be empty".to_string()));
        }

        if self.email.trim().is_empty() {
            return Err(crate::DomainError::ValidationError("Email cannot be empty".to_string()));
        }

        if !self.email.contains('@') {
            return Err(crate::DomainError::ValidationError("Invalid email format".to_string()));
        }

        Ok(())
    }
}

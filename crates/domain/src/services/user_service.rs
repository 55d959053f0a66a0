use crate::entities::User;
use crate::repositories::UserRepository;
use crate::errors::DomainError;
use std::sync::Arc;
use tracing::info;

/// User Service - registration and principal lookup
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(user_repository: Arc<dyn UserRepository>) -> Self {
        Self { user_repository }
    }

    /// Register a new user with business validation
    pub async fn register(
        &self,
        username: String,
        email: String,
        admin: bool,
    ) -> Result<User, DomainError> {
        let user = User::new(username, email, admin);

        // Business validation
        user.validate()?;

        // Check if username already exists
        if self.user_repository.find_by_username(&user.username).await?.is_some() {
            return Err(DomainError::UsernameAlreadyExists(user.username));
        }

        // Check if email already exists
        if self.user_repository.find_by_email(&user.email).await?.is_some() {
            return Err(DomainError::EmailAlreadyExists(user.email));
        }

        let saved = self.user_repository.save(&user).await?;
        info!(
            user_id = %saved.id,
            username = %saved.username,
            admin = saved.admin,
            "Registered user"
        );
        Ok(saved)
    }

    /// Resolve a principal by id; unknown ids are not an error
    pub async fn find_user(&self, id: &str) -> Result<Option<User>, DomainError> {
        self.user_repository.find_by_id(id).await
    }

    /// Find user by username
    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<User>, DomainError> {
        self.user_repository.find_by_username(username).await
    }
}

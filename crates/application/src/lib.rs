use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::info;

/// Tutorial Application - wires persistence adapters into the domain services
pub struct TutorialApp {
    pub content_service: ContentService,
    pub user_service: UserService,
}

impl TutorialApp {
    pub fn new(database_path: &str, pool_size: u32) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(database_path, pool_size)?;
        let pool = database.get_pool().clone();

        // Create repository implementations
        let units: Arc<dyn UnitOfWorkFactory> =
            Arc::new(SqliteUnitOfWorkFactory::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(pool));

        // Domain services
        let content_service = ContentService::new(units);
        let user_service = UserService::new(user_repository);

        Ok(Self {
            content_service,
            user_service,
        })
    }

    /// Make sure an admin account exists, returning it.
    ///
    /// An existing account with the same username is reused as is.
    pub async fn ensure_admin(&self, username: &str, email: &str) -> Result<User, DomainError> {
        if let Some(existing) = self.user_service.find_user_by_username(username).await? {
            if !existing.admin {
                return Err(DomainError::ValidationError(format!(
                    "User {} exists but is not an admin",
                    username
                )));
            }
            info!(user_id = %existing.id, "Admin user already present");
            return Ok(existing);
        }

        self.user_service
            .register(username.to_string(), email.to_string(), true)
            .await
    }
}

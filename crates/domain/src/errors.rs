use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content with id {0} does not exist")]
    ContentNotFound(String),

    #[error("Username already exists: {0}")]
    UsernameAlreadyExists(String),

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("User {0} is not allowed to perform this operation")]
    Unauthorized(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

use crate::errors::DomainError;
use crate::repositories::{ContentRepository, RatingRepository};

/// Transactional scope over the content and rating tables.
///
/// Nothing is visible to other units of work until `commit` succeeds.
/// Dropping a unit of work without committing rolls it back, so an early
/// return through `?` never leaves a transaction open.
pub trait UnitOfWork: ContentRepository + RatingRepository + Send {
    fn commit(self: Box<Self>) -> Result<(), DomainError>;
}

/// Opens units of work. Implementations block, so callers run them off the
/// async executor.
#[cfg_attr(test, mockall::automock)]
pub trait UnitOfWorkFactory: Send + Sync {
    fn begin(&self) -> Result<Box<dyn UnitOfWork>, DomainError>;
}

use crate::entities::Content;
use crate::errors::DomainError;
use std::collections::HashSet;

/// Content persistence, bound to the unit of work that owns the connection.
pub trait ContentRepository {
    fn create(&mut self, content: &Content) -> Result<(), DomainError>;
    fn retrieve(&mut self, id: &str) -> Result<Option<Content>, DomainError>;
    fn update(&mut self, content: &Content) -> Result<(), DomainError>;
    fn delete(&mut self, content: &Content) -> Result<(), DomainError>;
    fn retrieve_all(&mut self) -> Result<HashSet<Content>, DomainError>;
}

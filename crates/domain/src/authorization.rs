use crate::entities::User;
use crate::errors::DomainError;

/// Privilege a gated operation demands from its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Admin,
}

/// Precondition check run at the top of every gated operation, before any
/// persistence work. Returns the caller on success.
pub fn authorize(required: Requirement, caller: Option<&User>) -> Result<&User, DomainError> {
    let user = caller.ok_or(DomainError::Unauthenticated)?;

    match required {
        Requirement::Authenticated => Ok(user),
        Requirement::Admin if user.admin => Ok(user),
        Requirement::Admin => Err(DomainError::Unauthorized(user.username.clone())),
    }
}

pub mod content_repository;
pub mod rating_repository;
pub mod unit_of_work;
pub mod user_repository;

pub use content_repository::ContentRepository;
pub use rating_repository::RatingRepository;
pub use unit_of_work::{UnitOfWork, UnitOfWorkFactory};
pub use user_repository::UserRepository;

#[cfg(test)]
pub use unit_of_work::MockUnitOfWorkFactory;
#[cfg(test)]
pub use user_repository::MockUserRepository;

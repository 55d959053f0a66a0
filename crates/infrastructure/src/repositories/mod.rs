pub mod sqlite_unit_of_work;
pub mod sqlite_user_repository;

pub use sqlite_unit_of_work::{SqliteUnitOfWork, SqliteUnitOfWorkFactory};
pub use sqlite_user_repository::SqliteUserRepository;

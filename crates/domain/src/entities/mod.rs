pub mod content;
pub mod rating;
pub mod user;

pub use content::*;
pub use rating::*;
pub use user::*;

use crate::entities::Rating;
use crate::errors::DomainError;

pub trait RatingRepository {
    fn save(&mut self, rating: &Rating) -> Result<(), DomainError>;
    fn find_by_content(&mut self, content_id: &str) -> Result<Vec<Rating>, DomainError>;
    /// Removes every rating referencing `content_id`, returning how many went.
    fn delete_all_by_content(&mut self, content_id: &str) -> Result<usize, DomainError>;
}

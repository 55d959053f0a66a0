use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MIN_SCORE: i32 = 1;
pub const MAX_SCORE: i32 = 5;

/// A user's score for a content item. Never outlives the content it references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub content_id: String,
    pub user_id: String,
    pub score: i32,
}

impl Rating {
    pub fn new(content_id: String, user_id: String, score: i32) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content_id,
            user_id,
            score,
        }
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.score) {
            return Err(crate::DomainError::ValidationError(format!(
                "Score must be between {} and {}",
                MIN_SCORE, MAX_SCORE
            )));
        }

        Ok(())
    }
}

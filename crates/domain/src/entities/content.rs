use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};
use uuid::Uuid;

/// A piece of instructional material.
///
/// Identity is the `id`: two records with the same id compare equal and hash
/// the same, whatever their other fields hold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    pub id: String,
    pub title: String,
    pub description: String,
    pub video: String,
}

impl Content {
    /// Builds a new record from a creation payload, assigning a fresh id.
    pub fn create(new_content: NewContent) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: new_content.title,
            description: new_content.description,
            video: new_content.video,
        }
    }

    pub fn with_id(id: String, title: String, description: String, video: String) -> Self {
        Self {
            id,
            title,
            description,
            video,
        }
    }
}

impl PartialEq for Content {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Content {}

impl Hash for Content {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Body of a create request. Any client-supplied id is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContent {
    pub title: String,
    pub description: String,
    pub video: String,
}

impl NewContent {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        video: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            video: video.into(),
        }
    }

    pub fn validate(&self) -> Result<(), crate::DomainError> {
        if self.title.trim().is_empty() {
            return Err(crate::DomainError::ValidationError(
                "Title cannot be empty".to_string(),
            ));
        }

        if self.video.trim().is_empty() {
            return Err(crate::DomainError::ValidationError(
                "Video cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Partial update: `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video: Option<String>,
}

impl ContentPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.video.is_none()
    }
}

/// Applies `patch` on top of `existing`, field by field.
pub fn merge(existing: Content, patch: ContentPatch) -> Content {
    Content {
        id: existing.id,
        title: patch.title.unwrap_or(existing.title),
        description: patch.description.unwrap_or(existing.description),
        video: patch.video.unwrap_or(existing.video),
    }
}

//! Core post domain types.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::database_id::DatabaseID;

/// A blog post belonging to exactly one category.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    /// The post's database identifier.
    pub id: DatabaseID,
    /// The post title shown in listings.
    pub title: String,
    /// The post body. Stored exactly as submitted and escaped on render.
    pub content: String,
    /// The category this post belongs to.
    pub category_id: DatabaseID,
    /// When the post was created. Listings sort on this.
    pub created_at: OffsetDateTime,
}

/// A post joined with the name of its category, as shown on read pages.
#[derive(Debug, Clone, PartialEq)]
pub struct PostWithCategory {
    /// The post's database identifier.
    pub id: DatabaseID,
    /// The post title.
    pub title: String,
    /// The post body.
    pub content: String,
    /// When the post was created.
    pub created_at: OffsetDateTime,
    /// The display name of the post's category.
    pub category_name: String,
}

/// The fields needed to insert a post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostBuilder {
    pub title: String,
    pub content: String,
    pub category_id: DatabaseID,
    pub created_at: OffsetDateTime,
}

/// Form data for post creation and editing.
///
/// The category arrives as the raw select value so that a submission with
/// the placeholder still round-trips through validation instead of failing
/// at deserialization.
#[derive(Debug, Serialize, Deserialize)]
pub struct PostFormData {
    pub title: String,
    pub content: String,
    pub category_id: String,
}

/// A post submission that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedPost {
    pub title: String,
    pub content: String,
    pub category_id: DatabaseID,
}

impl PostFormData {
    /// Validate the submission, collecting every problem rather than
    /// stopping at the first.
    pub fn validate(&self) -> Result<ValidatedPost, Vec<String>> {
        let mut errors = Vec::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.push("Title is required.".to_string());
        }

        let content = self.content.trim();
        if content.is_empty() {
            errors.push("Content is required.".to_string());
        }

        let category_id = self.category_id.trim().parse::<DatabaseID>().unwrap_or(0);
        if category_id <= 0 {
            errors.push("Choose a category.".to_string());
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ValidatedPost {
            title: title.to_string(),
            content: content.to_string(),
            category_id,
        })
    }
}

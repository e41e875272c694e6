use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::filter::Pipeline;

/// Represents the 'comments' table in the database.
/// `content` is stored exactly as submitted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Comment {
    /// Builds the display copy. The stored comment is left as it is.
    pub fn render(&self, pipeline: &Pipeline) -> CommentResponse {
        CommentResponse {
            id: self.id,
            post_id: self.post_id,
            author: self.author.clone(),
            content: pipeline.render(&self.content),
            created_at: self.created_at,
        }
    }
}

/// DTO for creating a new comment.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(
        min = 1,
        max = 50,
        message = "Author must be between 1 and 50 characters"
    ))]
    pub author: String,

    #[validate(length(
        min = 1,
        max = 5000,
        message = "Comment must be between 1 and 5000 characters"
    ))]
    pub content: String,
}

/// DTO for displaying a comment. `content` is rendered through the
/// `comment_text` pipeline.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub author: String,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::posts::models::{Comment, CommentWithAuthor};

/// Request DTO for creating a comment
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCommentDto {
    #[validate(length(min = 1, max = 2048, message = "Comment must be 1-2048 characters"))]
    pub content: String,
}

/// Response DTO for a freshly created comment
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentResponseDto {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub post_id: i64,
}

impl From<Comment> for CommentResponseDto {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            content: comment.content,
            created_at: comment.created_at,
            user_id: comment.user_id,
            post_id: comment.post_id,
        }
    }
}

/// Author identity embedded in comment listings
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentAuthorDto {
    pub id: i64,
    pub username: String,
    pub fullname: String,
    pub avatar: Option<String>,
}

/// A listed comment with its author and an ownership flag for the caller
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CommentListItemDto {
    pub id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub author: CommentAuthorDto,
    /// True iff the requesting user wrote this comment
    pub owner: bool,
}

impl CommentListItemDto {
    pub fn from_row(row: CommentWithAuthor, current_user_id: i64) -> Self {
        Self {
            id: row.id,
            content: row.content,
            created_at: row.created_at,
            owner: row.user_id == current_user_id,
            author: CommentAuthorDto {
                id: row.user_id,
                username: row.author_username,
                fullname: row.author_fullname,
                avatar: row.author_avatar,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comment_row(user_id: i64) -> CommentWithAuthor {
        CommentWithAuthor {
            id: 7,
            user_id,
            content: "nice".to_string(),
            created_at: chrono::Utc::now(),
            author_username: "bob".to_string(),
            author_fullname: "Bob B".to_string(),
            author_avatar: None,
        }
    }

    #[test]
    fn test_owner_flag_set_for_author_only() {
        let own = CommentListItemDto::from_row(comment_row(42), 42);
        assert!(own.owner);

        let other = CommentListItemDto::from_row(comment_row(42), 43);
        assert!(!other.owner);
        assert_eq!(other.author.id, 42);
    }
}

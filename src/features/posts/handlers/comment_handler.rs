use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::CurrentUser;
use crate::features::posts::dtos::{CommentListItemDto, CommentResponseDto, CreateCommentDto};
use crate::features::posts::handlers::post_handler::PostState;
use crate::shared::types::{ApiResponse, Meta};

/// Comment on a post
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/comments",
    params(
        ("post_id" = i64, Path, description = "Post ID")
    ),
    request_body = CreateCommentDto,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<CommentResponseDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn create_comment(
    user: CurrentUser,
    State(state): State<PostState>,
    Path(post_id): Path<i64>,
    AppJson(dto): AppJson<CreateCommentDto>,
) -> Result<(StatusCode, Json<ApiResponse<CommentResponseDto>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let comment = state
        .comment_service
        .create_comment(user.id, post_id, &dto.content)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(comment.into()), None, None)),
    ))
}

/// List a post's comments
///
/// Comments are ordered by creation time ascending; each entry carries its
/// author and whether the caller owns it.
#[utoipa::path(
    get,
    path = "/api/posts/{post_id}/comments",
    params(
        ("post_id" = i64, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "List of comments", body = ApiResponse<Vec<CommentListItemDto>>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn list_comments(
    user: CurrentUser,
    State(state): State<PostState>,
    Path(post_id): Path<i64>,
) -> Result<Json<ApiResponse<Vec<CommentListItemDto>>>> {
    let comments = state.comment_service.list_comments(user.id, post_id).await?;

    let total = comments.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(comments),
        None,
        Some(Meta { total }),
    )))
}

/// Delete an own comment
///
/// Only the comment's author may delete it.
#[utoipa::path(
    delete,
    path = "/api/posts/{post_id}/comments/{comment_id}",
    params(
        ("post_id" = i64, Path, description = "Post ID"),
        ("comment_id" = i64, Path, description = "Comment ID")
    ),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 401, description = "Authentication required"),
        (status = 403, description = "Not the comment's author"),
        (status = 404, description = "Comment not found")
    ),
    security(("bearer_auth" = [])),
    tag = "comments"
)]
pub async fn delete_comment(
    user: CurrentUser,
    State(state): State<PostState>,
    Path((post_id, comment_id)): Path<(i64, i64)>,
) -> Result<StatusCode> {
    state
        .comment_service
        .delete_comment(user.id, post_id, comment_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

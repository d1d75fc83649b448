use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::model::CurrentUser;
use crate::features::posts::dtos::{
    CreatePostDto, LikeRequestDto, ListPostsQuery, PostResponseDto, MAX_FILE_SIZE,
};
use crate::features::posts::services::{CommentService, PostService, UploadedFile};
use crate::shared::types::{ApiResponse, Meta};

/// State for post and comment handlers
#[derive(Clone)]
pub struct PostState {
    pub post_service: Arc<PostService>,
    pub comment_service: Arc<CommentService>,
}

/// Create a post with attached media
///
/// Accepts multipart/form-data with:
/// - `content`: Optional text content
/// - `files`: Zero or more media files, attached in field order
#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    request_body(
        content = CreatePostDto,
        content_type = "multipart/form-data",
        description = "Post form with optional content and media files",
    ),
    responses(
        (status = 201, description = "Post created", body = ApiResponse<PostResponseDto>),
        (status = 400, description = "Invalid multipart data or file too large"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_post(
    user: CurrentUser,
    State(state): State<PostState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<PostResponseDto>>)> {
    let mut content: Option<String> = None;
    let mut files: Vec<UploadedFile> = Vec::new();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        match field_name.as_str() {
            "content" => {
                let text = field.text().await.map_err(|e| {
                    AppError::BadRequest(format!("Failed to read content field: {}", e))
                })?;
                if !text.is_empty() {
                    content = Some(text);
                }
            }
            "files" => {
                let filename = field
                    .file_name()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "unnamed".to_string());

                let data = field.bytes().await.map_err(|e| {
                    debug!("Failed to read file bytes: {}", e);
                    AppError::BadRequest(format!("Failed to read file data: {}", e))
                })?;

                if data.len() > MAX_FILE_SIZE {
                    return Err(AppError::BadRequest(format!(
                        "File too large. Maximum size is {} bytes ({} MB)",
                        MAX_FILE_SIZE,
                        MAX_FILE_SIZE / 1024 / 1024
                    )));
                }

                files.push(UploadedFile {
                    filename,
                    data: data.to_vec(),
                });
            }
            _ => {
                // Ignore unknown fields
                debug!("Ignoring unknown field: {}", field_name);
            }
        }
    }

    let post = state.post_service.create_post(&user, content, files).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(post), None, None)),
    ))
}

/// List posts with social counters
///
/// Returns every post (optionally one author's), enriched with attachment
/// filenames, author identity, like count, the caller's liked flag and
/// comment count.
#[utoipa::path(
    get,
    path = "/api/posts",
    params(ListPostsQuery),
    responses(
        (status = 200, description = "List of posts", body = ApiResponse<Vec<PostResponseDto>>),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Author not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn list_posts(
    user: CurrentUser,
    State(state): State<PostState>,
    Query(query): Query<ListPostsQuery>,
) -> Result<Json<ApiResponse<Vec<PostResponseDto>>>> {
    let posts = state
        .post_service
        .list_posts(user.id, query.author_id)
        .await?;

    let total = posts.len() as i64;

    Ok(Json(ApiResponse::success(
        Some(posts),
        None,
        Some(Meta { total }),
    )))
}

/// Set the like state for a post
///
/// The request body carries the target state; repeating a call with the
/// same state is a no-op success.
#[utoipa::path(
    post,
    path = "/api/posts/{post_id}/like",
    params(
        ("post_id" = i64, Path, description = "Post ID")
    ),
    request_body = LikeRequestDto,
    responses(
        (status = 200, description = "Like state applied"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Post not found")
    ),
    security(("bearer_auth" = [])),
    tag = "posts"
)]
pub async fn toggle_like(
    user: CurrentUser,
    State(state): State<PostState>,
    Path(post_id): Path<i64>,
    AppJson(dto): AppJson<LikeRequestDto>,
) -> Result<Json<ApiResponse<()>>> {
    state
        .post_service
        .toggle_like(user.id, post_id, dto.like)
        .await?;

    Ok(Json(ApiResponse::success(None, None, None)))
}

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::error::Result;
use crate::features::auth::model::CurrentUser;
use crate::features::users::services::SubscriptionService;
use crate::shared::types::ApiResponse;

/// Subscribe to an author
///
/// Idempotent: subscribing twice to the same author is a no-op success.
#[utoipa::path(
    post,
    path = "/api/users/{author_id}/subscribe",
    params(
        ("author_id" = i64, Path, description = "User ID of the author to subscribe to")
    ),
    responses(
        (status = 200, description = "Subscribed"),
        (status = 400, description = "Self-subscription attempted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Author not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn subscribe(
    user: CurrentUser,
    State(service): State<Arc<SubscriptionService>>,
    Path(author_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.subscribe(user.id, author_id).await?;

    Ok(Json(ApiResponse::success(None, None, None)))
}

/// Unsubscribe from an author
///
/// Idempotent: unsubscribing without an existing subscription is a no-op success.
#[utoipa::path(
    post,
    path = "/api/users/{author_id}/unsubscribe",
    params(
        ("author_id" = i64, Path, description = "User ID of the author to unsubscribe from")
    ),
    responses(
        (status = 200, description = "Unsubscribed"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Author not found")
    ),
    security(("bearer_auth" = [])),
    tag = "users"
)]
pub async fn unsubscribe(
    user: CurrentUser,
    State(service): State<Arc<SubscriptionService>>,
    Path(author_id): Path<i64>,
) -> Result<Json<ApiResponse<()>>> {
    service.unsubscribe(user.id, author_id).await?;

    Ok(Json(ApiResponse::success(None, None, None)))
}

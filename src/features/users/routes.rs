use axum::{routing::post, Router};
use std::sync::Arc;

use crate::features::users::handlers;
use crate::features::users::services::SubscriptionService;

/// Create routes for the users feature (require auth middleware to be applied by caller)
pub fn routes(subscription_service: Arc<SubscriptionService>) -> Router {
    Router::new()
        .route("/api/users/{author_id}/subscribe", post(handlers::subscribe))
        .route(
            "/api/users/{author_id}/unsubscribe",
            post(handlers::unsubscribe),
        )
        .with_state(subscription_service)
}

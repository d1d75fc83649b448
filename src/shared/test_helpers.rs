#[cfg(test)]
use crate::features::auth::model::CurrentUser;

#[cfg(test)]
use axum::{extract::Request, middleware::Next, response::Response, Router};

#[cfg(test)]
#[allow(dead_code)]
pub fn create_test_user() -> CurrentUser {
    CurrentUser {
        id: 1,
        username: "test_user".to_string(),
        fullname: "Test User".to_string(),
        bio: String::new(),
        birthday: None,
        signup_at: chrono::Utc::now(),
        last_activity: chrono::Utc::now(),
        avatar: None,
    }
}

#[cfg(test)]
#[allow(dead_code)]
async fn inject_test_user_middleware(mut request: Request, next: Next) -> Response {
    request.extensions_mut().insert(create_test_user());
    next.run(request).await
}

#[cfg(test)]
#[allow(dead_code)]
pub fn with_test_auth(router: Router) -> Router {
    router.layer(axum::middleware::from_fn(inject_test_user_middleware))
}

use chrono::{DateTime, NaiveDate, Utc};

use crate::features::users::models::User;

/// The identity resolved by the auth middleware for one request.
///
/// Carries the full account view (minus the password hash) so handlers never
/// re-query the store for the caller. Lives in request extensions for the
/// duration of a single request only.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub fullname: String,
    pub bio: String,
    pub birthday: Option<NaiveDate>,
    pub signup_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub avatar: Option<String>,
}

impl From<User> for CurrentUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            bio: user.bio,
            birthday: user.birthday,
            signup_at: user.signup_at,
            last_activity: user.last_activity,
            avatar: user.avatar,
        }
    }
}

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::auth::model::CurrentUser;
use crate::features::users::models::User;

/// Public view of a user account. The password hash is never serialized.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponseDto {
    pub id: i64,
    pub username: String,
    pub fullname: String,
    pub bio: String,
    pub signup_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub avatar: Option<String>,
    pub birthday: Option<NaiveDate>,
}

impl From<User> for UserResponseDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            bio: user.bio,
            signup_at: user.signup_at,
            last_activity: user.last_activity,
            avatar: user.avatar,
            birthday: user.birthday,
        }
    }
}

impl From<CurrentUser> for UserResponseDto {
    fn from(user: CurrentUser) -> Self {
        Self {
            id: user.id,
            username: user.username,
            fullname: user.fullname,
            bio: user.bio,
            signup_at: user.signup_at,
            last_activity: user.last_activity,
            avatar: user.avatar,
            birthday: user.birthday,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_never_serialized() {
        let user = User {
            id: 1,
            username: "alice".to_string(),
            fullname: "Alice A".to_string(),
            password: "$2b$12$secret-hash".to_string(),
            birthday: None,
            bio: String::new(),
            signup_at: chrono::Utc::now(),
            last_activity: chrono::Utc::now(),
            avatar: None,
        };

        let json = serde_json::to_value(UserResponseDto::from(user)).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["username"], "alice");
    }
}

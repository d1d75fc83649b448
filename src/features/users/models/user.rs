use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for a user account. `password` holds the bcrypt hash,
/// never the plaintext.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub fullname: String,
    pub password: String,
    pub birthday: Option<NaiveDate>,
    pub bio: String,
    pub signup_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    pub avatar: Option<String>,
}

/// Data for inserting a new user row
#[derive(Debug)]
pub struct NewUser {
    pub username: String,
    pub fullname: String,
    pub password_hash: String,
    pub birthday: Option<NaiveDate>,
    pub bio: String,
}

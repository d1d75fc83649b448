use sqlx::PgPool;

use crate::core::error::{is_unique_violation, AppError, Result};
use crate::features::auth::dtos::SignupRequestDto;
use crate::features::users::models::{NewUser, User};

const USER_COLUMNS: &str =
    "id, username, fullname, password, birthday, bio, signup_at, last_activity, avatar";

/// Credential store: owns user rows and password hashing.
pub struct UserService {
    pool: PgPool,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(pool: PgPool, bcrypt_cost: u32) -> Self {
        Self { pool, bcrypt_cost }
    }

    /// Create a new user account.
    ///
    /// The username is race-checked: a concurrent duplicate signup that slips
    /// past the pre-insert lookup is caught as a unique-constraint violation
    /// and reported as the same conflict.
    pub async fn create_user(&self, dto: &SignupRequestDto) -> Result<User> {
        if dto.password != dto.password_repeat {
            return Err(AppError::Validation("Passwords must match".to_string()));
        }

        if self.find_by_username(&dto.username).await?.is_some() {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let new_user = NewUser {
            username: dto.username.clone(),
            fullname: dto.fullname.clone(),
            password_hash: hash_password(&dto.password, self.bcrypt_cost)?,
            birthday: dto.birthday,
            bio: dto.bio.clone().unwrap_or_default(),
        };

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, fullname, password, birthday, bio, signup_at, last_activity)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING id, username, fullname, password, birthday, bio, signup_at, last_activity, avatar
            "#,
        )
        .bind(&new_user.username)
        .bind(&new_user.fullname)
        .bind(&new_user.password_hash)
        .bind(new_user.birthday)
        .bind(&new_user.bio)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("Username already taken".to_string())
            } else {
                tracing::error!("Failed to insert user: {:?}", e);
                AppError::Database(e)
            }
        })?;

        tracing::info!("User created: id={}, username={}", user.id, user.username);

        Ok(user)
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = $1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Check a username/password pair against the stored hash.
    /// Returns `None` for an unknown user or a wrong password.
    pub async fn verify_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        if verify_password(password, &user.password)? {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Stamp the user's last-activity timestamp. Called once per
    /// authenticated request.
    pub async fn touch_last_activity(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_activity = NOW() WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

/// Hash a plaintext password with the configured bcrypt cost.
/// The plaintext is dropped by the caller right after this returns.
pub fn hash_password(password: &str, cost: u32) -> Result<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    bcrypt::verify(password, hash)
        .map_err(|e| AppError::Internal(format!("Failed to verify password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low cost keeps the hashing tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn test_hash_password_never_stores_plaintext() {
        let hash = hash_password("hunter2", TEST_COST).unwrap();
        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_password_roundtrip() {
        let hash = hash_password("correct horse battery staple", TEST_COST).unwrap();
        assert!(verify_password("correct horse battery staple", &hash).unwrap());
        assert!(!verify_password("wrong password", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let first = hash_password("same input", TEST_COST).unwrap();
        let second = hash_password("same input", TEST_COST).unwrap();
        assert_ne!(first, second);
    }
}

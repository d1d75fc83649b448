use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for user signup
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequestDto {
    #[validate(
        length(min = 1, max = 64, message = "Username must be 1-64 characters"),
        regex(
            path = "*crate::shared::validation::USERNAME_REGEX",
            message = "Username must start with letter or underscore and contain only alphanumeric characters and underscores"
        )
    )]
    pub username: String,

    #[validate(length(min = 1, max = 128, message = "Full name must be 1-128 characters"))]
    pub fullname: String,

    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub password_repeat: String,

    pub birthday: Option<NaiveDate>,

    #[validate(length(max = 1024, message = "Bio must not exceed 1024 characters"))]
    pub bio: Option<String>,
}

/// Request DTO for login (submitted form-encoded)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequestDto {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Response DTO for a successful login
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TokenResponseDto {
    /// Signed bearer token
    pub access_token: String,
    /// Token type (always "bearer")
    pub token_type: String,
    /// Token lifetime in seconds
    pub expires_in: i64,
}

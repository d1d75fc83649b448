use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::auth::dtos::{LoginRequestDto, SignupRequestDto, TokenResponseDto};
use crate::features::auth::model::CurrentUser;
use crate::features::auth::services::token_service::TokenService;
use crate::features::users::dtos::UserResponseDto;
use crate::features::users::services::UserService;

/// Service for authentication operations (signup, login, identity resolution)
pub struct AuthService {
    user_service: Arc<UserService>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    pub fn new(user_service: Arc<UserService>, token_service: Arc<TokenService>) -> Self {
        Self {
            user_service,
            token_service,
        }
    }

    /// Register a new user
    pub async fn signup(&self, dto: SignupRequestDto) -> Result<UserResponseDto> {
        let user = self.user_service.create_user(&dto).await?;
        Ok(user.into())
    }

    /// Login with username and password
    pub async fn login(&self, dto: LoginRequestDto) -> Result<TokenResponseDto> {
        let user = self
            .user_service
            .verify_credentials(&dto.username, &dto.password)
            .await?
            .ok_or_else(|| {
                AppError::Unauthorized("Incorrect username or password".to_string())
            })?;

        let issued = self.token_service.issue_token(&user.username)?;

        Ok(TokenResponseDto {
            access_token: issued.token,
            token_type: "bearer".to_string(),
            expires_in: issued.expires_in,
        })
    }

    /// Resolve a bearer token to the full current-user identity.
    ///
    /// Fails when the token is invalid/expired or the subject account no
    /// longer exists. Stamps last_activity as a side effect; a failed stamp
    /// never fails the request.
    pub async fn resolve_current_user(&self, token: &str) -> Result<CurrentUser> {
        let username = self.token_service.validate_token(token)?;

        let user = self
            .user_service
            .find_by_username(&username)
            .await?
            .ok_or_else(|| AppError::Auth("Could not validate credentials".to_string()))?;

        if let Err(e) = self.user_service.touch_last_activity(user.id).await {
            tracing::warn!("Failed to update last_activity for user {}: {}", user.id, e);
        }

        Ok(user.into())
    }

    /// Get current user info (for /me endpoint)
    pub async fn get_current_user(&self, user: CurrentUser) -> Result<UserResponseDto> {
        Ok(user.into())
    }
}

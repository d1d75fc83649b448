use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};

/// JWT payload: subject username plus issue/expiry instants as UTC Unix
/// timestamps, so the expiry comparison is timezone-proof.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// A freshly signed token with its lifetime in seconds
#[derive(Debug)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Stateless bearer token signing and validation (HS256, process-wide secret).
pub struct TokenService {
    secret: String,
    token_expiry_minutes: i64,
    leeway_secs: u64,
}

impl TokenService {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            secret: config.secret,
            token_expiry_minutes: config.token_expiry_minutes,
            leeway_secs: config.jwt_leeway_secs,
        }
    }

    /// Sign a token for the given subject with the configured expiry.
    pub fn issue_token(&self, username: &str) -> Result<IssuedToken> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.token_expiry_minutes);

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok(IssuedToken {
            token,
            expires_in: expires_at.timestamp() - now.timestamp(),
        })
    }

    /// Validate a token and return its subject username.
    ///
    /// Fails when the signature is invalid, the payload does not parse, the
    /// subject is missing, or the expiry is at or before the current time.
    pub fn validate_token(&self, token: &str) -> Result<String> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map_err(|_| AppError::Auth("Could not validate credentials".to_string()))?;

        let claims = token_data.claims;

        // The library treats exp == now as still valid; the contract here is
        // that a token is dead the moment its expiry instant is reached.
        if claims.exp <= Utc::now().timestamp() {
            return Err(AppError::Auth("Token has expired".to_string()));
        }

        if claims.sub.is_empty() {
            return Err(AppError::Auth("Could not validate credentials".to_string()));
        }

        Ok(claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(expiry_minutes: i64) -> AuthConfig {
        AuthConfig {
            secret: "test-secret-key".to_string(),
            token_expiry_minutes: expiry_minutes,
            jwt_leeway_secs: 0,
            bcrypt_cost: 4,
        }
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let service = TokenService::new(test_config(15));

        let issued = service.issue_token("alice").unwrap();
        assert_eq!(issued.expires_in, 15 * 60);

        let subject = service.validate_token(&issued.token).unwrap();
        assert_eq!(subject, "alice");
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Negative expiry puts the exp claim in the past
        let service = TokenService::new(test_config(-16));

        let issued = service.issue_token("alice").unwrap();
        let err = service.validate_token(&issued.token).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_expiry_at_now_is_rejected() {
        // Zero expiry makes exp == now at issue time; a token is dead the
        // moment its expiry instant is reached, not a second later.
        let service = TokenService::new(test_config(0));

        let issued = service.issue_token("alice").unwrap();
        let err = service.validate_token(&issued.token).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = TokenService::new(test_config(15));
        let verifier = TokenService::new(AuthConfig {
            secret: "a-different-secret".to_string(),
            ..test_config(15)
        });

        let issued = issuer.issue_token("alice").unwrap();
        let err = verifier.validate_token(&issued.token).unwrap_err();
        assert!(matches!(err, AppError::Auth(_)));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let service = TokenService::new(test_config(15));

        assert!(matches!(
            service.validate_token("not-a-jwt").unwrap_err(),
            AppError::Auth(_)
        ));
        assert!(matches!(
            service.validate_token("").unwrap_err(),
            AppError::Auth(_)
        ));
    }
}

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::time::Duration;

use super::model::AuthenticatedUser;
use crate::core::error::AppError;
use crate::shared::constants::ROLE_USER;

/// Verifies locally-issued HS256 bearer tokens.
///
/// Token issuance lives in the external auth service; this side only needs the
/// shared secret. Claims are authoritative for the token's lifetime.
pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    sub: String,
    #[serde(default)]
    email: String,
    #[serde(default = "default_role")]
    role: String,
    #[serde(rename = "exp")]
    _exp: u64,
    #[serde(rename = "iat", default)]
    _iat: Option<u64>,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

impl JwtValidator {
    pub fn new(secret: &str, leeway: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = leeway.as_secs();

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Validate a bearer token and resolve it to a principal.
    ///
    /// Fails with Unauthorized on malformed tokens, bad signatures and
    /// expired tokens (subject to the configured leeway).
    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;

        let claims = token_data.claims;

        if claims.sub.is_empty() {
            return Err(AppError::Unauthorized(
                "Token has no subject claim".to_string(),
            ));
        }

        Ok(AuthenticatedUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{admin_token, expired_token, user_token, TEST_JWT_SECRET};

    fn validator() -> JwtValidator {
        JwtValidator::new(TEST_JWT_SECRET, Duration::from_secs(0))
    }

    #[test]
    fn test_valid_user_token() {
        let user = validator().validate_token(&user_token("user-1")).unwrap();
        assert_eq!(user.id, "user-1");
        assert_eq!(user.role, "user");
        assert!(!user.is_admin());
    }

    #[test]
    fn test_valid_admin_token() {
        let user = validator().validate_token(&admin_token("admin-1")).unwrap();
        assert!(user.is_admin());
    }

    #[test]
    fn test_garbage_token_rejected() {
        let err = validator().validate_token("not-a-jwt").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let other = JwtValidator::new("a-different-secret", Duration::from_secs(0));
        let err = other.validate_token(&user_token("user-1")).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let err = validator()
            .validate_token(&expired_token("user-1"))
            .unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }
}

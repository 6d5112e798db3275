//! JWT token generation and validation
//!
//! Tokens are signed with a symmetric secret (HS256) using pre-computed
//! keys, and carry the user's identity claims plus the configured
//! issuer/audience. Decoding enforces signature, lifetime, issuer, and
//! audience.

use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Full name of the user
    pub name: String,
    /// Email of the user
    pub email: String,
    /// Role name of the user
    pub role: String,
    /// Issuer
    pub iss: String,
    /// Audience
    pub aud: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

/// Pre-computed JWT keys for efficient token operations
/// These are expensive to create, so we cache them in AppState
#[derive(Clone)]
pub struct JwtKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
}

impl JwtKeys {
    /// Create new JWT keys from secret
    /// This should be called once at startup
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
        }
    }

    pub fn encoding(&self) -> &EncodingKey {
        &self.encoding
    }

    pub fn decoding(&self) -> &DecodingKey {
        &self.decoding
    }
}

/// JWT service for token operations
///
/// Uses pre-computed keys to avoid key derivation on every request.
/// Create once at startup and store in AppState.
#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    issuer: String,
    audience: String,
    expiration_minutes: i64,
}

impl JwtService {
    /// Create a new JWT service with pre-computed keys
    pub fn new(secret: &str, issuer: &str, audience: &str, expiration_minutes: i64) -> Self {
        Self {
            keys: JwtKeys::new(secret),
            issuer: issuer.to_string(),
            audience: audience.to_string(),
            expiration_minutes,
        }
    }

    /// Generate a signed token carrying the user's identity claims
    pub fn generate_token(
        &self,
        user_id: i32,
        full_name: &str,
        email: &str,
        role_name: &str,
    ) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            name: full_name.to_string(),
            email: email.to_string(),
            role: role_name.to_string(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, self.keys.encoding())
            .map_err(|e| anyhow::anyhow!("Failed to generate token: {}", e))
    }

    /// Validate a token's signature, lifetime, issuer, and audience,
    /// returning its claims
    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        let token_data = decode::<Claims>(token, self.keys.decoding(), &validation)
            .map_err(|e| anyhow::anyhow!("Invalid token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Token lifetime in minutes
    #[inline]
    pub fn expiration_minutes(&self) -> i64 {
        self.expiration_minutes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret", "test-issuer", "test-audience", 60)
    }

    #[test]
    fn test_generate_and_decode_token() {
        let service = create_test_service();

        let token = service
            .generate_token(42, "Ana Torres", "ana@x.com", "Admin")
            .unwrap();
        let claims = service.decode_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.name, "Ana Torres");
        assert_eq!(claims.email, "ana@x.com");
        assert_eq!(claims.role, "Admin");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-audience");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_token_with_wrong_secret_rejected() {
        let service = create_test_service();
        let other = JwtService::new("other-secret", "test-issuer", "test-audience", 60);

        let token = other.generate_token(1, "Ana", "ana@x.com", "User").unwrap();
        assert!(service.decode_token(&token).is_err());
    }

    #[test]
    fn test_token_with_wrong_issuer_rejected() {
        let service = create_test_service();
        let other = JwtService::new("test-secret", "someone-else", "test-audience", 60);

        let token = other.generate_token(1, "Ana", "ana@x.com", "User").unwrap();
        assert!(service.decode_token(&token).is_err());
    }

    #[test]
    fn test_token_with_wrong_audience_rejected() {
        let service = create_test_service();
        let other = JwtService::new("test-secret", "test-issuer", "someone-else", 60);

        let token = other.generate_token(1, "Ana", "ana@x.com", "User").unwrap();
        assert!(service.decode_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Expiry far enough in the past to clear the default leeway
        let service = JwtService::new("test-secret", "test-issuer", "test-audience", -5);

        let token = service.generate_token(1, "Ana", "ana@x.com", "User").unwrap();
        assert!(service.decode_token(&token).is_err());
    }

    #[test]
    fn test_invalid_token_rejected() {
        let service = create_test_service();
        assert!(service.decode_token("invalid.token.here").is_err());
    }

    #[test]
    fn test_service_is_clone_cheap() {
        let service = create_test_service();
        let _cloned = service.clone(); // Arc increments only
    }
}

//! Authentication service
//!
//! Stateless login: look the user up by email, verify the password on
//! the blocking pool, then issue a signed token. An unknown email and a
//! wrong password produce the same failure, so the response never
//! reveals which field was wrong.

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::UserRepository;
use crate::services::UserService;
use crate::types::{AuthResponse, LoginRequest};
use sqlx::PgPool;

/// Authentication service
pub struct AuthService;

impl AuthService {
    /// Authenticate a user and issue a signed token
    pub async fn login(
        pool: &PgPool,
        jwt: &JwtService,
        req: LoginRequest,
    ) -> Result<AuthResponse, ApiError> {
        let user = UserRepository::find_by_email(pool, &req.email)
            .await?
            .ok_or(ApiError::AuthenticationFailed)?;

        let valid = PasswordService::verify_async(req.password, user.password_hash.clone()).await?;
        if !valid {
            return Err(ApiError::AuthenticationFailed);
        }

        let role_name = user.role_name.clone().unwrap_or_else(|| "User".to_string());
        let token = jwt.generate_token(user.id, &user.full_name, &user.email, &role_name)?;

        Ok(AuthResponse {
            token,
            user: UserService::to_response(user),
        })
    }
}

#[cfg(test)]
mod tests {
    // Login behavior is exercised end-to-end by the database-backed
    // tests in tests/auth_integration_test.rs.
}

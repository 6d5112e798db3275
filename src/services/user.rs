//! User service: business rules above the user repository
//!
//! Email uniqueness and the referential role check both run before any
//! write. Writes re-fetch the joined row afterwards so responses always
//! carry the nested role.

use crate::auth::PasswordService;
use crate::error::{is_unique_violation, ApiError};
use crate::repositories::{RoleRepository, UserRepository, UserWithRole};
use crate::types::{CreateUserRequest, RoleResponse, UpdateUserRequest, UserResponse};
use sqlx::PgPool;

/// User service
pub struct UserService;

impl UserService {
    /// List all users with their role, ordered by full name
    pub async fn list(pool: &PgPool) -> Result<Vec<UserResponse>, ApiError> {
        let users = UserRepository::list(pool).await?;
        Ok(users.into_iter().map(Self::to_response).collect())
    }

    /// Get a user by ID with its role
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User with id {} not found", id)))?;
        Ok(Self::to_response(user))
    }

    /// List users with the given role (empty when none)
    pub async fn list_by_role(pool: &PgPool, role_id: i32) -> Result<Vec<UserResponse>, ApiError> {
        let users = UserRepository::list_by_role(pool, role_id).await?;
        Ok(users.into_iter().map(Self::to_response).collect())
    }

    /// Create a new user
    ///
    /// Checks email uniqueness and that the role resolves, hashes the
    /// password, inserts, then re-fetches the joined row.
    pub async fn create(pool: &PgPool, req: CreateUserRequest) -> Result<UserResponse, ApiError> {
        if UserRepository::email_exists(pool, &req.email).await? {
            return Err(ApiError::DuplicateEmail(req.email));
        }

        if !RoleRepository::exists(pool, req.role_id).await? {
            return Err(ApiError::RoleNotFound(req.role_id));
        }

        let password_hash = PasswordService::hash_async(req.password).await?;

        let id = UserRepository::insert(
            pool,
            &req.full_name,
            &req.email,
            &password_hash,
            req.role_id,
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::DuplicateEmail(req.email.clone())
            } else {
                e.into()
            }
        })?;

        Self::get_by_id(pool, id).await
    }

    /// Replace a user's mutable fields
    ///
    /// The stored password hash is kept unless a non-empty password is
    /// supplied; the email uniqueness check only runs when the email
    /// changed.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        req: UpdateUserRequest,
    ) -> Result<UserResponse, ApiError> {
        let user = UserRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User with id {} not found", id)))?;

        if user.email != req.email && UserRepository::email_exists(pool, &req.email).await? {
            return Err(ApiError::DuplicateEmail(req.email));
        }

        if !RoleRepository::exists(pool, req.role_id).await? {
            return Err(ApiError::RoleNotFound(req.role_id));
        }

        let password_hash = match req.password.filter(|p| !p.is_empty()) {
            Some(password) => PasswordService::hash_async(password).await?,
            None => user.password_hash,
        };

        UserRepository::update(
            pool,
            id,
            &req.full_name,
            &req.email,
            &password_hash,
            req.role_id,
        )
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ApiError::DuplicateEmail(req.email.clone())
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| ApiError::NotFound(format!("User with id {} not found", id)))?;

        Self::get_by_id(pool, id).await
    }

    /// Delete a user
    pub async fn delete(pool: &PgPool, id: i32) -> Result<(), ApiError> {
        let deleted = UserRepository::delete(pool, id).await?;
        if !deleted {
            return Err(ApiError::NotFound(format!("User with id {} not found", id)));
        }
        Ok(())
    }

    /// Map a joined row to its API shape, dropping the password hash
    pub(crate) fn to_response(user: UserWithRole) -> UserResponse {
        let UserWithRole {
            id,
            full_name,
            email,
            password_hash: _,
            role_id,
            role_name,
            role_description,
        } = user;

        let role = role_name.map(|name| RoleResponse {
            role_id,
            name,
            description: role_description,
        });

        UserResponse {
            user_id: id,
            full_name,
            email,
            role_id,
            role,
        }
    }
}

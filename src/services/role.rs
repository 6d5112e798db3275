//! Role service: business rules above the role repository
//!
//! Uniqueness is pre-checked before writes; a unique-constraint
//! violation that still surfaces from a concurrent write maps to the
//! same duplicate error.

use crate::error::{is_foreign_key_violation, is_unique_violation, ApiError};
use crate::repositories::{RoleRecord, RoleRepository, UserRepository};
use crate::types::{CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use sqlx::PgPool;

/// Role service
pub struct RoleService;

impl RoleService {
    /// List all roles ordered by name
    pub async fn list(pool: &PgPool) -> Result<Vec<RoleResponse>, ApiError> {
        let roles = RoleRepository::list(pool).await?;
        Ok(roles.into_iter().map(Self::to_response).collect())
    }

    /// Get a role by ID
    pub async fn get_by_id(pool: &PgPool, id: i32) -> Result<RoleResponse, ApiError> {
        let role = RoleRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Role with id {} not found", id)))?;
        Ok(Self::to_response(role))
    }

    /// Create a new role with a unique name
    pub async fn create(pool: &PgPool, req: CreateRoleRequest) -> Result<RoleResponse, ApiError> {
        if RoleRepository::find_by_name(pool, &req.name).await?.is_some() {
            return Err(ApiError::DuplicateName(req.name));
        }

        let role = RoleRepository::insert(pool, &req.name, req.description.as_deref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::DuplicateName(req.name.clone())
                } else {
                    e.into()
                }
            })?;

        Ok(Self::to_response(role))
    }

    /// Replace a role's name and description
    pub async fn update(
        pool: &PgPool,
        id: i32,
        req: UpdateRoleRequest,
    ) -> Result<RoleResponse, ApiError> {
        RoleRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Role with id {} not found", id)))?;

        // The new name must not belong to a different role
        if let Some(existing) = RoleRepository::find_by_name(pool, &req.name).await? {
            if existing.id != id {
                return Err(ApiError::DuplicateName(req.name));
            }
        }

        let role = RoleRepository::update(pool, id, &req.name, req.description.as_deref())
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ApiError::DuplicateName(req.name.clone())
                } else {
                    e.into()
                }
            })?
            .ok_or_else(|| ApiError::NotFound(format!("Role with id {} not found", id)))?;

        Ok(Self::to_response(role))
    }

    /// Delete a role that no user references
    ///
    /// Referencing users are checked first; a foreign-key violation
    /// raised by a concurrent insert maps to the same error.
    pub async fn delete(pool: &PgPool, id: i32) -> Result<(), ApiError> {
        if UserRepository::exists_with_role(pool, id).await? {
            return Err(ApiError::RoleInUse(id));
        }

        let deleted = RoleRepository::delete(pool, id).await.map_err(|e| {
            if is_foreign_key_violation(&e) {
                ApiError::RoleInUse(id)
            } else {
                e.into()
            }
        })?;

        if !deleted {
            return Err(ApiError::NotFound(format!("Role with id {} not found", id)));
        }

        Ok(())
    }

    fn to_response(role: RoleRecord) -> RoleResponse {
        RoleResponse {
            role_id: role.id,
            name: role.name,
            description: role.description,
        }
    }
}

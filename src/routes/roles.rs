//! Role CRUD routes

use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::RoleService;
use crate::state::AppState;
use crate::types::{ApiResponse, CreateRoleRequest, RoleResponse, UpdateRoleRequest};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Create role routes
pub fn roles_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_roles).post(create_role))
        .route("/:id", get(get_role).put(update_role).delete(delete_role))
}

/// GET /roles - List all roles ordered by name
async fn list_roles(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<RoleResponse>>>> {
    let roles = RoleService::list(state.db()).await?;
    Ok(Json(ApiResponse::success(
        "Roles retrieved successfully",
        roles,
    )))
}

/// GET /roles/{id} - Get a role by ID
async fn get_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<RoleResponse>>> {
    let role = RoleService::get_by_id(state.db(), id).await?;
    Ok(Json(ApiResponse::success(
        "Role retrieved successfully",
        role,
    )))
}

/// POST /roles - Create a new role
async fn create_role(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateRoleRequest>,
) -> ApiResult<Json<ApiResponse<RoleResponse>>> {
    let role = RoleService::create(state.db(), req).await?;
    Ok(Json(ApiResponse::success("Role created successfully", role)))
}

/// PUT /roles/{id} - Replace a role's name and description
async fn update_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateRoleRequest>,
) -> ApiResult<Json<ApiResponse<RoleResponse>>> {
    let role = RoleService::update(state.db(), id, req).await?;
    Ok(Json(ApiResponse::success("Role updated successfully", role)))
}

/// DELETE /roles/{id} - Delete a role that no user references
async fn delete_role(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<()>>> {
    RoleService::delete(state.db(), id).await?;
    Ok(Json(ApiResponse::success_empty("Role deleted successfully")))
}

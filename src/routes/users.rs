//! User CRUD routes

use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::UserService;
use crate::state::AppState;
use crate::types::{ApiResponse, CreateUserRequest, UpdateUserRequest, UserResponse};
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Create user routes
pub fn users_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/by-role/:role_id", get(list_users_by_role))
}

/// GET /users - List all users with their role, ordered by full name
async fn list_users(
    State(state): State<AppState>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserService::list(state.db()).await?;
    Ok(Json(ApiResponse::success(
        "Users retrieved successfully",
        users,
    )))
}

/// GET /users/{id} - Get a user by ID with its role
async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = UserService::get_by_id(state.db(), id).await?;
    Ok(Json(ApiResponse::success(
        "User retrieved successfully",
        user,
    )))
}

/// GET /users/by-role/{roleId} - List users with the given role
///
/// An unknown role yields a success envelope with an empty list.
async fn list_users_by_role(
    State(state): State<AppState>,
    Path(role_id): Path<i32>,
) -> ApiResult<Json<ApiResponse<Vec<UserResponse>>>> {
    let users = UserService::list_by_role(state.db(), role_id).await?;
    Ok(Json(ApiResponse::success(
        format!("Users for role {} retrieved successfully", role_id),
        users,
    )))
}

/// POST /users - Create a new user
async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<CreateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = UserService::create(state.db(), req).await?;
    Ok(Json(ApiResponse::success("User created successfully", user)))
}

/// PUT /users/{id} - Replace a user's mutable fields
async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    ValidatedJson(req): ValidatedJson<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserResponse>>> {
    let user = UserService::update(state.db(), id, req).await?;
    Ok(Json(ApiResponse::success("User updated successfully", user)))
}

/// DELETE /users/{id} - Delete a user
async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<()>>> {
    UserService::delete(state.db(), id).await?;
    Ok(Json(ApiResponse::success_empty("User deleted successfully")))
}

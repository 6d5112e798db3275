//! Authentication routes
//!
//! Password verification runs on the blocking thread pool; token
//! signing uses the pre-computed keys from AppState.

use crate::error::ApiResult;
use crate::extract::ValidatedJson;
use crate::services::AuthService;
use crate::state::AppState;
use crate::types::{ApiResponse, AuthResponse, LoginRequest};
use axum::{extract::State, routing::post, Json, Router};

/// Create auth routes
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/login", post(login))
}

/// POST /auth/login - Authenticate and issue a bearer token
async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> ApiResult<Json<ApiResponse<AuthResponse>>> {
    let auth = AuthService::login(state.db(), state.jwt(), req).await?;
    Ok(Json(ApiResponse::success("Login successful", auth)))
}

//! API request and response types
//!
//! Every endpoint responds with the [`ApiResponse`] envelope. Request
//! bodies carry their validation rules as `validator` derives and are
//! checked at the handler boundary, before any service call. JSON
//! property names are camelCase on the wire.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Uniform response envelope: `{ success, message, data }`
///
/// `data` is always present and null on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success envelope with no payload (deletes)
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

/// Role representation returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub role_id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Body for POST /roles
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 200, message = "description must not exceed 200 characters"))]
    pub description: Option<String>,
}

/// Body for PUT /roles/{id}
///
/// Updates are full replacement: an omitted description clears the
/// stored one.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoleRequest {
    #[validate(length(min = 1, max = 100, message = "name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(max = 200, message = "description must not exceed 200 characters"))]
    pub description: Option<String>,
}

/// User representation returned by the API, with its role joined in
/// and the password hash stripped
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: i32,
    pub full_name: String,
    pub email: String,
    pub role_id: i32,
    pub role: Option<RoleResponse>,
}

/// Body for POST /users
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "fullName must be between 1 and 150 characters"
    ))]
    pub full_name: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 150, message = "email must not exceed 150 characters")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(range(min = 1, message = "roleId must be greater than 0"))]
    pub role_id: i32,
}

/// Body for PUT /users/{id}
///
/// Password is optional: when omitted the stored hash is kept.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(
        min = 1,
        max = 150,
        message = "fullName must be between 1 and 150 characters"
    ))]
    pub full_name: String,
    #[validate(
        email(message = "email must be a valid email address"),
        length(max = 150, message = "email must not exceed 150 characters")
    )]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: Option<String>,
    #[validate(range(min = 1, message = "roleId must be greater than 0"))]
    pub role_id: i32,
}

/// Body for POST /auth/login
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Successful login payload: signed bearer token plus the
/// authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_envelope_serializes_null_data_on_failure() {
        let envelope = ApiResponse::<RoleResponse>::failure("nope");
        let json = serde_json::to_value(&envelope).unwrap();
        assert_eq!(json["success"], false);
        assert!(json["data"].is_null());
    }

    #[test]
    fn test_user_response_uses_camel_case() {
        let user = UserResponse {
            user_id: 1,
            full_name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            role_id: 2,
            role: None,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("userId").is_some());
        assert!(json.get("fullName").is_some());
        assert!(json.get("roleId").is_some());
        assert!(json.get("password_hash").is_none());
    }

    #[rstest]
    #[case("", true)]
    #[case("Admin", false)]
    fn test_role_name_required(#[case] name: &str, #[case] should_fail: bool) {
        let req = CreateRoleRequest {
            name: name.to_string(),
            description: None,
        };
        assert_eq!(req.validate().is_err(), should_fail);
    }

    #[test]
    fn test_role_name_length_limit() {
        let req = CreateRoleRequest {
            name: "x".repeat(101),
            description: None,
        };
        assert!(req.validate().is_err());

        let req = CreateRoleRequest {
            name: "x".repeat(100),
            description: Some("y".repeat(201)),
        };
        assert!(req.validate().is_err());
    }

    #[rstest]
    #[case("ana@x.com", "secret1", true)]
    #[case("not-an-email", "secret1", false)]
    #[case("ana@x.com", "short", false)]
    #[case("ana@x.com", "", false)]
    fn test_create_user_validation(
        #[case] email: &str,
        #[case] password: &str,
        #[case] valid: bool,
    ) {
        let req = CreateUserRequest {
            full_name: "Ana".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role_id: 1,
        };
        assert_eq!(req.validate().is_ok(), valid);
    }

    #[test]
    fn test_update_user_password_optional() {
        let req = UpdateUserRequest {
            full_name: "Ana".to_string(),
            email: "ana@x.com".to_string(),
            password: None,
            role_id: 1,
        };
        assert!(req.validate().is_ok());

        let req = UpdateUserRequest {
            password: Some("short".to_string()),
            ..req
        };
        assert!(req.validate().is_err());
    }
}
